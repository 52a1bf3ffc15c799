//! Configuration for the Seatplan interaction engine
//!
//! Every threshold, snap radius and capacity the engine consults lives here.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Viewport limits (zoom range, wheel step)
//! - Snapping (grid, vertex snap)
//! - Drawing (close radius, vertex cap, collinearity tolerance)
//! - Gestures (drag threshold, noise thresholds, handle geometry)
//! - Seat placement geometry
//! - History capacity

use crate::error::{ConfigError, SettingsResult};
use seatplan_core::constants;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewport limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest allowed scale
    pub min_zoom: f64,
    /// Largest allowed scale
    pub max_zoom: f64,
    /// Zoom factor per wheel notch
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            zoom_step: constants::ZOOM_STEP,
        }
    }
}

/// Snapping preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Round drawn points to the grid
    pub grid_enabled: bool,
    /// Grid cell size in world units
    pub grid_size: f64,
    /// Snap drawn points onto nearby existing vertices
    pub vertex_snap_enabled: bool,
    /// Vertex snap radius in screen pixels
    pub vertex_snap_radius_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            grid_enabled: false,
            grid_size: constants::GRID_SIZE,
            vertex_snap_enabled: true,
            vertex_snap_radius_px: constants::VERTEX_SNAP_RADIUS_PX,
        }
    }
}

/// Section drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Radius around the first vertex that closes the polygon, in screen pixels
    pub close_radius_px: f64,
    /// Vertex cap; reaching it forces completion
    pub max_vertices: usize,
    /// Relative collinearity tolerance
    pub collinear_epsilon: f64,
    /// Minimum side of a box-drawn section, in world units
    pub min_box_size: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            close_radius_px: constants::CLOSE_RADIUS_PX,
            max_vertices: constants::MAX_VERTICES,
            collinear_epsilon: constants::COLLINEAR_EPSILON,
            min_box_size: constants::MIN_BOX_SIZE,
        }
    }
}

/// Pointer gesture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Screen-space movement before a press becomes a drag
    pub drag_threshold_px: f64,
    /// World-space movement below which a move is discarded
    pub move_noise_threshold: f64,
    /// Handle hit radius in screen pixels
    pub handle_radius_px: f64,
    /// Rotate handle distance above the selection, in screen pixels
    pub rotate_handle_offset_px: f64,
    /// Rotations below this many degrees are discarded
    pub rotate_noise_degrees: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: constants::DRAG_THRESHOLD_PX,
            move_noise_threshold: constants::MOVE_NOISE_THRESHOLD,
            handle_radius_px: constants::HANDLE_RADIUS_PX,
            rotate_handle_offset_px: constants::ROTATE_HANDLE_OFFSET_PX,
            rotate_noise_degrees: constants::ROTATE_NOISE_DEGREES,
        }
    }
}

/// Seat geometry used by the placement tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatSettings {
    /// Seat diameter in world units
    pub seat_size: f64,
    /// Gap between seats in a row
    pub gap_x: f64,
    /// Gap between rows
    pub gap_y: f64,
    /// Row label of the first placed row
    pub row_label: String,
    /// Number of the first seat in a row
    pub start_number: u32,
}

impl SeatSettings {
    /// Distance between the centers of neighbouring seats in a row.
    pub fn pitch_x(&self) -> f64 {
        self.seat_size + self.gap_x
    }

    /// Distance between the center lines of neighbouring rows.
    pub fn pitch_y(&self) -> f64 {
        self.seat_size + self.gap_y
    }
}

impl Default for SeatSettings {
    fn default() -> Self {
        Self {
            seat_size: constants::SEAT_SIZE,
            gap_x: constants::SEAT_GAP_X,
            gap_y: constants::SEAT_GAP_Y,
            row_label: constants::DEFAULT_ROW_LABEL.to_string(),
            start_number: constants::DEFAULT_START_NUMBER,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Number of undo entries retained
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: constants::HISTORY_CAPACITY,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub viewport: ViewportSettings,
    pub snapping: SnapSettings,
    pub drawing: DrawingSettings,
    pub gestures: GestureSettings,
    pub seats: SeatSettings,
    pub history: HistorySettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vp = &self.viewport;
        if !(vp.min_zoom > 0.0) {
            return Err(ConfigError::out_of_range("viewport.min_zoom", vp.min_zoom));
        }
        if !(vp.max_zoom >= vp.min_zoom) {
            return Err(ConfigError::out_of_range("viewport.max_zoom", vp.max_zoom));
        }
        if !(vp.zoom_step > 1.0) {
            return Err(ConfigError::out_of_range("viewport.zoom_step", vp.zoom_step));
        }

        positive("snapping.grid_size", self.snapping.grid_size)?;
        non_negative(
            "snapping.vertex_snap_radius_px",
            self.snapping.vertex_snap_radius_px,
        )?;

        non_negative("drawing.close_radius_px", self.drawing.close_radius_px)?;
        if self.drawing.max_vertices < 3 {
            return Err(ConfigError::out_of_range(
                "drawing.max_vertices",
                self.drawing.max_vertices,
            ));
        }
        non_negative("drawing.collinear_epsilon", self.drawing.collinear_epsilon)?;
        non_negative("drawing.min_box_size", self.drawing.min_box_size)?;

        non_negative("gestures.drag_threshold_px", self.gestures.drag_threshold_px)?;
        non_negative(
            "gestures.move_noise_threshold",
            self.gestures.move_noise_threshold,
        )?;
        positive("gestures.handle_radius_px", self.gestures.handle_radius_px)?;
        non_negative(
            "gestures.rotate_handle_offset_px",
            self.gestures.rotate_handle_offset_px,
        )?;
        non_negative(
            "gestures.rotate_noise_degrees",
            self.gestures.rotate_noise_degrees,
        )?;

        positive("seats.seat_size", self.seats.seat_size)?;
        non_negative("seats.gap_x", self.seats.gap_x)?;
        non_negative("seats.gap_y", self.seats.gap_y)?;
        if self.seats.row_label.trim().is_empty() {
            return Err(ConfigError::out_of_range(
                "seats.row_label",
                &self.seats.row_label,
            ));
        }

        if self.history.capacity == 0 {
            return Err(ConfigError::out_of_range("history.capacity", 0));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}
