//! Default tunables for the interaction engine.
//!
//! These are the values `EditorConfig::default()` starts from. Pixel values are
//! screen-space and therefore independent of the current zoom level.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed viewport scale.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_ZOOM: f64 = 20.0;

/// Multiplicative zoom factor applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

/// Padding (fraction of the viewport) kept around content by fit-to-view.
pub const VIEW_PADDING: f64 = 0.05;

// ── Snapping ────────────────────────────────────────────────────

/// Grid cell size in world units.
pub const GRID_SIZE: f64 = 10.0;

/// Radius in screen pixels within which a click snaps to an existing vertex.
pub const VERTEX_SNAP_RADIUS_PX: f64 = 10.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Radius in screen pixels around the first vertex that closes a polygon.
pub const CLOSE_RADIUS_PX: f64 = 10.0;

/// Hard cap on polygon vertices; reaching it forces completion.
pub const MAX_VERTICES: usize = 100;

/// Relative tolerance (sine of the angle) below which three points are collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-9;

/// Minimum width and height in world units of a box-drawn section.
pub const MIN_BOX_SIZE: f64 = 1.0;

// ── Gestures ────────────────────────────────────────────────────

/// Screen-space movement in pixels before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Net world-space movement below which a move gesture is discarded.
pub const MOVE_NOISE_THRESHOLD: f64 = 0.5;

/// Screen-space hit slop in pixels for handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the selection bounds to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Rotations smaller than this many degrees are discarded.
pub const ROTATE_NOISE_DEGREES: f64 = 0.1;

// ── Seats ───────────────────────────────────────────────────────

/// Seat diameter in world units.
pub const SEAT_SIZE: f64 = 10.0;

/// Gap between neighbouring seats in a row.
pub const SEAT_GAP_X: f64 = 2.0;

/// Gap between neighbouring rows.
pub const SEAT_GAP_Y: f64 = 4.0;

/// Row label given to the first row of a placement.
pub const DEFAULT_ROW_LABEL: &str = "A";

/// Number given to the first seat of a row.
pub const DEFAULT_START_NUMBER: u32 = 1;

// ── History ─────────────────────────────────────────────────────

/// Number of undo entries retained before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 50;
