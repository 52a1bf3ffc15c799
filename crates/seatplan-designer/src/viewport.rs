//! Viewport and coordinate transformation.
//!
//! Converts between screen coordinates (device pixels, origin top-left) and
//! world coordinates (venue space). Both axes point the same way in both
//! spaces, so the mapping is a uniform scale followed by a translation:
//!
//! ```text
//! screen = world * scale + offset
//! world  = (screen - offset) / scale
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};
use seatplan_core::constants;

/// The scale/offset pair that defines the world-to-screen mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Represents the viewport transformation state (zoom and pan).
///
/// The scale is clamped to `[min_zoom, max_zoom]` on every write; the offset
/// is unconstrained.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: ViewportState,
    min_zoom: f64,
    max_zoom: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport at 1:1 with the world origin at the top-left corner.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            state: ViewportState::default(),
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            canvas_width,
            canvas_height,
        }
    }

    /// Creates a viewport with custom zoom limits. Inverted limits are swapped.
    pub fn with_limits(canvas_width: f64, canvas_height: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let mut vp = Self::new(canvas_width, canvas_height);
        vp.set_zoom_limits(min_zoom, max_zoom);
        vp
    }

    /// Current scale and offset.
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Replaces scale and offset; the scale is clamped.
    pub fn set_state(&mut self, state: ViewportState) {
        self.state.offset_x = state.offset_x;
        self.state.offset_y = state.offset_y;
        self.set_zoom(state.scale);
    }

    /// Updates the zoom limits and re-clamps the current scale.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        let scale = self.state.scale;
        self.set_zoom(scale);
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current scale (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.state.scale
    }

    /// Sets the scale, clamped to the zoom limits. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.state.scale = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn offset_x(&self) -> f64 {
        self.state.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.state.offset_y
    }

    /// Sets the pan offset in screen pixels.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.state.offset_x = x;
        self.state.offset_y = y;
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.state.offset_x += dx;
        self.state.offset_y += dy;
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
        Point::new(
            (sx - self.state.offset_x) / self.state.scale,
            (sy - self.state.offset_y) / self.state.scale,
        )
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, wx: f64, wy: f64) -> Point {
        Point::new(
            wx * self.state.scale + self.state.offset_x,
            wy * self.state.scale + self.state.offset_y,
        )
    }

    /// Converts a screen-space distance to a world-space distance.
    pub fn screen_dist_to_world(&self, px: f64) -> f64 {
        px / self.state.scale
    }

    /// Zooms so that the world point under `screen` stays fixed on screen.
    ///
    /// The world point is computed under the old scale; the new scale is
    /// clamped before the offset is derived from it.
    pub fn zoom_at(&mut self, screen: Point, new_scale: f64) {
        if !new_scale.is_finite() {
            return;
        }
        let world = self.screen_to_world(screen.x, screen.y);
        self.set_zoom(new_scale);
        let scale = self.state.scale;
        self.state.offset_x = screen.x - world.x * scale;
        self.state.offset_y = screen.y - world.y * scale;
    }

    /// Zooms in by `factor` at a screen point.
    pub fn zoom_in_at(&mut self, screen: Point, factor: f64) {
        self.zoom_at(screen, self.state.scale * factor);
    }

    /// Zooms out by `factor` at a screen point.
    pub fn zoom_out_at(&mut self, screen: Point, factor: f64) {
        self.zoom_at(screen, self.state.scale / factor);
    }

    /// Fits the given world box into the viewport with padding.
    ///
    /// `padding` is the fraction of the viewport (0.0 - 0.5) kept free on each
    /// side. Degenerate boxes are ignored.
    pub fn fit_to_bounds(&mut self, bounds: &BoundingBox, padding: f64) {
        let width = bounds.width();
        let height = bounds.height();
        if !(width > 0.0) || !(height > 0.0) {
            return;
        }

        let padding_factor = (1.0 - padding * 2.0).max(0.0);
        let zoom_x = (self.canvas_width * padding_factor) / width;
        let zoom_y = (self.canvas_height * padding_factor) / height;
        self.set_zoom(zoom_x.min(zoom_y));

        self.center_on(bounds.center());
    }

    /// Fits the viewport to the given bounds with the default padding.
    pub fn fit_to_view(&mut self, bounds: &BoundingBox) {
        self.fit_to_bounds(bounds, constants::VIEW_PADDING);
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point) {
        let scale = self.state.scale;
        self.state.offset_x = self.canvas_width / 2.0 - world.x * scale;
        self.state.offset_y = self.canvas_height / 2.0 - world.y * scale;
    }

    /// Resets to 1:1 with no offset.
    pub fn reset(&mut self) {
        self.state = ViewportState::default();
        let scale = self.state.scale;
        self.set_zoom(scale);
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.state.scale, self.state.offset_x, self.state.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
