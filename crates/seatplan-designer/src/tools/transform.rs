//! Provisional move and rotate gestures on the selection.
//!
//! While the pointer moves, the gesture writes the transformed snapshot
//! straight into the model so the host sees live feedback. On commit the
//! snapshot is restored first and the net transform is executed as a single
//! command, so the history records one entry and undo is exact. On cancel the
//! snapshot is restored and nothing is recorded.

use crate::commands::{Command, EntitySnapshot};
use crate::geometry::{BoundingBox, Point};
use crate::input::Modifiers;
use crate::model::{SeatId, SectionId};
use crate::overlay::Overlay;

use super::ToolContext;

/// Rotation increment used while shift is held.
const ROTATE_SNAP_DEGREES: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
enum TransformKind {
    Translate { dx: f64, dy: f64 },
    Rotate { pivot: Point, start_angle: f64, degrees: f64 },
}

/// A move or rotate of the current selection, in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGesture {
    origin: Vec<EntitySnapshot>,
    start: Point,
    bounds: BoundingBox,
    kind: TransformKind,
}

impl TransformGesture {
    fn capture(ctx: &ToolContext<'_>) -> Option<(Vec<EntitySnapshot>, BoundingBox)> {
        let selection = ctx.selection();
        let sections: Vec<SectionId> = selection.selected_sections().iter().copied().collect();
        let seats: Vec<SeatId> = selection.selected_seats().iter().copied().collect();
        let origin = EntitySnapshot::capture_all(ctx.store(), &sections, &seats);
        if origin.is_empty() {
            return None;
        }
        Some((origin, ctx.selection_bounds()?))
    }

    /// Starts moving the selection from `start`. `None` if nothing is selected.
    pub fn translate(ctx: &ToolContext<'_>, start: Point) -> Option<Self> {
        let (origin, bounds) = Self::capture(ctx)?;
        Self::translate_from(origin, bounds, start)
    }

    /// Starts moving previously captured geometry. `None` if `origin` is empty.
    pub fn translate_from(origin: Vec<EntitySnapshot>, bounds: BoundingBox, start: Point) -> Option<Self> {
        if origin.is_empty() {
            return None;
        }
        Some(Self {
            origin,
            start,
            bounds,
            kind: TransformKind::Translate { dx: 0.0, dy: 0.0 },
        })
    }

    /// Starts rotating the selection around the center of its bounds.
    pub fn rotate(ctx: &ToolContext<'_>, start: Point) -> Option<Self> {
        let (origin, bounds) = Self::capture(ctx)?;
        let pivot = bounds.center();
        let start_angle = (start.y - pivot.y).atan2(start.x - pivot.x);
        Some(Self {
            origin,
            start,
            bounds,
            kind: TransformKind::Rotate {
                pivot,
                start_angle,
                degrees: 0.0,
            },
        })
    }

    /// Number of captured entities.
    pub fn len(&self) -> usize {
        self.origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    /// Net translation so far; zero for rotations.
    pub fn delta(&self) -> (f64, f64) {
        match self.kind {
            TransformKind::Translate { dx, dy } => (dx, dy),
            TransformKind::Rotate { .. } => (0.0, 0.0),
        }
    }

    /// Net rotation so far in degrees; zero for moves.
    pub fn degrees(&self) -> f64 {
        match self.kind {
            TransformKind::Rotate { degrees, .. } => degrees,
            TransformKind::Translate { .. } => 0.0,
        }
    }

    /// Applies the transform for pointer position `world` provisionally.
    pub fn update(&mut self, ctx: &mut ToolContext<'_>, world: Point, modifiers: Modifiers) {
        match &mut self.kind {
            TransformKind::Translate { dx, dy } => {
                let (sx, sy) = ctx.snap_delta(world.x - self.start.x, world.y - self.start.y);
                *dx = sx;
                *dy = sy;
            }
            TransformKind::Rotate {
                pivot,
                start_angle,
                degrees,
            } => {
                let angle = (world.y - pivot.y).atan2(world.x - pivot.x);
                let mut d = (angle - *start_angle).to_degrees();
                if modifiers.shift {
                    d = (d / ROTATE_SNAP_DEGREES).round() * ROTATE_SNAP_DEGREES;
                }
                *degrees = d;
            }
        }
        self.write_provisional(ctx);
        ctx.set_overlay(Some(self.overlay()));
    }

    fn write_provisional(&self, ctx: &mut ToolContext<'_>) {
        let store = ctx.store_mut();
        let result = match self.kind {
            TransformKind::Translate { dx, dy } => self
                .origin
                .iter()
                .try_for_each(|s| s.write(store, |p| p.translated(dx, dy), 0.0)),
            TransformKind::Rotate { pivot, degrees, .. } => self
                .origin
                .iter()
                .try_for_each(|s| s.write(store, |p| p.rotated_about(&pivot, degrees), degrees)),
        };
        if let Err(err) = result {
            tracing::warn!("Provisional transform failed: {}", err);
        }
    }

    fn restore(&self, ctx: &mut ToolContext<'_>) {
        let store = ctx.store_mut();
        for snapshot in &self.origin {
            if let Err(err) = snapshot.restore(store) {
                tracing::warn!("Could not restore snapshot: {}", err);
            }
        }
    }

    /// Restores the snapshot and records the net transform as one command if
    /// it is above the noise threshold. Returns `true` if a command ran.
    pub fn commit(self, ctx: &mut ToolContext<'_>) -> bool {
        self.restore(ctx);
        let gestures = &ctx.config().gestures;
        let command = match self.kind {
            TransformKind::Translate { dx, dy } => {
                if dx.hypot(dy) <= gestures.move_noise_threshold {
                    tracing::debug!("Move of ({:.3}, {:.3}) below noise threshold", dx, dy);
                    return false;
                }
                Command::translate_from(self.origin, dx, dy)
            }
            TransformKind::Rotate { pivot, degrees, .. } => {
                if degrees.abs() <= gestures.rotate_noise_degrees {
                    tracing::debug!("Rotation of {:.3} degrees below noise threshold", degrees);
                    return false;
                }
                Command::rotate_from(self.origin, pivot, degrees)
            }
        };
        ctx.execute(command)
    }

    /// Restores the snapshot without recording anything.
    pub fn cancel(self, ctx: &mut ToolContext<'_>) {
        self.restore(ctx);
        tracing::debug!("Transform gesture cancelled");
    }

    pub fn overlay(&self) -> Overlay {
        match self.kind {
            TransformKind::Translate { dx, dy } => Overlay::SelectionBox {
                bounds: BoundingBox::new(
                    self.bounds.min_x + dx,
                    self.bounds.min_y + dy,
                    self.bounds.max_x + dx,
                    self.bounds.max_y + dy,
                ),
            },
            TransformKind::Rotate { pivot, degrees, .. } => Overlay::Rotation {
                pivot,
                degrees,
                bounds: self.bounds,
            },
        }
    }
}
