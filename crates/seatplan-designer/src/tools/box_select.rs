//! Box select tool.

use crate::geometry::{BoundingBox, Point};
use crate::input::{PointerButton, ToolEvent};
use crate::overlay::{Cursor, Overlay};

use super::{Tool, ToolContext, ToolId};

/// Tracks a rubber-band drag in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSelectTracker {
    pub start: Point,
    pub current: Point,
}

impl BoxSelectTracker {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.current)
    }
}

/// Selects everything a dragged rectangle touches: sections whose outline
/// overlaps it and seats whose center lies in it. Shift adds to the current
/// selection; a click without dragging clears it.
#[derive(Debug, Clone, Default)]
pub struct BoxSelectTool {
    tracker: Option<BoxSelectTracker>,
}

impl BoxSelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_box_selecting(&self) -> bool {
        self.tracker.is_some()
    }
}

impl Tool for BoxSelectTool {
    fn id(&self) -> ToolId {
        ToolId::BoxSelect
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.button == Some(PointerButton::Primary) {
            self.tracker = Some(BoxSelectTracker::new(event.world));
            ctx.mark_handled();
        }
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        tracker.current = event.world;
        if event.is_drag {
            let bounds = tracker.bounds();
            ctx.set_overlay(Some(Overlay::SelectionBox { bounds }));
            ctx.mark_handled();
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let Some(mut tracker) = self.tracker.take() else {
            return;
        };
        tracker.current = event.world;
        let additive = event.modifiers.shift;
        if event.is_drag {
            ctx.select_in_box(&tracker.bounds(), additive);
        } else if !additive {
            ctx.clear_selection();
        }
        ctx.show_selection_handles();
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        if self.tracker.take().is_some() {
            ctx.set_overlay(None);
            true
        } else {
            false
        }
    }

    fn is_busy(&self) -> bool {
        self.tracker.is_some()
    }
}
