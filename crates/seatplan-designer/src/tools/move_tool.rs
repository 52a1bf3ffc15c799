//! Move tool: drag the selection anywhere on the canvas.

use crate::commands::EntitySnapshot;
use crate::input::{Key, PointerButton, ToolEvent};
use crate::model::{SeatId, SectionId};
use crate::overlay::Cursor;

use super::{handle_edit_shortcut, Tool, ToolContext, ToolId, TransformGesture};

/// Drags the whole selection regardless of where the press lands.
///
/// Pressing on an unselected entity selects it first. The drag is applied
/// provisionally on every move and committed as one command on release, or
/// dropped if the net movement is below the noise threshold.
#[derive(Debug, Clone, Default)]
pub struct MoveTool {
    /// Geometry of the selection when the tool was activated.
    armed: Vec<EntitySnapshot>,
    gesture: Option<TransformGesture>,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities captured at activation.
    pub fn armed_len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    fn arm(&mut self, ctx: &ToolContext<'_>) {
        let selection = ctx.selection();
        let sections: Vec<SectionId> = selection.selected_sections().iter().copied().collect();
        let seats: Vec<SeatId> = selection.selected_seats().iter().copied().collect();
        self.armed = EntitySnapshot::capture_all(ctx.store(), &sections, &seats);
    }
}

impl Tool for MoveTool {
    fn id(&self) -> ToolId {
        ToolId::Move
    }

    fn cursor(&self) -> Cursor {
        Cursor::Move
    }

    fn on_activate(&mut self, ctx: &mut ToolContext<'_>) {
        self.gesture = None;
        self.arm(ctx);
        tracing::debug!("Move: armed with {} entities", self.armed.len());
        ctx.set_cursor(Cursor::Move);
        ctx.show_selection_handles();
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if self.gesture.is_some() || event.button != Some(PointerButton::Primary) {
            return;
        }
        if let Some(hit) = ctx.hit_test(&event.world) {
            if !ctx.is_hit_selected(hit) {
                ctx.select_hit(hit, event.modifiers.shift);
            }
        }
        // The model may have changed since activation (undo, nudge).
        self.arm(ctx);
        self.gesture = ctx.selection_bounds().and_then(|bounds| {
            TransformGesture::translate_from(self.armed.clone(), bounds, event.world)
        });
        ctx.mark_handled();
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if event.is_drag {
            gesture.update(ctx, event.world, event.modifiers);
            ctx.set_cursor(Cursor::Grabbing);
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        if event.is_drag {
            gesture.update(ctx, event.world, event.modifiers);
            gesture.commit(ctx);
        } else {
            gesture.cancel(ctx);
        }
        self.arm(ctx);
        ctx.set_cursor(Cursor::Move);
        ctx.show_selection_handles();
        ctx.mark_handled();
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.is_key(&Key::Escape) {
            self.cancel(ctx);
            ctx.mark_handled();
        } else if self.gesture.is_none() && handle_edit_shortcut(ctx, event) {
            self.arm(ctx);
            ctx.mark_handled();
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                gesture.cancel(ctx);
                ctx.set_cursor(Cursor::Move);
                ctx.show_selection_handles();
                true
            }
            None => false,
        }
    }

    fn is_busy(&self) -> bool {
        self.gesture.is_some()
    }
}
