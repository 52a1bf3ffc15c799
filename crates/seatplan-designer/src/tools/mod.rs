//! Tools: per-gesture state machines driven by the dispatcher.
//!
//! Exactly one tool is active at a time. The dispatcher holds it as a
//! [`ToolState`] variant and forwards every canonical [`ToolEvent`] to the one
//! matching handler of the [`Tool`] trait. Gesture state lives inside the
//! variant and nowhere else.

mod box_select;
mod context;
mod draw_section;
mod move_tool;
mod place_seat;
mod seat_rows;
mod select;
mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use box_select::BoxSelectTool;
pub use context::{Hit, ToolContext};
pub use draw_section::{DrawBoxTool, DrawSectionTool};
pub use move_tool::MoveTool;
pub use place_seat::{PlaceSeatTool, SeatPlacement};
pub use seat_rows::SeatRowsTool;
pub use select::SelectTool;
pub use transform::TransformGesture;

use crate::input::{Key, ToolEvent};
use crate::overlay::Cursor;

/// Identifies a tool variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolId {
    /// View, pan and select.
    #[default]
    Select,
    DrawSection,
    DrawSectionBox,
    PlaceSeat,
    PlaceSeatRows,
    Move,
    BoxSelect,
}

impl ToolId {
    pub const ALL: [ToolId; 7] = [
        ToolId::Select,
        ToolId::DrawSection,
        ToolId::DrawSectionBox,
        ToolId::PlaceSeat,
        ToolId::PlaceSeatRows,
        ToolId::Move,
        ToolId::BoxSelect,
    ];

    /// Host-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::Select => "select",
            ToolId::DrawSection => "draw-section",
            ToolId::DrawSectionBox => "draw-section-box",
            ToolId::PlaceSeat => "place-seat",
            ToolId::PlaceSeatRows => "place-seat-rows",
            ToolId::Move => "move",
            ToolId::BoxSelect => "box-select",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gesture state machine.
///
/// Every handler has a no-op default except `on_wheel`, which zooms at the
/// cursor. Handlers never fail: problems are logged and the event is dropped.
pub trait Tool {
    fn id(&self) -> ToolId;

    /// Cursor shown while the tool is idle.
    fn cursor(&self) -> Cursor {
        Cursor::Default
    }

    fn on_activate(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.set_cursor(self.cursor());
        ctx.set_overlay(None);
    }

    /// Must leave no partial gesture behind.
    fn on_deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        self.cancel(ctx);
        ctx.set_overlay(None);
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, _event: &ToolEvent) {}

    fn on_pointer_move(&mut self, _ctx: &mut ToolContext<'_>, _event: &ToolEvent) {}

    fn on_pointer_up(&mut self, _ctx: &mut ToolContext<'_>, _event: &ToolEvent) {}

    fn on_double_click(&mut self, _ctx: &mut ToolContext<'_>, _event: &ToolEvent) {}

    fn on_wheel(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        zoom_at_cursor(ctx, event);
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.is_key(&Key::Escape) && self.cancel(ctx) {
            ctx.mark_handled();
        }
    }

    fn on_key_up(&mut self, _ctx: &mut ToolContext<'_>, _event: &ToolEvent) {}

    /// Abandons any in-flight gesture and restores the model to its state
    /// before the gesture. Returns `true` if there was something to cancel.
    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) -> bool {
        false
    }

    /// Whether a gesture is in progress.
    fn is_busy(&self) -> bool {
        false
    }
}

/// Wheel zoom keeping the world point under the cursor fixed.
pub(crate) fn zoom_at_cursor(ctx: &mut ToolContext<'_>, event: &ToolEvent) {
    let delta = event.wheel_delta.y;
    if delta == 0.0 || !delta.is_finite() {
        return;
    }
    let step = ctx.config().viewport.zoom_step;
    let viewport = ctx.viewport_mut();
    if delta < 0.0 {
        viewport.zoom_in_at(event.screen, step);
    } else {
        viewport.zoom_out_at(event.screen, step);
    }
}

/// Editing shortcuts shared by the select and move tools: undo/redo, select
/// all, delete and arrow-key nudge. Returns `true` if the key was consumed.
pub(crate) fn handle_edit_shortcut(ctx: &mut ToolContext<'_>, event: &ToolEvent) -> bool {
    let Some(key) = event.key.as_ref() else {
        return false;
    };
    let mods = event.modifiers;

    if mods.command() {
        if key.is_char('z') {
            if mods.shift {
                ctx.redo();
            } else {
                ctx.undo();
            }
            return true;
        }
        if key.is_char('y') {
            ctx.redo();
            return true;
        }
        if key.is_char('a') {
            ctx.select_all();
            ctx.show_selection_handles();
            return true;
        }
        return false;
    }

    let snapping = &ctx.config().snapping;
    let step = if snapping.grid_enabled {
        snapping.grid_size
    } else {
        1.0
    };
    let handled = match key {
        Key::Delete | Key::Backspace => ctx.delete_selection(),
        Key::ArrowLeft => ctx.nudge_selection(-step, 0.0),
        Key::ArrowRight => ctx.nudge_selection(step, 0.0),
        Key::ArrowUp => ctx.nudge_selection(0.0, -step),
        Key::ArrowDown => ctx.nudge_selection(0.0, step),
        _ => return false,
    };
    if handled {
        ctx.show_selection_handles();
    }
    true
}

/// The active tool.
#[derive(Debug, Clone)]
pub enum ToolState {
    Select(SelectTool),
    DrawSection(DrawSectionTool),
    DrawSectionBox(DrawBoxTool),
    PlaceSeat(PlaceSeatTool),
    PlaceSeatRows(SeatRowsTool),
    Move(MoveTool),
    BoxSelect(BoxSelectTool),
}

impl ToolState {
    /// A fresh, idle instance of the given tool.
    pub fn new(id: ToolId) -> Self {
        match id {
            ToolId::Select => ToolState::Select(SelectTool::default()),
            ToolId::DrawSection => ToolState::DrawSection(DrawSectionTool::default()),
            ToolId::DrawSectionBox => ToolState::DrawSectionBox(DrawBoxTool::default()),
            ToolId::PlaceSeat => ToolState::PlaceSeat(PlaceSeatTool::default()),
            ToolId::PlaceSeatRows => ToolState::PlaceSeatRows(SeatRowsTool::default()),
            ToolId::Move => ToolState::Move(MoveTool::default()),
            ToolId::BoxSelect => ToolState::BoxSelect(BoxSelectTool::default()),
        }
    }

    pub fn id(&self) -> ToolId {
        self.tool().id()
    }

    pub fn tool(&self) -> &dyn Tool {
        match self {
            ToolState::Select(t) => t,
            ToolState::DrawSection(t) => t,
            ToolState::DrawSectionBox(t) => t,
            ToolState::PlaceSeat(t) => t,
            ToolState::PlaceSeatRows(t) => t,
            ToolState::Move(t) => t,
            ToolState::BoxSelect(t) => t,
        }
    }

    pub fn tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ToolState::Select(t) => t,
            ToolState::DrawSection(t) => t,
            ToolState::DrawSectionBox(t) => t,
            ToolState::PlaceSeat(t) => t,
            ToolState::PlaceSeatRows(t) => t,
            ToolState::Move(t) => t,
            ToolState::BoxSelect(t) => t,
        }
    }
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::new(ToolId::Select)
    }
}
