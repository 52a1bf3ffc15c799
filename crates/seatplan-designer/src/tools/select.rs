//! View/Select tool.
//!
//! What happens on pointer down depends on what is under the pointer:
//! - middle button, alt or a held space bar: pan
//! - the rotate handle of the selection: rotate
//! - a seat or section: select it, and drag it once the pointer moves
//! - empty canvas: box-select once the pointer moves, clear on click
//!
//! Escape reverts an uncommitted drag or rotation and otherwise clears the
//! selection.

use crate::geometry::{BoundingBox, Point};
use crate::input::{Key, PointerButton, ToolEvent};
use crate::overlay::{Cursor, Overlay};

use super::{handle_edit_shortcut, Hit, Tool, ToolContext, ToolId, TransformGesture};

#[derive(Debug, Clone, Default)]
enum SelectState {
    #[default]
    Idle,
    /// Button down on an entity or empty canvas, not yet dragged.
    Pressed {
        hit: Option<Hit>,
        additive: bool,
        was_selected: bool,
    },
    Panning { last_screen: Point },
    BoxSelecting { start: Point, current: Point, additive: bool },
    Dragging(TransformGesture),
    Rotating(TransformGesture),
}

/// The default tool: pan, select, move and rotate.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    state: SelectState,
    space_held: bool,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, SelectState::Panning { .. })
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self.state, SelectState::BoxSelecting { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectState::Dragging(_))
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, SelectState::Rotating(_))
    }

    fn hover_cursor(&self, ctx: &ToolContext<'_>, world: &Point) -> Cursor {
        if ctx.hits_rotate_handle(world) {
            Cursor::Rotate
        } else {
            match ctx.hit_test(world) {
                Some(hit) if ctx.is_hit_selected(hit) => Cursor::Move,
                Some(_) => Cursor::Pointer,
                None if self.space_held => Cursor::Grab,
                None => Cursor::Default,
            }
        }
    }
}

impl Tool for SelectTool {
    fn id(&self) -> ToolId {
        ToolId::Select
    }

    fn on_activate(&mut self, ctx: &mut ToolContext<'_>) {
        self.state = SelectState::Idle;
        ctx.set_cursor(Cursor::Default);
        ctx.show_selection_handles();
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if !matches!(self.state, SelectState::Idle) {
            return;
        }
        ctx.mark_handled();

        // Alt and space pan only from empty canvas; the middle button always pans.
        let over_entity =
            ctx.hits_rotate_handle(&event.world) || ctx.hit_test(&event.world).is_some();
        let pan_modifier = event.modifiers.alt || self.space_held;
        let wants_pan = event.button == Some(PointerButton::Middle) || (pan_modifier && !over_entity);
        if wants_pan {
            tracing::debug!("Select: panning");
            self.state = SelectState::Panning {
                last_screen: event.screen,
            };
            ctx.set_cursor(Cursor::Grabbing);
            return;
        }
        if event.button != Some(PointerButton::Primary) {
            return;
        }

        if ctx.hits_rotate_handle(&event.world) {
            if let Some(gesture) = TransformGesture::rotate(ctx, event.world) {
                tracing::debug!("Select: rotating {} entities", gesture.len());
                self.state = SelectState::Rotating(gesture);
                ctx.set_cursor(Cursor::Rotate);
                return;
            }
        }

        let additive = event.modifiers.shift;
        let hit = ctx.hit_test(&event.world);
        let was_selected = hit.is_some_and(|hit| ctx.is_hit_selected(hit));
        if let Some(hit) = hit {
            if !was_selected {
                ctx.select_hit(hit, additive);
                ctx.show_selection_handles();
            }
        }
        self.state = SelectState::Pressed {
            hit,
            additive,
            was_selected,
        };
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if matches!(self.state, SelectState::Idle) {
            let cursor = self.hover_cursor(ctx, &event.world);
            ctx.set_cursor(cursor);
            return;
        }

        match &mut self.state {
            SelectState::Idle => {}
            SelectState::Pressed { hit, additive, .. } => {
                if !event.is_drag {
                    return;
                }
                let (hit, additive) = (*hit, *additive);
                let start = event.press_world.unwrap_or(event.world);
                ctx.mark_handled();
                if hit.is_some() {
                    self.state = match TransformGesture::translate(ctx, start) {
                        Some(mut gesture) => {
                            tracing::debug!("Select: dragging {} entities", gesture.len());
                            gesture.update(ctx, event.world, event.modifiers);
                            ctx.set_cursor(Cursor::Grabbing);
                            SelectState::Dragging(gesture)
                        }
                        None => SelectState::Idle,
                    };
                } else {
                    tracing::debug!("Select: box selecting");
                    ctx.set_overlay(Some(Overlay::SelectionBox {
                        bounds: BoundingBox::from_corners(start, event.world),
                    }));
                    self.state = SelectState::BoxSelecting {
                        start,
                        current: event.world,
                        additive,
                    };
                }
            }
            SelectState::Panning { last_screen } => {
                let dx = event.screen.x - last_screen.x;
                let dy = event.screen.y - last_screen.y;
                *last_screen = event.screen;
                ctx.viewport_mut().pan_by(dx, dy);
            }
            SelectState::BoxSelecting { start, current, .. } => {
                *current = event.world;
                ctx.set_overlay(Some(Overlay::SelectionBox {
                    bounds: BoundingBox::from_corners(*start, *current),
                }));
                ctx.mark_handled();
            }
            SelectState::Dragging(gesture) | SelectState::Rotating(gesture) => {
                gesture.update(ctx, event.world, event.modifiers);
            }
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        match std::mem::take(&mut self.state) {
            SelectState::Idle => return,
            SelectState::Pressed {
                hit,
                additive,
                was_selected,
            } => match hit {
                // Shift-click on an entity that was already selected deselects it.
                Some(hit) if additive && was_selected => ctx.select_hit(hit, true),
                Some(hit) if !additive => ctx.select_hit(hit, false),
                Some(_) => {}
                None if !additive => ctx.clear_selection(),
                None => {}
            },
            SelectState::Panning { .. } => {}
            SelectState::BoxSelecting {
                start, additive, ..
            } => {
                ctx.select_in_box(&BoundingBox::from_corners(start, event.world), additive);
            }
            SelectState::Dragging(mut gesture) | SelectState::Rotating(mut gesture) => {
                gesture.update(ctx, event.world, event.modifiers);
                gesture.commit(ctx);
            }
        }
        ctx.mark_handled();
        ctx.show_selection_handles();
        let cursor = self.hover_cursor(ctx, &event.world);
        ctx.set_cursor(cursor);
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        match event.key {
            Some(Key::Space) => {
                self.space_held = true;
                if matches!(self.state, SelectState::Idle) {
                    ctx.set_cursor(Cursor::Grab);
                }
                ctx.mark_handled();
            }
            Some(Key::Escape) => {
                if !self.cancel(ctx) {
                    ctx.clear_selection();
                }
                ctx.show_selection_handles();
                ctx.mark_handled();
            }
            _ if self.is_busy() => {}
            _ => {
                if handle_edit_shortcut(ctx, event) {
                    ctx.mark_handled();
                }
            }
        }
    }

    fn on_key_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.is_key(&Key::Space) {
            self.space_held = false;
            if matches!(self.state, SelectState::Idle) {
                ctx.set_cursor(Cursor::Default);
            }
            ctx.mark_handled();
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        match std::mem::take(&mut self.state) {
            SelectState::Idle => false,
            SelectState::Dragging(gesture) | SelectState::Rotating(gesture) => {
                gesture.cancel(ctx);
                ctx.set_cursor(Cursor::Default);
                true
            }
            SelectState::BoxSelecting { .. } => {
                ctx.set_overlay(None);
                true
            }
            SelectState::Pressed { .. } | SelectState::Panning { .. } => {
                ctx.set_cursor(Cursor::Default);
                true
            }
        }
    }

    fn is_busy(&self) -> bool {
        !matches!(self.state, SelectState::Idle)
    }
}
