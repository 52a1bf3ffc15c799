//! The tool dispatcher and public face of the interaction engine.
//!
//! `Engine` owns the viewport, the configuration, the open document and the
//! single active tool. Every host event is converted once into a canonical
//! [`ToolEvent`] and forwarded to the matching handler of the active tool.
//! The engine runs each event to completion and reports what changed in an
//! [`EventResponse`].

use seatplan_core::{Error, Result};
use seatplan_settings::EditorConfig;

use crate::align::Alignment;
use crate::commands::Command;
use crate::document::Document;
use crate::geometry::Point;
use crate::input::{DragTracker, HostEvent, PointerButton, ToolEvent, ToolEventKind};
use crate::model::{SeatId, SectionId, VenueStore};
use crate::overlay::{Cursor, EventResponse, Overlay};
use crate::history::HistoryManager;
use crate::selection_manager::SelectionManager;
use crate::tools::{SeatPlacement, ToolContext, ToolId, ToolState};
use crate::viewport::Viewport;

/// Builds a [`ToolContext`] from disjoint engine fields and runs `$body`
/// with it bound to `$ctx`.
macro_rules! with_context {
    ($engine:expr, $doc:expr, $response:expr, |$ctx:ident| $body:expr) => {{
        let mut $ctx = ToolContext::new(
            $doc,
            &mut $engine.viewport,
            &$engine.config,
            &$engine.placement,
            &mut $engine.cursor,
            &mut $engine.overlay,
            $response,
        );
        $body
    }};
}

/// The interaction engine.
#[derive(Debug)]
pub struct Engine {
    config: EditorConfig,
    viewport: Viewport,
    document: Option<Document>,
    tool: ToolState,
    placement: SeatPlacement,
    drag: DragTracker,
    /// Last known pointer position in screen pixels.
    pointer: Point,
    cursor: Cursor,
    overlay: Option<Overlay>,
}

impl Engine {
    /// Creates an engine with a validated configuration and no document.
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::with_limits(
            Viewport::default().canvas_width(),
            Viewport::default().canvas_height(),
            config.viewport.min_zoom,
            config.viewport.max_zoom,
        );
        let placement = SeatPlacement::from_settings(&config.seats);
        Ok(Self {
            config,
            viewport,
            document: None,
            tool: ToolState::default(),
            placement,
            drag: DragTracker::default(),
            pointer: Point::default(),
            cursor: Cursor::Default,
            overlay: None,
        })
    }

    // ── Document lifecycle ──────────────────────────────────────

    /// Opens a document, replacing any open one. Pending gestures are
    /// cancelled first; history and selection start empty.
    pub fn load_document(&mut self, store: VenueStore) {
        self.cancel_gesture();
        tracing::info!(
            "Loaded document with {} sections and {} seats",
            store.len(),
            store.seat_count()
        );
        self.document = Some(Document::new(store, self.config.history.capacity));
        self.drag.release();
        self.activate_current();
    }

    /// Closes the open document and hands its model back.
    pub fn close_document(&mut self) -> Option<VenueStore> {
        self.cancel_gesture();
        self.drag.release();
        self.overlay = None;
        let document = self.document.take()?;
        tracing::info!("Closed document");
        Some(document.store)
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn store(&self) -> Option<&VenueStore> {
        self.document.as_ref().map(|d| &d.store)
    }

    pub fn selection(&self) -> Option<&SelectionManager> {
        self.document.as_ref().map(|d| &d.selection)
    }

    pub fn history(&self) -> Option<&HistoryManager> {
        self.document.as_ref().map(|d| &d.history)
    }

    // ── Configuration ───────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the configuration after validating it. The viewport is
    /// re-clamped to the new zoom range and the history to the new capacity.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            tracing::warn!("Rejected configuration: {}", err);
            return Err(err.into());
        }
        self.viewport
            .set_zoom_limits(config.viewport.min_zoom, config.viewport.max_zoom);
        if let Some(doc) = self.document.as_mut() {
            doc.history.set_capacity(config.history.capacity);
        }
        self.config = config;
        tracing::debug!("Configuration replaced");
        Ok(())
    }

    pub fn seat_placement(&self) -> &SeatPlacement {
        &self.placement
    }

    /// Sets the attributes given to newly placed seats.
    pub fn set_seat_placement(&mut self, placement: SeatPlacement) {
        self.placement = placement;
    }

    // ── Viewport ────────────────────────────────────────────────

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.viewport.screen_to_world(screen.x, screen.y)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.viewport.world_to_screen(world.x, world.y)
    }

    /// Zooms in one step around the canvas center.
    pub fn zoom_in(&mut self) {
        let center = self.canvas_center();
        self.viewport.zoom_in_at(center, self.config.viewport.zoom_step);
    }

    /// Zooms out one step around the canvas center.
    pub fn zoom_out(&mut self) {
        let center = self.canvas_center();
        self.viewport.zoom_out_at(center, self.config.viewport.zoom_step);
    }

    /// Fits the viewport to everything in the document.
    pub fn fit_to_content(&mut self) {
        if let Some(bounds) = self.store().and_then(VenueStore::bounds) {
            self.viewport.fit_to_view(&bounds);
        }
    }

    fn canvas_center(&self) -> Point {
        Point::new(
            self.viewport.canvas_width() / 2.0,
            self.viewport.canvas_height() / 2.0,
        )
    }

    // ── Presentation ────────────────────────────────────────────

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    // ── Tools ───────────────────────────────────────────────────

    pub fn active_tool(&self) -> ToolId {
        self.tool.id()
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tool
    }

    /// Switches tools: the outgoing tool is deactivated first, then the
    /// incoming one activated.
    pub fn set_tool(&mut self, id: ToolId) -> EventResponse {
        let mut response = EventResponse::handled();
        if let Some(doc) = self.document.as_mut() {
            with_context!(self, doc, &mut response, |ctx| {
                self.tool.tool_mut().on_deactivate(&mut ctx)
            });
        }
        tracing::debug!("Tool {} -> {}", self.tool.id(), id);
        self.tool = ToolState::new(id);
        self.drag.release();
        response.merge(self.activate_current());
        self.finish(response)
    }

    /// Switches tools by host-facing name. Unknown names are ignored.
    pub fn set_tool_by_name(&mut self, name: &str) -> Option<EventResponse> {
        match ToolId::from_name(name) {
            Some(id) => Some(self.set_tool(id)),
            None => {
                tracing::warn!("Unknown tool '{}'", name);
                None
            }
        }
    }

    fn activate_current(&mut self) -> EventResponse {
        let mut response = EventResponse::handled();
        match self.document.as_mut() {
            Some(doc) => with_context!(self, doc, &mut response, |ctx| {
                self.tool.tool_mut().on_activate(&mut ctx)
            }),
            None => {
                self.cursor = self.tool.tool().cursor();
                self.overlay = None;
            }
        }
        response
    }

    /// Cancels any in-flight gesture, restoring the model to its state before
    /// the gesture. Returns `true` if something was cancelled.
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        if !self.tool.tool().is_busy() {
            return false;
        }
        let mut response = EventResponse::default();
        let cancelled = with_context!(self, doc, &mut response, |ctx| {
            self.tool.tool_mut().cancel(&mut ctx)
        });
        self.drag.release();
        if cancelled {
            tracing::debug!("Cancelled gesture of {}", self.tool.id());
        }
        cancelled
    }

    // ── Event dispatch ──────────────────────────────────────────

    /// Handles one host event.
    pub fn handle_event(&mut self, event: HostEvent) -> EventResponse {
        if let HostEvent::Unsupported { kind } = &event {
            tracing::trace!("Ignoring unsupported event '{}'", kind);
            return EventResponse::ignored();
        }
        if self.document.is_none() {
            tracing::warn!("Event {:?} received without a document", event);
            return EventResponse::ignored();
        }

        let Some(tool_event) = self.canonical_event(event) else {
            return EventResponse::ignored();
        };

        let mut response = EventResponse::default();
        if let Some(doc) = self.document.as_mut() {
            with_context!(self, doc, &mut response, |ctx| {
                let tool = self.tool.tool_mut();
                match tool_event.kind {
                    ToolEventKind::PointerDown => tool.on_pointer_down(&mut ctx, &tool_event),
                    ToolEventKind::PointerMove => tool.on_pointer_move(&mut ctx, &tool_event),
                    ToolEventKind::PointerUp => tool.on_pointer_up(&mut ctx, &tool_event),
                    ToolEventKind::DoubleClick => tool.on_double_click(&mut ctx, &tool_event),
                    ToolEventKind::Wheel => tool.on_wheel(&mut ctx, &tool_event),
                    ToolEventKind::KeyDown => tool.on_key_down(&mut ctx, &tool_event),
                    ToolEventKind::KeyUp => tool.on_key_up(&mut ctx, &tool_event),
                }
            });
        }

        if tool_event.kind == ToolEventKind::PointerUp {
            self.drag.release();
        }
        self.finish(response)
    }

    /// Converts a host event into the canonical tool event, updating the drag
    /// tracker on the way.
    fn canonical_event(&mut self, event: HostEvent) -> Option<ToolEvent> {
        if let Some(screen) = event.screen_position() {
            self.pointer = screen;
        }
        let screen = self.pointer;
        let world = self.viewport.screen_to_world(screen.x, screen.y);
        let threshold = self.config.gestures.drag_threshold_px;

        let (kind, modifiers, button, key, wheel_delta) = match event {
            HostEvent::PointerDown {
                button, modifiers, ..
            } => {
                self.drag.press(screen, world, button);
                (ToolEventKind::PointerDown, modifiers, Some(button), None, Point::default())
            }
            HostEvent::PointerMove { modifiers, .. } => {
                self.drag.update(screen, threshold);
                (ToolEventKind::PointerMove, modifiers, self.drag.button(), None, Point::default())
            }
            HostEvent::PointerUp {
                button, modifiers, ..
            } => {
                self.drag.update(screen, threshold);
                (ToolEventKind::PointerUp, modifiers, Some(button), None, Point::default())
            }
            HostEvent::DoubleClick { modifiers, .. } => (
                ToolEventKind::DoubleClick,
                modifiers,
                Some(PointerButton::Primary),
                None,
                Point::default(),
            ),
            HostEvent::Wheel {
                delta_x,
                delta_y,
                modifiers,
                ..
            } => (
                ToolEventKind::Wheel,
                modifiers,
                None,
                None,
                Point::new(delta_x, delta_y),
            ),
            HostEvent::KeyDown { key, modifiers } => {
                (ToolEventKind::KeyDown, modifiers, None, Some(key), Point::default())
            }
            HostEvent::KeyUp { key, modifiers } => {
                (ToolEventKind::KeyUp, modifiers, None, Some(key), Point::default())
            }
            HostEvent::Unsupported { .. } => return None,
        };

        Some(ToolEvent {
            kind,
            screen,
            world,
            viewport: self.viewport.state(),
            modifiers,
            button,
            key,
            wheel_delta,
            pressed: self.drag.is_pressed(),
            is_drag: self.drag.is_dragging(),
            press_screen: self.drag.press_screen(),
            press_world: self.drag.press_world(),
        })
    }

    /// Prunes the selection after a model change and attaches the current
    /// presentation state.
    fn finish(&mut self, mut response: EventResponse) -> EventResponse {
        if response.model_changed {
            if let Some(doc) = self.document.as_mut() {
                if doc.prune_selection() {
                    response.selection_changed = true;
                }
            }
        }
        response.cursor = self.cursor;
        response.overlay = self.overlay.clone();
        response
    }

    /// Runs `f` with a tool context after cancelling any pending gesture.
    /// Logs and returns `None` when no document is open.
    fn edit<T>(&mut self, what: &str, f: impl FnOnce(&mut ToolContext<'_>) -> T) -> Option<(T, EventResponse)> {
        self.cancel_gesture();
        let mut response = EventResponse::default();
        let Some(doc) = self.document.as_mut() else {
            tracing::warn!("{} ignored: no document", what);
            return None;
        };
        let value = with_context!(self, doc, &mut response, |ctx| f(&mut ctx));
        Some((value, self.finish(response)))
    }

    // ── Editing operations ──────────────────────────────────────

    /// Executes a command through the history.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        self.cancel_gesture();
        let Some(doc) = self.document.as_mut() else {
            tracing::warn!("Command '{}' ignored: no document", command.name());
            return Err(Error::NoDocument);
        };
        doc.history.execute(command, &mut doc.store)?;
        doc.prune_selection();
        Ok(())
    }

    /// Reverts the last command. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.edit("Undo", |ctx| ctx.undo())
            .is_some_and(|(done, _)| done)
    }

    /// Re-applies the last undone command.
    pub fn redo(&mut self) -> bool {
        self.edit("Redo", |ctx| ctx.redo())
            .is_some_and(|(done, _)| done)
    }

    pub fn can_undo(&self) -> bool {
        self.history().is_some_and(HistoryManager::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history().is_some_and(HistoryManager::can_redo)
    }

    /// Adds a vertex to the polygon being drawn, as a click at `world` would.
    ///
    /// Only valid while the draw-section tool is active.
    pub fn add_section_point(&mut self, world: Point) -> EventResponse {
        if self.tool.id() != ToolId::DrawSection {
            tracing::warn!("add_section_point ignored: active tool is {}", self.tool.id());
            return EventResponse::ignored();
        }
        let (Some(doc), ToolState::DrawSection(tool)) = (self.document.as_mut(), &mut self.tool) else {
            tracing::warn!("add_section_point ignored: no document");
            return EventResponse::ignored();
        };
        let mut response = EventResponse::default();
        with_context!(self, doc, &mut response, |ctx| {
            tool.add_point(&mut ctx, world);
        });
        self.finish(response)
    }

    /// Completes the polygon being drawn. The response reports no model
    /// change if the outline was rejected.
    pub fn complete_section_drawing(&mut self) -> EventResponse {
        if self.tool.id() != ToolId::DrawSection {
            tracing::warn!("complete_section_drawing ignored: active tool is {}", self.tool.id());
            return EventResponse::ignored();
        }
        let (Some(doc), ToolState::DrawSection(tool)) = (self.document.as_mut(), &mut self.tool) else {
            tracing::warn!("complete_section_drawing ignored: no document");
            return EventResponse::ignored();
        };
        let mut response = EventResponse::default();
        with_context!(self, doc, &mut response, |ctx| {
            tool.complete(&mut ctx);
        });
        self.finish(response)
    }

    /// Places one seat at `world` with the current placement settings.
    pub fn add_seat(&mut self, world: Point) -> Option<SeatId> {
        self.edit("add_seat", |ctx| ctx.add_seat(&world))
            .and_then(|(id, _)| id)
    }

    pub fn select_sections<I>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SectionId>,
    {
        self.edit("select_sections", |ctx| {
            ctx.select_sections(ids, additive);
            ctx.show_selection_handles();
        });
    }

    pub fn select_seats<I>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SeatId>,
    {
        self.edit("select_seats", |ctx| {
            ctx.select_seats(ids, additive);
            ctx.show_selection_handles();
        });
    }

    pub fn select_all(&mut self) {
        self.edit("select_all", |ctx| {
            ctx.select_all();
            ctx.show_selection_handles();
        });
    }

    pub fn clear_selection(&mut self) {
        self.edit("clear_selection", |ctx| {
            ctx.clear_selection();
            ctx.set_overlay(None);
        });
    }

    /// Deletes the selection as one undoable step.
    pub fn delete_selection(&mut self) -> bool {
        self.edit("delete_selection", |ctx| {
            let deleted = ctx.delete_selection();
            ctx.show_selection_handles();
            deleted
        })
        .is_some_and(|(done, _)| done)
    }

    /// Aligns the selected sections as one undoable step.
    pub fn align_selection(&mut self, alignment: Alignment) -> bool {
        self.edit("align_selection", |ctx| {
            let aligned = ctx.align_selection(alignment);
            ctx.show_selection_handles();
            aligned
        })
        .is_some_and(|(done, _)| done)
    }

    /// Moves the selection by a world offset as one command.
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> bool {
        self.edit("nudge_selection", |ctx| ctx.nudge_selection(dx, dy))
            .is_some_and(|(done, _)| done)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Topmost section containing a world point.
    pub fn section_at_point(&self, world: Point) -> Option<SectionId> {
        self.store()?.section_at_point(&world)
    }

    /// Seat under a world point.
    pub fn seat_at_point(&self, world: Point) -> Option<SeatId> {
        self.store()?
            .seat_at_point(&world, self.config.seats.seat_size / 2.0)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            viewport: Viewport::default(),
            document: None,
            tool: ToolState::default(),
            placement: SeatPlacement::default(),
            drag: DragTracker::default(),
            pointer: Point::default(),
            cursor: Cursor::Default,
            overlay: None,
        }
    }
}
