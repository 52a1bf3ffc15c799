//! The context every tool handler receives.

use seatplan_settings::EditorConfig;

use super::place_seat::SeatPlacement;
use crate::align::{self, Alignment};
use crate::commands::Command;
use crate::document::Document;
use crate::geometry::{self, BoundingBox, Point};
use crate::model::{Seat, SeatId, SectionId, VenueStore};
use crate::overlay::{Cursor, EngineNotification, EventResponse, Overlay};
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;

/// What a hit-test found under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Seat(SeatId),
    Section(SectionId),
}

/// Borrowed view of the engine handed to a tool for one call.
///
/// The configuration and seat placement settings are passed in fresh on every
/// call; tools never keep their own copy.
pub struct ToolContext<'a> {
    document: &'a mut Document,
    viewport: &'a mut Viewport,
    config: &'a EditorConfig,
    placement: &'a SeatPlacement,
    cursor: &'a mut Cursor,
    overlay: &'a mut Option<Overlay>,
    response: &'a mut EventResponse,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        document: &'a mut Document,
        viewport: &'a mut Viewport,
        config: &'a EditorConfig,
        placement: &'a SeatPlacement,
        cursor: &'a mut Cursor,
        overlay: &'a mut Option<Overlay>,
        response: &'a mut EventResponse,
    ) -> Self {
        Self {
            document,
            viewport,
            config,
            placement,
            cursor,
            overlay,
            response,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        self.config
    }

    pub fn placement(&self) -> &SeatPlacement {
        self.placement
    }

    pub fn viewport(&self) -> &Viewport {
        self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        self.response.handled = true;
        self.viewport
    }

    pub fn store(&self) -> &VenueStore {
        &self.document.store
    }

    /// Direct model access for provisional gesture edits that bypass the
    /// history. Marks the model as changed.
    pub fn store_mut(&mut self) -> &mut VenueStore {
        self.response.model_changed = true;
        &mut self.document.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.document.selection
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    // ── Presentation ────────────────────────────────────────────

    pub fn set_cursor(&mut self, cursor: Cursor) {
        *self.cursor = cursor;
    }

    pub fn set_overlay(&mut self, overlay: Option<Overlay>) {
        *self.overlay = overlay;
    }

    pub fn notify(&mut self, notification: EngineNotification) {
        tracing::debug!("Notification: {:?}", notification);
        self.response.notifications.push(notification);
    }

    pub fn mark_handled(&mut self) {
        self.response.handled = true;
    }

    // ── Coordinates ─────────────────────────────────────────────

    pub fn screen_to_world(&self, screen: &Point) -> Point {
        self.viewport.screen_to_world(screen.x, screen.y)
    }

    pub fn world_to_screen(&self, world: &Point) -> Point {
        self.viewport.world_to_screen(world.x, world.y)
    }

    /// Converts a screen distance in pixels to world units at the current zoom.
    pub fn px_to_world(&self, px: f64) -> f64 {
        self.viewport.screen_dist_to_world(px)
    }

    /// Screen-space distance between two world points.
    pub fn screen_distance(&self, a: &Point, b: &Point) -> f64 {
        self.world_to_screen(a).distance_to(&self.world_to_screen(b))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn section_at_point(&self, world: &Point) -> Option<SectionId> {
        self.document.store.section_at_point(world)
    }

    pub fn seat_at_point(&self, world: &Point) -> Option<SeatId> {
        self.document
            .store
            .seat_at_point(world, self.config.seats.seat_size / 2.0)
    }

    /// Seats win over sections.
    pub fn hit_test(&self, world: &Point) -> Option<Hit> {
        self.seat_at_point(world)
            .map(Hit::Seat)
            .or_else(|| self.section_at_point(world).map(Hit::Section))
    }

    pub fn is_hit_selected(&self, hit: Hit) -> bool {
        match hit {
            Hit::Seat(id) => self.document.selection.is_seat_selected(id),
            Hit::Section(id) => self.document.selection.is_section_selected(id),
        }
    }

    /// Snaps a world point to an existing vertex within the snap radius, or
    /// failing that to the grid, as configured. `extra` holds vertices that
    /// are not in the model yet.
    pub fn snap_point(&self, world: &Point, extra: &[Point]) -> Point {
        let snapping = &self.config.snapping;
        if snapping.vertex_snap_enabled {
            let radius = self.px_to_world(snapping.vertex_snap_radius_px);
            let candidates = self.document.store.vertices().chain(extra.iter());
            if let Some(vertex) = geometry::nearest_vertex(world, candidates, radius) {
                return vertex;
            }
        }
        self.snap_to_grid(world)
    }

    /// Grid snap if the grid is enabled.
    pub fn snap_to_grid(&self, world: &Point) -> Point {
        let snapping = &self.config.snapping;
        if snapping.grid_enabled {
            geometry::snap_to_grid(world, snapping.grid_size)
        } else {
            *world
        }
    }

    /// Grid snap for a movement delta.
    pub fn snap_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        let snapping = &self.config.snapping;
        if snapping.grid_enabled {
            let p = geometry::snap_to_grid(&Point::new(dx, dy), snapping.grid_size);
            (p.x, p.y)
        } else {
            (dx, dy)
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Executes a command through the history. Failures are logged and leave
    /// the model unchanged.
    pub fn execute(&mut self, command: Command) -> bool {
        self.response.handled = true;
        let name = command.name().to_string();
        match self.document.history.execute(command, &mut self.document.store) {
            Ok(()) => {
                self.after_mutation();
                true
            }
            Err(err) => {
                tracing::warn!("Command '{}' failed: {}", name, err);
                false
            }
        }
    }

    /// Executes several commands as one undoable entry.
    pub fn execute_batch(&mut self, commands: Vec<Command>, label: impl Into<String>) -> bool {
        if commands.is_empty() {
            return false;
        }
        self.execute(Command::batch(label, commands))
    }

    pub fn undo(&mut self) -> bool {
        self.response.handled = true;
        match self.document.history.undo(&mut self.document.store) {
            Ok(true) => {
                self.after_mutation();
                true
            }
            Ok(false) => false,
            Err(err) => {
                tracing::warn!("Undo failed: {}", err);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        self.response.handled = true;
        match self.document.history.redo(&mut self.document.store) {
            Ok(true) => {
                self.after_mutation();
                true
            }
            Ok(false) => false,
            Err(err) => {
                tracing::warn!("Redo failed: {}", err);
                false
            }
        }
    }

    fn after_mutation(&mut self) {
        self.response.model_changed = true;
        if self.document.prune_selection() {
            self.response.selection_changed = true;
        }
    }

    /// Prunes the selection against the model.
    pub fn prune_selection(&mut self) {
        if self.document.prune_selection() {
            self.response.selection_changed = true;
        }
    }

    // ── Selection ───────────────────────────────────────────────

    pub fn select_sections<I>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SectionId>,
    {
        let doc = &mut *self.document;
        doc.selection.select_sections(&doc.store, ids, additive);
        self.response.selection_changed = true;
        self.response.handled = true;
    }

    pub fn select_seats<I>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SeatId>,
    {
        let doc = &mut *self.document;
        doc.selection.select_seats(&doc.store, ids, additive);
        self.response.selection_changed = true;
        self.response.handled = true;
    }

    /// Selects whatever was hit. With `toggle` the hit entity flips state
    /// and the rest of the selection is kept.
    pub fn select_hit(&mut self, hit: Hit, toggle: bool) {
        let doc = &mut *self.document;
        match (hit, toggle) {
            (Hit::Seat(id), true) => doc.selection.toggle_seat(&doc.store, id),
            (Hit::Section(id), true) => doc.selection.toggle_section(&doc.store, id),
            (Hit::Seat(id), false) => doc.selection.select_seats(&doc.store, [id], false),
            (Hit::Section(id), false) => doc.selection.select_sections(&doc.store, [id], false),
        }
        self.response.selection_changed = true;
        self.response.handled = true;
    }

    pub fn clear_selection(&mut self) {
        if !self.document.selection.is_empty() {
            self.document.selection.clear();
            self.response.selection_changed = true;
        }
        self.response.handled = true;
    }

    pub fn select_all(&mut self) {
        let doc = &mut *self.document;
        doc.selection.select_all(&doc.store);
        self.response.selection_changed = true;
        self.response.handled = true;
    }

    pub fn select_in_box(&mut self, bbox: &BoundingBox, additive: bool) {
        let doc = &mut *self.document;
        if doc.selection.select_in_box(&doc.store, bbox, additive) {
            self.response.selection_changed = true;
        }
        self.response.handled = true;
    }

    pub fn selection_bounds(&self) -> Option<BoundingBox> {
        self.document.selection.bounds(&self.document.store)
    }

    /// World position of the rotate handle above `bounds`.
    pub fn rotate_handle(&self, bounds: &BoundingBox) -> Point {
        let offset = self.px_to_world(self.config.gestures.rotate_handle_offset_px);
        Point::new(bounds.center().x, bounds.min_y - offset)
    }

    /// Whether a world point is on the rotate handle of the current selection.
    pub fn hits_rotate_handle(&self, world: &Point) -> bool {
        self.selection_bounds().is_some_and(|bounds| {
            let handle = self.rotate_handle(&bounds);
            self.screen_distance(&handle, world) <= self.config.gestures.handle_radius_px
        })
    }

    /// Shows the selection bounds and rotate handle, or clears the overlay
    /// when nothing is selected.
    pub fn show_selection_handles(&mut self) {
        let overlay = self.selection_bounds().map(|bounds| Overlay::SelectionHandles {
            rotate_handle: self.rotate_handle(&bounds),
            bounds,
        });
        self.set_overlay(overlay);
    }

    // ── Editing ─────────────────────────────────────────────────

    /// Deletes the selection as one undoable step.
    ///
    /// Selected sections go with their seats; selected seats whose section is
    /// also selected are not removed twice.
    pub fn delete_selection(&mut self) -> bool {
        let selection = &self.document.selection;
        let store = &self.document.store;
        let sections: Vec<SectionId> = selection.selected_sections().iter().copied().collect();
        let mut commands: Vec<Command> = selection
            .selected_seats()
            .iter()
            .filter(|id| {
                store
                    .seat(**id)
                    .is_some_and(|seat| !sections.contains(&seat.section_id))
            })
            .map(|id| Command::remove_seat(*id))
            .collect();
        commands.extend(sections.iter().map(|id| Command::delete_section(*id)));

        if commands.is_empty() {
            return false;
        }
        let label = format!("Delete {} item(s)", commands.len());
        self.execute_batch(commands, label)
    }

    /// Moves the selection by `(dx, dy)` as one command.
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> bool {
        let selection = &self.document.selection;
        if selection.is_empty() {
            return false;
        }
        let sections: Vec<SectionId> = selection.selected_sections().iter().copied().collect();
        let seats: Vec<SeatId> = selection.selected_seats().iter().copied().collect();
        let command = Command::translate(&self.document.store, &sections, &seats, dx, dy);
        self.execute(command)
    }

    /// Aligns the selected sections as one undoable step.
    pub fn align_selection(&mut self, alignment: Alignment) -> bool {
        let sections: Vec<SectionId> = self
            .document
            .selection
            .selected_sections()
            .iter()
            .copied()
            .collect();
        if sections.len() < 2 {
            return false;
        }
        let store = &self.document.store;
        let commands: Vec<Command> = align::alignment_deltas(store, &sections, alignment)
            .into_iter()
            .map(|(id, dx, dy)| Command::translate(store, &[id], &[], dx, dy))
            .collect();
        self.execute_batch(commands, alignment.label())
    }

    /// The section a seat at `world` would be placed in: the single selected
    /// section, or the topmost section under the point.
    pub fn placement_section(&self, world: &Point) -> Option<SectionId> {
        self.document
            .selection
            .selected_section()
            .or_else(|| self.section_at_point(world))
    }

    /// Places one seat at `world` using the current placement settings.
    ///
    /// Points outside the target section are dropped without a command.
    pub fn add_seat(&mut self, world: &Point) -> Option<SeatId> {
        let section_id = self.placement_section(world)?;
        let store = &self.document.store;
        let section = store.section(section_id)?;
        if !section.contains_point(world) {
            tracing::debug!(
                "Seat at ({:.2}, {:.2}) is outside section {}",
                world.x,
                world.y,
                section_id
            );
            return None;
        }

        let row = self.placement.row_label.clone();
        let number = section
            .seats
            .iter()
            .filter(|s| s.row == row)
            .map(|s| s.number + 1)
            .max()
            .unwrap_or(self.placement.start_number);

        let id = self.document.store.generate_id();
        let mut seat = Seat::new(id, section_id, *world, row, number);
        self.placement.apply_to(&mut seat);
        self.execute(Command::add_seat(seat)).then_some(id)
    }
}
