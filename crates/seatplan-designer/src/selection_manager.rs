//! Selection Manager
//!
//! Tracks the selected sections and seats. Selection changes are never
//! recorded in history, and ids of deleted entities are pruned after every
//! model mutation.

use std::collections::BTreeSet;

use crate::geometry::{self, BoundingBox};
use crate::model::{SeatId, SectionId, VenueStore};

/// Manages which sections and seats are selected.
///
/// `SelectionManager` is responsible for:
/// - Tracking the selected section ids and seat ids as two sets
/// - Replacing, extending and toggling the selection
/// - Box selection against section outlines and seat centers
/// - Pruning ids whose entity no longer exists
///
/// # Invariant
///
/// After [`prune`](Self::prune) every id in either set refers to an entity in
/// the store. The engine prunes after every model mutation, so a deleted
/// entity is never reported as selected.
///
/// Selection changes are not recorded in the undo history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    sections: BTreeSet<SectionId>,
    seats: BTreeSet<SeatId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatplan_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_sections(&self) -> &BTreeSet<SectionId> {
        &self.sections
    }

    pub fn selected_seats(&self) -> &BTreeSet<SeatId> {
        &self.seats
    }

    /// The single selected section, if exactly one section is selected.
    pub fn selected_section(&self) -> Option<SectionId> {
        if self.sections.len() == 1 {
            self.sections.iter().next().copied()
        } else {
            None
        }
    }

    pub fn is_section_selected(&self, id: SectionId) -> bool {
        self.sections.contains(&id)
    }

    pub fn is_seat_selected(&self, id: SeatId) -> bool {
        self.seats.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.seats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len() + self.seats.len()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.seats.clear();
    }

    /// Selects the given sections. Ids not present in the store are ignored.
    ///
    /// # Arguments
    ///
    /// * `additive` - keep the current selection instead of replacing it
    pub fn select_sections<I>(&mut self, store: &VenueStore, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SectionId>,
    {
        if !additive {
            self.clear();
        }
        self.sections
            .extend(ids.into_iter().filter(|id| store.contains_section(*id)));
    }

    /// Selects the given seats. Ids not present in the store are ignored.
    pub fn select_seats<I>(&mut self, store: &VenueStore, ids: I, additive: bool)
    where
        I: IntoIterator<Item = SeatId>,
    {
        if !additive {
            self.clear();
        }
        self.seats
            .extend(ids.into_iter().filter(|id| store.contains_seat(*id)));
    }

    /// Flips the selection state of one section.
    pub fn toggle_section(&mut self, store: &VenueStore, id: SectionId) {
        if !self.sections.remove(&id) && store.contains_section(id) {
            self.sections.insert(id);
        }
    }

    /// Flips the selection state of one seat.
    pub fn toggle_seat(&mut self, store: &VenueStore, id: SeatId) {
        if !self.seats.remove(&id) && store.contains_seat(id) {
            self.seats.insert(id);
        }
    }

    /// Selects every section. Seats are left alone since they move with
    /// their section.
    pub fn select_all(&mut self, store: &VenueStore) {
        self.seats.clear();
        self.sections = store.sections().iter().map(|s| s.id).collect();
    }

    /// Selects every section whose outline overlaps `bbox` and every seat whose
    /// center lies in it.
    ///
    /// Returns `true` if the selection changed.
    pub fn select_in_box(&mut self, store: &VenueStore, bbox: &BoundingBox, additive: bool) -> bool {
        let before = self.clone();
        if !additive {
            self.clear();
        }
        for section in store.sections() {
            if geometry::polygon_intersects_box(&section.points, bbox) {
                self.sections.insert(section.id);
            }
            for seat in &section.seats {
                if bbox.contains(&seat.position()) {
                    self.seats.insert(seat.id);
                }
            }
        }
        *self != before
    }

    /// Drops every id whose entity is gone from the store.
    ///
    /// Returns `true` if anything was removed.
    pub fn prune(&mut self, store: &VenueStore) -> bool {
        let before = self.len();
        self.sections.retain(|id| store.contains_section(*id));
        self.seats.retain(|id| store.contains_seat(*id));
        self.len() != before
    }

    /// Bounds of everything selected.
    pub fn bounds(&self, store: &VenueStore) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        let mut grow = |bb: BoundingBox| {
            bounds = Some(match bounds {
                Some(b) => b.union(&bb),
                None => bb,
            });
        };
        for id in &self.sections {
            if let Some(bb) = store.section(*id).and_then(|s| s.bounds()) {
                grow(bb);
            }
        }
        for id in &self.seats {
            if let Some(seat) = store.seat(*id) {
                let p = seat.position();
                grow(BoundingBox::new(p.x, p.y, p.x, p.y));
            }
        }
        bounds
    }
}
