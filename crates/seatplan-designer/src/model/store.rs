use serde::{Deserialize, Serialize};

use super::{Seat, SeatId, Section, SectionId};
use crate::geometry::{self, BoundingBox, Point};
use seatplan_core::{EntityKind, ModelError};

/// In-memory venue model.
///
/// Sections are kept in draw order (later sections are on top). Sections,
/// seats and seat groups share one id space so an id never refers to two
/// entities, and the generator never hands out an id that is in use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueStore {
    sections: Vec<Section>,
    next_id: u64,
}

impl VenueStore {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store from a host-supplied snapshot. The id generator starts
    /// after the largest id found.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut store = Self {
            sections,
            next_id: 1,
        };
        store.next_id = store.max_id() + 1;
        store
    }

    fn max_id(&self) -> u64 {
        self.sections
            .iter()
            .flat_map(|s| {
                std::iter::once(s.id)
                    .chain(s.seats.iter().map(|seat| seat.id))
                    .chain(s.seats.iter().filter_map(|seat| seat.group_id))
            })
            .max()
            .unwrap_or(0)
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in draw order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn contains_section(&self, id: SectionId) -> bool {
        self.section_index(id).is_some()
    }

    /// Inserts a section at `index` (clamped to the end).
    pub fn insert_section(&mut self, index: usize, section: Section) -> Result<(), ModelError> {
        if self.contains_id(section.id) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Section,
                id: section.id,
            });
        }
        if let Some(seat) = section.seats.iter().find(|s| self.contains_id(s.id)) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Seat,
                id: seat.id,
            });
        }
        self.next_id = self.next_id.max(section.id + 1);
        for seat in &section.seats {
            self.next_id = self.next_id.max(seat.id + 1);
        }
        let index = index.min(self.sections.len());
        self.sections.insert(index, section);
        Ok(())
    }

    /// Appends a section on top of the others.
    pub fn push_section(&mut self, section: Section) -> Result<(), ModelError> {
        let end = self.sections.len();
        self.insert_section(end, section)
    }

    /// Removes a section together with its seats, returning its former index.
    pub fn remove_section(&mut self, id: SectionId) -> Result<(usize, Section), ModelError> {
        let index = self
            .section_index(id)
            .ok_or(ModelError::EntityNotFound {
                kind: EntityKind::Section,
                id,
            })?;
        Ok((index, self.sections.remove(index)))
    }

    fn contains_id(&self, id: u64) -> bool {
        self.contains_section(id) || self.contains_seat(id)
    }

    /// `(section index, seat index)` of a seat.
    pub fn seat_location(&self, id: SeatId) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section
                .seats
                .iter()
                .position(|seat| seat.id == id)
                .map(|i| (si, i))
        })
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seat_location(id)
            .map(|(si, i)| &self.sections[si].seats[i])
    }

    pub fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seat_location(id)
            .map(move |(si, i)| &mut self.sections[si].seats[i])
    }

    pub fn contains_seat(&self, id: SeatId) -> bool {
        self.seat_location(id).is_some()
    }

    /// Iterates over every seat in every section.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.sections.iter().flat_map(|s| s.seats.iter())
    }

    pub fn seat_count(&self) -> usize {
        self.sections.iter().map(|s| s.seats.len()).sum()
    }

    /// Inserts a seat into its owning section at `index` (clamped; `None`
    /// appends).
    pub fn insert_seat(&mut self, index: Option<usize>, seat: Seat) -> Result<(), ModelError> {
        if self.contains_id(seat.id) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Seat,
                id: seat.id,
            });
        }
        let section_id = seat.section_id;
        let seat_id = seat.id;
        let section = self
            .section_mut(section_id)
            .ok_or(ModelError::EntityNotFound {
                kind: EntityKind::Section,
                id: section_id,
            })?;
        let index = index.unwrap_or(section.seats.len()).min(section.seats.len());
        section.seats.insert(index, seat);
        self.next_id = self.next_id.max(seat_id + 1);
        Ok(())
    }

    /// Removes a seat, returning its former index within its section.
    pub fn remove_seat(&mut self, id: SeatId) -> Result<(usize, Seat), ModelError> {
        let (si, i) = self
            .seat_location(id)
            .ok_or(ModelError::EntityNotFound {
                kind: EntityKind::Seat,
                id,
            })?;
        Ok((i, self.sections[si].seats.remove(i)))
    }

    /// Topmost section whose outline contains `p`.
    pub fn section_at_point(&self, p: &Point) -> Option<SectionId> {
        self.sections
            .iter()
            .rev()
            .find(|s| s.contains_point(p))
            .map(|s| s.id)
    }

    /// Seat whose center is closest to `p` within `radius`, searching the
    /// topmost sections first.
    pub fn seat_at_point(&self, p: &Point, radius: f64) -> Option<SeatId> {
        let mut best: Option<(f64, SeatId)> = None;
        for section in self.sections.iter().rev() {
            for seat in &section.seats {
                let d = seat.position().distance_to(p);
                if d <= radius && best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, seat.id));
                }
            }
        }
        best.map(|(_, id)| id)
    }

    /// Every section vertex, for vertex snapping.
    pub fn vertices(&self) -> impl Iterator<Item = &Point> {
        self.sections.iter().flat_map(|s| s.points.iter())
    }

    /// Bounds of all sections and seats.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let points: Vec<Point> = self
            .sections
            .iter()
            .flat_map(|s| s.points.iter().copied().chain(s.seats.iter().map(Seat::position)))
            .collect();
        geometry::bounding_box(&points)
    }
}
