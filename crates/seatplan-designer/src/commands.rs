//! Reversible operations on the venue model.
//!
//! Commands are plain data: an opcode plus the operands needed to apply and
//! revert it. Nothing here refers to tool or UI state, so a command can be
//! undone and redone any number of times with identical results.
//!
//! Geometric edits (`Translate`, `Rotate`) keep a snapshot of the original
//! geometry. Executing writes `f(snapshot)`, undoing writes the snapshot back,
//! so undo is exact and redo reproduces the first execution bit for bit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;
use crate::model::{
    Seat, SeatAttributes, SeatId, Section, SectionId, SectionProperties, VenueStore,
};
use seatplan_core::{EntityKind, Error, Result};

/// Position and angle of a seat at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPose {
    pub id: SeatId,
    pub position: Point,
    pub angle: f64,
}

impl SeatPose {
    fn capture(seat: &Seat) -> Self {
        Self {
            id: seat.id,
            position: seat.position(),
            angle: seat.angle,
        }
    }
}

/// Geometry of one transformed entity at capture time. A section snapshot
/// carries its seats because they move with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntitySnapshot {
    Section {
        id: SectionId,
        points: Vec<Point>,
        seats: Vec<SeatPose>,
    },
    Seat(SeatPose),
}

impl EntitySnapshot {
    /// Captures the current geometry of the given sections and seats. Seats
    /// whose section is also captured are skipped; missing ids are ignored.
    pub fn capture_all(store: &VenueStore, sections: &[SectionId], seats: &[SeatId]) -> Vec<Self> {
        let mut out = Vec::with_capacity(sections.len() + seats.len());
        for id in sections {
            if let Some(section) = store.section(*id) {
                out.push(EntitySnapshot::Section {
                    id: section.id,
                    points: section.points.clone(),
                    seats: section.seats.iter().map(SeatPose::capture).collect(),
                });
            }
        }
        for id in seats {
            if let Some(seat) = store.seat(*id) {
                if !sections.contains(&seat.section_id) {
                    out.push(EntitySnapshot::Seat(SeatPose::capture(seat)));
                }
            }
        }
        out
    }

    /// Writes this snapshot, with every point mapped through `map_point` and
    /// every seat angle shifted by `angle_delta`, back into the store.
    pub fn write<F>(&self, store: &mut VenueStore, map_point: F, angle_delta: f64) -> Result<()>
    where
        F: Fn(&Point) -> Point,
    {
        match self {
            EntitySnapshot::Section { id, points, seats } => {
                let section = store
                    .section_mut(*id)
                    .ok_or_else(|| Error::not_found(EntityKind::Section, *id))?;
                section.points = points.iter().map(&map_point).collect();
                for pose in seats {
                    if let Some(seat) = section.seats.iter_mut().find(|s| s.id == pose.id) {
                        seat.set_position(map_point(&pose.position));
                        seat.angle = pose.angle + angle_delta;
                    }
                }
                Ok(())
            }
            EntitySnapshot::Seat(pose) => {
                let seat = store
                    .seat_mut(pose.id)
                    .ok_or_else(|| Error::not_found(EntityKind::Seat, pose.id))?;
                seat.set_position(map_point(&pose.position));
                seat.angle = pose.angle + angle_delta;
                Ok(())
            }
        }
    }

    /// Restores the captured geometry unchanged.
    pub fn restore(&self, store: &mut VenueStore) -> Result<()> {
        self.write(store, |p| *p, 0.0)
    }

    /// Fails if the captured entity is no longer in the store.
    pub fn ensure_present(&self, store: &VenueStore) -> Result<()> {
        match self {
            EntitySnapshot::Section { id, .. } if !store.contains_section(*id) => {
                Err(Error::not_found(EntityKind::Section, *id))
            }
            EntitySnapshot::Seat(pose) if !store.contains_seat(pose.id) => {
                Err(Error::not_found(EntityKind::Seat, pose.id))
            }
            _ => Ok(()),
        }
    }
}

fn ensure_all_present(origin: &[EntitySnapshot], store: &VenueStore) -> Result<()> {
    origin.iter().try_for_each(|snapshot| snapshot.ensure_present(store))
}

fn ensure_seats_present(changes: &[SeatChange], store: &VenueStore) -> Result<()> {
    match changes.iter().find(|c| !store.contains_seat(c.seat_id)) {
        Some(missing) => Err(Error::not_found(EntityKind::Seat, missing.seat_id)),
        None => Ok(()),
    }
}

/// Before/after attributes of one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatChange {
    pub seat_id: SeatId,
    pub before: SeatAttributes,
    pub after: SeatAttributes,
}

/// The operation a command performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::large_enum_variant)]
pub enum CommandOp {
    AddSection {
        section: Section,
    },
    DeleteSection {
        section_id: SectionId,
        /// Index and contents, held while the section is deleted.
        removed: Option<(usize, Section)>,
    },
    AddSeat {
        seat: Seat,
    },
    RemoveSeat {
        seat_id: SeatId,
        /// Index and contents, held while the seat is removed.
        removed: Option<(usize, Seat)>,
    },
    Translate {
        origin: Vec<EntitySnapshot>,
        dx: f64,
        dy: f64,
    },
    Rotate {
        origin: Vec<EntitySnapshot>,
        pivot: Point,
        degrees: f64,
    },
    UpdateSection {
        section_id: SectionId,
        before: SectionProperties,
        after: SectionProperties,
    },
    UpdateSeats {
        changes: Vec<SeatChange>,
    },
    /// Sub-commands executed in order and undone in reverse.
    Batch {
        commands: Vec<Command>,
    },
}

/// A reversible operation recorded in the undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: Uuid,
    pub description: String,
    pub op: CommandOp,
}

impl Command {
    pub fn new(description: impl Into<String>, op: CommandOp) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            op,
        }
    }

    pub fn add_section(section: Section) -> Self {
        let description = format!("Add section {}", section.name);
        Self::new(description, CommandOp::AddSection { section })
    }

    pub fn delete_section(section_id: SectionId) -> Self {
        Self::new(
            "Delete section",
            CommandOp::DeleteSection {
                section_id,
                removed: None,
            },
        )
    }

    pub fn add_seat(seat: Seat) -> Self {
        let description = format!("Add seat {}", seat.label());
        Self::new(description, CommandOp::AddSeat { seat })
    }

    pub fn remove_seat(seat_id: SeatId) -> Self {
        Self::new(
            "Remove seat",
            CommandOp::RemoveSeat {
                seat_id,
                removed: None,
            },
        )
    }

    /// Moves the given entities by `(dx, dy)`, capturing their current
    /// geometry as the undo state.
    pub fn translate(store: &VenueStore, sections: &[SectionId], seats: &[SeatId], dx: f64, dy: f64) -> Self {
        Self::translate_from(EntitySnapshot::capture_all(store, sections, seats), dx, dy)
    }

    /// Moves entities from previously captured geometry.
    pub fn translate_from(origin: Vec<EntitySnapshot>, dx: f64, dy: f64) -> Self {
        Self::new("Move", CommandOp::Translate { origin, dx, dy })
    }

    /// Rotates the given entities around `pivot`.
    pub fn rotate(store: &VenueStore, sections: &[SectionId], seats: &[SeatId], pivot: Point, degrees: f64) -> Self {
        Self::rotate_from(EntitySnapshot::capture_all(store, sections, seats), pivot, degrees)
    }

    /// Rotates entities from previously captured geometry.
    pub fn rotate_from(origin: Vec<EntitySnapshot>, pivot: Point, degrees: f64) -> Self {
        Self::new(
            "Rotate",
            CommandOp::Rotate {
                origin,
                pivot,
                degrees,
            },
        )
    }

    /// Changes name, color and opacity of a section. `None` if the section
    /// does not exist or nothing would change.
    pub fn update_section(store: &VenueStore, section_id: SectionId, after: SectionProperties) -> Option<Self> {
        let before = store.section(section_id)?.properties();
        if before == after {
            return None;
        }
        Some(Self::new(
            "Edit section",
            CommandOp::UpdateSection {
                section_id,
                before,
                after,
            },
        ))
    }

    /// Changes the attributes of several seats at once. `None` if no seat
    /// would change.
    pub fn update_seats<F>(store: &VenueStore, seat_ids: &[SeatId], edit: F) -> Option<Self>
    where
        F: Fn(&mut SeatAttributes),
    {
        let changes: Vec<SeatChange> = seat_ids
            .iter()
            .filter_map(|id| store.seat(*id))
            .filter_map(|seat| {
                let before = seat.attributes();
                let mut after = before.clone();
                edit(&mut after);
                (after != before).then_some(SeatChange {
                    seat_id: seat.id,
                    before,
                    after,
                })
            })
            .collect();
        if changes.is_empty() {
            return None;
        }
        Some(Self::new("Edit seats", CommandOp::UpdateSeats { changes }))
    }

    /// Groups several commands into one history entry.
    pub fn batch(label: impl Into<String>, commands: Vec<Command>) -> Self {
        Self::new(label, CommandOp::Batch { commands })
    }

    /// Returns the name of the command for display.
    pub fn name(&self) -> &str {
        &self.description
    }

    /// Number of leaf operations this command performs.
    pub fn operation_count(&self) -> usize {
        match &self.op {
            CommandOp::Batch { commands } => commands.iter().map(Command::operation_count).sum(),
            _ => 1,
        }
    }

    /// Applies the command to the store.
    ///
    /// A batch either applies completely or, if a sub-command fails, rolls back
    /// the sub-commands it already applied before returning the error.
    pub fn execute(&mut self, store: &mut VenueStore) -> Result<()> {
        match &mut self.op {
            CommandOp::AddSection { section } => {
                store.push_section(section.clone())?;
            }
            CommandOp::DeleteSection {
                section_id,
                removed,
            } => {
                *removed = Some(store.remove_section(*section_id)?);
            }
            CommandOp::AddSeat { seat } => {
                store.insert_seat(None, seat.clone())?;
            }
            CommandOp::RemoveSeat { seat_id, removed } => {
                *removed = Some(store.remove_seat(*seat_id)?);
            }
            CommandOp::Translate { origin, dx, dy } => {
                ensure_all_present(origin, store)?;
                let (dx, dy) = (*dx, *dy);
                for snapshot in origin.iter() {
                    snapshot.write(store, |p| p.translated(dx, dy), 0.0)?;
                }
            }
            CommandOp::Rotate {
                origin,
                pivot,
                degrees,
            } => {
                ensure_all_present(origin, store)?;
                let (pivot, degrees) = (*pivot, *degrees);
                for snapshot in origin.iter() {
                    snapshot.write(store, |p| p.rotated_about(&pivot, degrees), degrees)?;
                }
            }
            CommandOp::UpdateSection {
                section_id, after, ..
            } => {
                store
                    .section_mut(*section_id)
                    .ok_or_else(|| Error::not_found(EntityKind::Section, *section_id))?
                    .apply_properties(after);
            }
            CommandOp::UpdateSeats { changes } => {
                ensure_seats_present(changes, store)?;
                for change in changes.iter() {
                    store
                        .seat_mut(change.seat_id)
                        .ok_or_else(|| Error::not_found(EntityKind::Seat, change.seat_id))?
                        .apply_attributes(&change.after);
                }
            }
            CommandOp::Batch { commands } => {
                for i in 0..commands.len() {
                    if let Err(err) = commands[i].execute(store) {
                        for done in commands[..i].iter_mut().rev() {
                            if let Err(rollback) = done.undo(store) {
                                tracing::warn!("Rollback of '{}' failed: {}", done.name(), rollback);
                            }
                        }
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }

    /// Reverts the command.
    pub fn undo(&mut self, store: &mut VenueStore) -> Result<()> {
        match &mut self.op {
            CommandOp::AddSection { section } => {
                store.remove_section(section.id)?;
            }
            CommandOp::DeleteSection {
                section_id,
                removed,
            } => {
                let (index, section) = removed
                    .take()
                    .ok_or_else(|| Error::not_found(EntityKind::Section, *section_id))?;
                store.insert_section(index, section)?;
            }
            CommandOp::AddSeat { seat } => {
                store.remove_seat(seat.id)?;
            }
            CommandOp::RemoveSeat { seat_id, removed } => {
                let (index, seat) = removed
                    .take()
                    .ok_or_else(|| Error::not_found(EntityKind::Seat, *seat_id))?;
                store.insert_seat(Some(index), seat)?;
            }
            CommandOp::Translate { origin, .. } | CommandOp::Rotate { origin, .. } => {
                ensure_all_present(origin, store)?;
                for snapshot in origin.iter() {
                    snapshot.restore(store)?;
                }
            }
            CommandOp::UpdateSection {
                section_id, before, ..
            } => {
                store
                    .section_mut(*section_id)
                    .ok_or_else(|| Error::not_found(EntityKind::Section, *section_id))?
                    .apply_properties(before);
            }
            CommandOp::UpdateSeats { changes } => {
                ensure_seats_present(changes, store)?;
                for change in changes.iter() {
                    store
                        .seat_mut(change.seat_id)
                        .ok_or_else(|| Error::not_found(EntityKind::Seat, change.seat_id))?
                        .apply_attributes(&change.before);
                }
            }
            CommandOp::Batch { commands } => {
                let n = commands.len();
                for i in (0..n).rev() {
                    if let Err(err) = commands[i].undo(store) {
                        for done in commands[i + 1..].iter_mut() {
                            if let Err(rollback) = done.execute(store) {
                                tracing::warn!("Rollback of '{}' failed: {}", done.name(), rollback);
                            }
                        }
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }
}
