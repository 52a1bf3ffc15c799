//! Two-phase row and matrix seat placement.
//!
//! Phase 1 drags out the first row: the seat count is the drag length divided
//! by the seat pitch, rounded. On release the row is inserted into the model
//! provisionally. Phase 2 drags perpendicular to that row and replicates it
//! once per row pitch of offset. Releasing commits every seat as one batch;
//! Escape in phase 2 deletes the provisional row and returns to phase 1.

use crate::commands::Command;
use crate::geometry::Point;
use crate::input::{Key, PointerButton, ToolEvent};
use crate::model::{next_row_label, GroupId, Seat, SeatId, SectionId};
use crate::overlay::{Cursor, Overlay};

use super::{Tool, ToolContext, ToolId};

/// Seat centers along `start -> end`, one per `pitch`, the count being
/// `round(length / pitch)`.
pub fn row_positions(start: Point, end: Point, pitch: f64) -> Vec<Point> {
    let length = start.distance_to(&end);
    if !(pitch > 0.0) || !(length > 0.0) {
        return Vec::new();
    }
    let count = (length / pitch).round() as usize;
    let (ux, uy) = ((end.x - start.x) / length, (end.y - start.y) / length);
    (0..count)
        .map(|i| {
            let d = pitch * i as f64;
            Point::new(start.x + ux * d, start.y + uy * d)
        })
        .collect()
}

/// The first row, inserted into the model but not yet recorded in history.
#[derive(Debug, Clone, PartialEq)]
struct ProvisionalRow {
    section_id: SectionId,
    group_id: GroupId,
    /// Unit normal of the row direction.
    normal: Point,
    /// Seat positions by column, `None` where the column fell outside the section.
    columns: Vec<Option<Point>>,
    seats: Vec<Seat>,
}

impl ProvisionalRow {
    /// Offset of replica row `k` (1-based) along the normal.
    fn replica(&self, k: usize, sign: f64, pitch_y: f64) -> Vec<(usize, Point)> {
        let d = sign * pitch_y * k as f64;
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (i, p.translated(self.normal.x * d, self.normal.y * d))))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum RowPhase {
    #[default]
    Idle,
    /// Phase 1: dragging out the first row.
    Drawing {
        section_id: SectionId,
        start: Point,
        end: Point,
    },
    /// Phase 2: first row placed, waiting for the replication drag.
    Placed(ProvisionalRow),
    /// Phase 2: replication drag in progress.
    Replicating { row: ProvisionalRow, offset: f64 },
}

/// Places rows of seats, and matrices of rows, in two drags.
#[derive(Debug, Clone, Default)]
pub struct SeatRowsTool {
    phase: RowPhase,
}

impl SeatRowsTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the first row has been placed.
    pub fn in_second_phase(&self) -> bool {
        matches!(self.phase, RowPhase::Placed(_) | RowPhase::Replicating { .. })
    }

    /// Ids of the provisional first row.
    pub fn provisional_seats(&self) -> Vec<SeatId> {
        match &self.phase {
            RowPhase::Placed(row) | RowPhase::Replicating { row, .. } => {
                row.seats.iter().map(|s| s.id).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Positions of the first row that land inside the section, by column.
    fn inside_columns(ctx: &ToolContext<'_>, section_id: SectionId, start: Point, end: Point) -> Vec<Option<Point>> {
        let Some(section) = ctx.store().section(section_id) else {
            return Vec::new();
        };
        row_positions(start, end, ctx.config().seats.pitch_x())
            .into_iter()
            .map(|p| section.contains_point(&p).then_some(p))
            .collect()
    }

    fn place_first_row(ctx: &mut ToolContext<'_>, section_id: SectionId, start: Point, end: Point) -> Option<ProvisionalRow> {
        let columns = Self::inside_columns(ctx, section_id, start, end);
        if columns.iter().all(Option::is_none) {
            tracing::debug!("Seat rows: no seat of the row lands inside section {}", section_id);
            return None;
        }

        let length = start.distance_to(&end);
        let normal = Point::new(-(end.y - start.y) / length, (end.x - start.x) / length);
        let placement = ctx.placement().clone();
        let group_id = ctx.store_mut().generate_id();

        let mut seats = Vec::new();
        for (i, p) in columns.iter().enumerate() {
            let Some(p) = p else { continue };
            let id = ctx.store_mut().generate_id();
            let mut seat = Seat::new(id, section_id, *p, placement.row_label.clone(), placement.start_number + i as u32);
            seat.group_id = Some(group_id);
            placement.apply_to(&mut seat);
            match ctx.store_mut().insert_seat(None, seat.clone()) {
                Ok(()) => seats.push(seat),
                Err(err) => tracing::warn!("Could not insert provisional seat: {}", err),
            }
        }
        tracing::debug!("Seat rows: provisional row of {} seats", seats.len());

        Some(ProvisionalRow {
            section_id,
            group_id,
            normal,
            columns,
            seats,
        })
    }

    fn remove_provisional(ctx: &mut ToolContext<'_>, row: &ProvisionalRow) {
        for seat in &row.seats {
            if let Err(err) = ctx.store_mut().remove_seat(seat.id) {
                tracing::warn!("Could not remove provisional seat {}: {}", seat.id, err);
            }
        }
        ctx.prune_selection();
    }

    fn replica_count(ctx: &ToolContext<'_>, offset: f64) -> usize {
        let pitch_y = ctx.config().seats.pitch_y();
        if !(pitch_y > 0.0) {
            return 0;
        }
        (offset.abs() / pitch_y).round() as usize
    }

    /// Replaces the provisional row with one batch adding it and `offset`
    /// worth of replica rows.
    fn commit(ctx: &mut ToolContext<'_>, row: ProvisionalRow, offset: f64) -> bool {
        Self::remove_provisional(ctx, &row);

        let replicas = Self::replica_count(ctx, offset);
        let sign = if offset < 0.0 { -1.0 } else { 1.0 };
        let pitch_y = ctx.config().seats.pitch_y();
        let placement = ctx.placement().clone();

        let mut ids: Vec<SeatId> = row.seats.iter().map(|s| s.id).collect();
        let mut commands: Vec<Command> = row.seats.iter().cloned().map(Command::add_seat).collect();
        let mut label = placement.row_label.clone();
        for k in 1..=replicas {
            label = next_row_label(&label);
            for (i, p) in row.replica(k, sign, pitch_y) {
                let inside = ctx
                    .store()
                    .section(row.section_id)
                    .is_some_and(|s| s.contains_point(&p));
                if !inside {
                    continue;
                }
                let id = ctx.store_mut().generate_id();
                let mut seat = Seat::new(id, row.section_id, p, label.clone(), placement.start_number + i as u32);
                seat.group_id = Some(row.group_id);
                placement.apply_to(&mut seat);
                ids.push(id);
                commands.push(Command::add_seat(seat));
            }
        }

        let count = commands.len();
        if count == 0 {
            return false;
        }
        let committed = ctx.execute_batch(commands, format!("Place {count} seats"));
        if committed {
            tracing::debug!("Seat rows: committed {} seats in {} rows", count, replicas + 1);
            ctx.select_seats(ids, false);
        }
        committed
    }

    fn preview(ctx: &mut ToolContext<'_>, section_id: SectionId, seats: Vec<Point>, rows: usize) {
        ctx.set_overlay(Some(Overlay::SeatPreview {
            section_id: Some(section_id),
            seats,
            rows,
        }));
    }
}

impl Tool for SeatRowsTool {
    fn id(&self) -> ToolId {
        ToolId::PlaceSeatRows
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.button != Some(PointerButton::Primary) {
            return;
        }
        match std::mem::take(&mut self.phase) {
            RowPhase::Idle => {
                let start = ctx.snap_to_grid(&event.world);
                let section_id = ctx.placement_section(&start).filter(|id| {
                    ctx.store()
                        .section(*id)
                        .is_some_and(|s| s.contains_point(&start))
                });
                if let Some(section_id) = section_id {
                    self.phase = RowPhase::Drawing {
                        section_id,
                        start,
                        end: start,
                    };
                    ctx.mark_handled();
                } else {
                    tracing::debug!("Seat rows: press outside any section");
                }
            }
            RowPhase::Placed(row) => {
                self.phase = RowPhase::Replicating { row, offset: 0.0 };
                ctx.mark_handled();
            }
            other => self.phase = other,
        }
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if !event.is_drag {
            return;
        }
        match &mut self.phase {
            RowPhase::Drawing {
                section_id,
                start,
                end,
            } => {
                *end = ctx.snap_to_grid(&event.world);
                let (section_id, start, end) = (*section_id, *start, *end);
                let seats = Self::inside_columns(ctx, section_id, start, end)
                    .into_iter()
                    .flatten()
                    .collect();
                Self::preview(ctx, section_id, seats, 1);
                ctx.mark_handled();
            }
            RowPhase::Replicating { row, offset } => {
                let origin = event.press_world.unwrap_or(event.world);
                *offset = (event.world.x - origin.x) * row.normal.x + (event.world.y - origin.y) * row.normal.y;
                let replicas = Self::replica_count(ctx, *offset);
                let sign = if *offset < 0.0 { -1.0 } else { 1.0 };
                let pitch_y = ctx.config().seats.pitch_y();
                let section = ctx.store().section(row.section_id);
                let seats: Vec<Point> = (1..=replicas)
                    .flat_map(|k| row.replica(k, sign, pitch_y))
                    .map(|(_, p)| p)
                    .filter(|p| section.is_some_and(|s| s.contains_point(p)))
                    .collect();
                let section_id = row.section_id;
                Self::preview(ctx, section_id, seats, replicas + 1);
                ctx.mark_handled();
            }
            _ => {}
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        match std::mem::take(&mut self.phase) {
            RowPhase::Drawing {
                section_id, start, ..
            } => {
                ctx.set_overlay(None);
                ctx.mark_handled();
                if !event.is_drag {
                    return;
                }
                let end = ctx.snap_to_grid(&event.world);
                if let Some(row) = Self::place_first_row(ctx, section_id, start, end) {
                    self.phase = RowPhase::Placed(row);
                }
            }
            RowPhase::Replicating { row, offset } => {
                ctx.set_overlay(None);
                ctx.mark_handled();
                let offset = if event.is_drag { offset } else { 0.0 };
                Self::commit(ctx, row, offset);
            }
            other => self.phase = other,
        }
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        match event.key {
            Some(Key::Escape) => {
                if self.cancel(ctx) {
                    ctx.mark_handled();
                }
            }
            Some(Key::Enter) => {
                if let RowPhase::Placed(row) = std::mem::take(&mut self.phase) {
                    Self::commit(ctx, row, 0.0);
                    ctx.mark_handled();
                }
            }
            _ => {}
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        ctx.set_overlay(None);
        match std::mem::take(&mut self.phase) {
            RowPhase::Idle => false,
            RowPhase::Drawing { .. } => true,
            RowPhase::Placed(row) | RowPhase::Replicating { row, .. } => {
                tracing::debug!("Seat rows: discarded provisional row of {} seats", row.seats.len());
                Self::remove_provisional(ctx, &row);
                true
            }
        }
    }

    fn is_busy(&self) -> bool {
        !matches!(self.phase, RowPhase::Idle)
    }
}
