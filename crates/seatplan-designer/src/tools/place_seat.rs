//! Single-seat placement.

use serde::{Deserialize, Serialize};

use seatplan_settings::SeatSettings;

use crate::input::{PointerButton, ToolEvent};
use crate::model::{Seat, SeatKind, SeatStatus};
use crate::overlay::Cursor;

use super::{Tool, ToolContext, ToolId};

/// Attributes given to newly placed seats.
///
/// Supplied by the host and handed to the seat tools on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPlacement {
    pub row_label: String,
    pub start_number: u32,
    pub status: SeatStatus,
    pub kind: SeatKind,
    pub category_id: Option<String>,
}

impl SeatPlacement {
    pub fn from_settings(settings: &SeatSettings) -> Self {
        Self {
            row_label: settings.row_label.clone(),
            start_number: settings.start_number,
            status: SeatStatus::default(),
            kind: SeatKind::default(),
            category_id: None,
        }
    }

    /// Copies status, kind and category onto `seat`.
    pub fn apply_to(&self, seat: &mut Seat) {
        seat.status = self.status;
        seat.kind = self.kind;
        seat.category_id = self.category_id.clone();
    }
}

impl Default for SeatPlacement {
    fn default() -> Self {
        Self::from_settings(&SeatSettings::default())
    }
}

/// Places one seat per click inside the active section.
///
/// The active section is the single selected section, or else the section
/// under the pointer. Clicks outside it are dropped.
#[derive(Debug, Clone, Default)]
pub struct PlaceSeatTool;

impl Tool for PlaceSeatTool {
    fn id(&self) -> ToolId {
        ToolId::PlaceSeat
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let world = ctx.snap_to_grid(&event.world);
        let inside = ctx
            .placement_section(&world)
            .and_then(|id| ctx.store().section(id))
            .is_some_and(|section| section.contains_point(&world));
        ctx.set_cursor(if inside {
            Cursor::Crosshair
        } else {
            Cursor::NotAllowed
        });
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.is_drag || event.button != Some(PointerButton::Primary) {
            return;
        }
        ctx.mark_handled();
        let world = ctx.snap_to_grid(&event.world);
        if let Some(id) = ctx.add_seat(&world) {
            tracing::debug!("Placed seat {}", id);
        }
    }
}
