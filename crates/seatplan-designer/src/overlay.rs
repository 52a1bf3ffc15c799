//! Presentation output of the engine.
//!
//! The engine never draws. After each event it describes what the host should
//! render as live feedback ([`Overlay`]), which cursor to show ([`Cursor`]),
//! and any notifications raised while handling the event.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};
use crate::model::SectionId;

/// Mouse cursor requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Crosshair,
    Move,
    Grab,
    Grabbing,
    Rotate,
    NotAllowed,
}

impl Cursor {
    /// CSS `cursor` property value.
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            // CSS has no rotate cursor; alias is the usual stand-in.
            Cursor::Rotate => "alias",
            Cursor::NotAllowed => "not-allowed",
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css())
    }
}

/// Live preview the host should draw on top of the model, in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    /// Polygon being drawn, with the rubber-band segment to the pointer.
    SectionPreview {
        points: Vec<Point>,
        cursor: Point,
        /// The pointer is within closing distance of the first vertex.
        can_close: bool,
    },
    /// Rectangle being dragged out in box mode.
    BoxPreview { bounds: BoundingBox },
    /// Rubber-band selection rectangle.
    SelectionBox { bounds: BoundingBox },
    /// Bounds of the selection with its rotation handle.
    SelectionHandles { bounds: BoundingBox, rotate_handle: Point },
    /// Rotation in progress around `pivot`.
    Rotation {
        pivot: Point,
        degrees: f64,
        bounds: BoundingBox,
    },
    /// Seat positions a row gesture will create, with the section they land in.
    SeatPreview {
        section_id: Option<SectionId>,
        seats: Vec<Point>,
        rows: usize,
    },
}

/// Fire-and-forget notifications raised toward the host. They never enter
/// the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineNotification {
    /// A polygon was closed by clicking near its first vertex.
    PolygonAutoClosed { section_id: SectionId },
    /// The vertex cap was reached and the polygon completed on its own.
    MaxVerticesReached { section_id: SectionId },
}

/// What happened while handling one host event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventResponse {
    /// The event was consumed by the engine.
    pub handled: bool,
    pub cursor: Cursor,
    /// Preview to draw, `None` to clear it.
    pub overlay: Option<Overlay>,
    pub notifications: Vec<EngineNotification>,
    /// The venue model changed (committed or provisional).
    pub model_changed: bool,
    pub selection_changed: bool,
}

impl EventResponse {
    /// A response for an event the engine ignored.
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// Records the changes of `other` into `self`.
    pub fn merge(&mut self, other: EventResponse) {
        self.handled |= other.handled;
        self.model_changed |= other.model_changed;
        self.selection_changed |= other.selection_changed;
        self.notifications.extend(other.notifications);
    }
}
