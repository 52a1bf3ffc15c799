//! # Seatplan Designer
//!
//! The interaction engine behind a venue seating layout editor. It turns raw
//! pointer, wheel and keyboard input into edits of a venue model made of
//! polygonal sections and the seats they contain, with full undo and redo.
//!
//! ## Core Components
//!
//! - **Geometry**: points, bounding boxes, point-in-polygon and
//!   polygon/box intersection
//! - **Viewport**: pan and zoom mapping between screen and world space
//! - **Model**: sections, seats and the [`VenueStore`] holding them
//! - **Selection**: the set of selected sections and seats
//! - **Commands/History**: reversible edits on a bounded undo stack
//! - **Tools**: one gesture state machine per editing mode
//! - **Engine**: the dispatcher that routes host events to the active tool
//!
//! ## Architecture
//!
//! ```text
//! Engine (event dispatch)
//!   ├── Viewport (screen <-> world)
//!   ├── ToolState (active tool, gesture state)
//!   └── Document
//!         ├── VenueStore (sections and seats)
//!         ├── SelectionManager
//!         └── HistoryManager (Command stack)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seatplan_designer::{Engine, HostEvent, ToolId, VenueStore};
//!
//! let mut engine = Engine::new(Default::default())?;
//! engine.load_document(VenueStore::new());
//! engine.set_tool(ToolId::DrawSectionBox);
//!
//! engine.handle_event(HostEvent::down(100.0, 100.0));
//! engine.handle_event(HostEvent::moved(300.0, 250.0));
//! let response = engine.handle_event(HostEvent::up(300.0, 250.0));
//! assert!(response.model_changed);
//! ```

pub mod align;
pub mod commands;
pub mod document;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod model;
pub mod overlay;
pub mod selection_manager;
pub mod tools;
pub mod viewport;

pub use align::Alignment;
pub use commands::{Command, CommandOp, EntitySnapshot};
pub use document::Document;
pub use engine::Engine;
pub use geometry::{BoundingBox, Point};
pub use history::{HistoryEntry, HistoryManager};
pub use input::{HostEvent, Key, Modifiers, PointerButton, ToolEvent, ToolEventKind};
pub use model::{GroupId, Seat, SeatId, SeatKind, SeatStatus, Section, SectionId, VenueStore};
pub use overlay::{Cursor, EngineNotification, EventResponse, Overlay};
pub use selection_manager::SelectionManager;
pub use tools::{SeatPlacement, Tool, ToolId, ToolState};
pub use viewport::{Viewport, ViewportState};
