//! Venue model: sections, the seats they own, and the store holding them.

mod seat;
mod section;
mod store;

pub use seat::{next_row_label, Seat, SeatAttributes, SeatKind, SeatStatus};
pub use section::{Section, SectionProperties};
pub use store::VenueStore;

/// Identifier of a section.
pub type SectionId = u64;

/// Identifier of a seat.
pub type SeatId = u64;

/// Identifier shared by the seats placed in one row or matrix gesture.
pub type GroupId = u64;
