//! # Seatplan Core
//!
//! Core constants and error types shared by the Seatplan crates.
//! The settings crate takes its defaults from [`constants`], and the
//! designer engine reports model failures through [`Error`].

pub mod constants;
pub mod error;

pub use error::{EntityKind, Error, ModelError, Result};
