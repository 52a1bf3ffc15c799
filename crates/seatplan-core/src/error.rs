//! Error handling for Seatplan
//!
//! Model errors are raised when a command refers to an entity that is missing
//! or already present. The engine never lets these escape an input handler; they
//! are logged and the offending command is dropped.
//!
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Section,
    Seat,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => write!(f, "section"),
            Self::Seat => write!(f, "seat"),
        }
    }
}

/// Venue model error type
///
/// Represents failures while applying a command to the venue model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The referenced entity does not exist
    #[error("{kind} {id} not found")]
    EntityNotFound {
        /// Kind of the missing entity.
        kind: EntityKind,
        /// Id of the missing entity.
        id: u64,
    },

    /// An entity with this id is already present
    #[error("{kind} {id} already exists")]
    DuplicateEntity {
        /// Kind of the duplicated entity.
        kind: EntityKind,
        /// Id of the duplicated entity.
        id: u64,
    },

    /// Geometry that cannot be committed
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Main error type for Seatplan
#[derive(Error, Debug)]
pub enum Error {
    /// Venue model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed a document but none is loaded
    #[error("No document loaded")]
    NoDocument,

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Shorthand for a missing entity.
    pub fn not_found(kind: EntityKind, id: u64) -> Self {
        Error::Model(ModelError::EntityNotFound { kind, id })
    }

    /// Check if this is a model error
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::Model(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
