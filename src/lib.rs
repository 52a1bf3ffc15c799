//! # Seatplan
//!
//! Interaction engine for venue seating layout editors. Hosts feed it raw
//! pointer, wheel and keyboard events; it edits a model of polygonal
//! sections and their seats and describes the live feedback to draw.
//!
//! ## Architecture
//!
//! Seatplan is organized as a workspace with multiple crates:
//!
//! 1. **seatplan-core** - Shared constants and the error type
//! 2. **seatplan-settings** - `EditorConfig`, loaded from JSON or TOML
//! 3. **seatplan-designer** - Geometry, viewport, model, selection, commands,
//!    history, tools and the `Engine` dispatcher
//! 4. **seatplan** - This crate: re-exports and logging setup

pub use seatplan_designer as designer;
pub use seatplan_settings as settings;

pub use seatplan_core::{EntityKind, Error, ModelError, Result};

pub use seatplan_settings::{EditorConfig, SettingsError};

pub use seatplan_designer::{
    Alignment, BoundingBox, Command, Cursor, Engine, EngineNotification, EventResponse,
    HistoryManager, HostEvent, Key, Modifiers, Overlay, Point, PointerButton, Seat,
    SeatPlacement, Section, SelectionManager, ToolId, VenueStore, Viewport,
};

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` when unset
///
/// Returns an error instead of panicking if a global subscriber is already
/// installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!("Logging initialized");
    Ok(())
}
