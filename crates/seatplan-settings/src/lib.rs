//! Seatplan Settings Crate
//!
//! Holds every tunable of the interaction engine and handles loading and
//! saving it as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    DrawingSettings, EditorConfig, GestureSettings, HistorySettings, SeatSettings,
    SnapSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
