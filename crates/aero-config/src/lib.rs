//! Configuration system for the flight simulator.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, VehicleKind};
pub use config::{
    AircraftTuning, CopilotSettings, DebugConfig, DroneTuning, SimConfig, WorldConfig,
};
pub use error::ConfigError;
