//! Command-line argument parsing for the flight simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::SimConfig;

/// Which vehicle to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VehicleKind {
    Aircraft,
    Drone,
}

/// Flight simulator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "aerosphere", about = "Spherical-world flight simulator")]
pub struct CliArgs {
    /// Vehicle to spawn.
    #[arg(long, value_enum, default_value = "aircraft")]
    pub vehicle: VehicleKind,

    /// Spawn latitude in degrees.
    #[arg(long)]
    pub latitude: Option<f64>,

    /// Spawn longitude in degrees.
    #[arg(long)]
    pub longitude: Option<f64>,

    /// World sphere radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Copilot control endpoint URL.
    #[arg(long)]
    pub copilot_endpoint: Option<String>,

    /// Enable or disable the copilot link.
    #[arg(long)]
    pub copilot: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SimConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(lat) = args.latitude {
            self.world.departure_latitude = lat;
        }
        if let Some(long) = args.longitude {
            self.world.departure_longitude = long;
        }
        if let Some(radius) = args.radius {
            self.world.radius = radius;
        }
        if let Some(ref endpoint) = args.copilot_endpoint {
            self.copilot.endpoint = endpoint.clone();
        }
        if let Some(enabled) = args.copilot {
            self.copilot.enabled = enabled;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            vehicle: VehicleKind::Aircraft,
            latitude: None,
            longitude: None,
            radius: None,
            copilot_endpoint: None,
            copilot: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = SimConfig::default();
        let args = CliArgs {
            latitude: Some(37.6),
            copilot: Some(false),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.departure_latitude, 37.6);
        assert!(!config.copilot.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.departure_longitude, -45.0);
        assert_eq!(config.world.radius, 50.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = SimConfig::default();
        let mut config = SimConfig::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }
}
