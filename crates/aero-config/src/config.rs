//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// World settings.
    pub world: WorldConfig,
    /// Aircraft tuning.
    pub aircraft: AircraftTuning,
    /// Drone tuning.
    pub drone: DroneTuning,
    /// Copilot service settings.
    pub copilot: CopilotSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Sphere radius in world units.
    pub radius: f64,
    /// Spawn latitude in degrees.
    pub departure_latitude: f64,
    /// Spawn longitude in degrees.
    pub departure_longitude: f64,
    /// Optional elevation sample file (JSON).
    pub elevation_data: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            departure_latitude: 0.0,
            departure_longitude: -45.0,
            elevation_data: None,
        }
    }
}

/// Aircraft physics and takeoff tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AircraftTuning {
    /// Multiplicative angular damping per tick.
    pub angular_damping: f64,
    /// Gravity magnitude toward the world center.
    pub gravity: f64,
    /// Lift coefficient.
    pub lift_coefficient: f64,
    /// Drag coefficient.
    pub drag_coefficient: f64,
    /// Thrust force at full throttle.
    pub thrust_force: f64,
    /// Vehicle mass.
    pub mass: f64,
    /// Forward speed the takeoff roll must reach before rotating.
    pub takeoff_speed: f64,
    /// Climb pitch target set once takeoff speed is reached, radians.
    pub climb_angle: f64,
    /// Altitude at which the takeoff sequence hands over to manual control.
    pub takeoff_altitude: f64,
    /// Initial altitude target above the surface.
    pub initial_target_altitude: f64,
    /// Initial suggested throttle.
    pub initial_throttle: f64,
}

impl Default for AircraftTuning {
    fn default() -> Self {
        Self {
            angular_damping: 0.95,
            gravity: 0.01,
            lift_coefficient: 0.04,
            drag_coefficient: 0.00015,
            thrust_force: 0.1,
            mass: 1.0,
            takeoff_speed: 20.0,
            climb_angle: 0.15,
            takeoff_altitude: 100.0,
            initial_target_altitude: 50.0,
            initial_throttle: 0.7,
        }
    }
}

/// Drone movement tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DroneTuning {
    /// Displacement per tick for an active movement flag.
    pub move_speed: f64,
    /// Displacement per tick with boost held.
    pub boost_speed: f64,
    /// Yaw rotation per tick, radians.
    pub yaw_rate: f64,
    /// Target lean angle while translating, radians.
    pub tilt_amount: f64,
    /// Exponential smoothing factor for the visual tilt.
    pub tilt_smoothing: f64,
    /// Minimum clearance above the surface radius.
    pub clearance: f64,
    /// Altitude at which takeoff is considered complete.
    pub takeoff_altitude: f64,
}

impl Default for DroneTuning {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            boost_speed: 0.2,
            yaw_rate: 0.05,
            tilt_amount: 0.2,
            tilt_smoothing: 0.1,
            clearance: 0.5,
            takeoff_altitude: 5.0,
        }
    }
}

/// Copilot service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CopilotSettings {
    /// Whether the copilot link is started at all.
    pub enabled: bool,
    /// Full URL of the control endpoint.
    pub endpoint: String,
    /// Seconds between flight reports.
    pub interval_secs: u64,
}

impl Default for CopilotSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:3000/api/ai-control".to_string(),
            interval_secs: 5,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Seconds between periodic flight status log lines (0 = off).
    pub status_interval_secs: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            status_interval_secs: 1,
        }
    }
}

// --- Load / Save / Reload ---

impl SimConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: SimConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            tracing::info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = SimConfig::default();
            config.save(config_dir)?;
            tracing::info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: SimConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            tracing::info!("config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = SimConfig::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("radius: 50.0"));
        assert!(ron_str.contains("interval_secs: 5"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = SimConfig::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: SimConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        // Config missing the `copilot` section entirely
        let ron_str = "(world: (), aircraft: (), drone: (), debug: ())";
        let config: SimConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config.copilot, CopilotSettings::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<SimConfig, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SimConfig::default();
        config.world.radius = 6371.0;
        config.aircraft.takeoff_altitude = 250.0;
        config.copilot.endpoint = "http://10.0.0.1:3000/api/ai-control".to_string();

        config.save(dir.path()).unwrap();
        let loaded = SimConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.radius = 100.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().world.radius, 100.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<SimConfig, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_error_names_the_simulator_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let error = SimConfig::load_or_create(dir.path()).unwrap_err();
        assert!(
            error.to_string().contains("parse simulator config"),
            "unexpected error text: {error}"
        );
    }
}
