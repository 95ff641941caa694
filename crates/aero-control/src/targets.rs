//! Target setpoints and presence-checked partial updates.
//!
//! The copilot service suggests new setpoints as a sparse update: any field
//! it omits (or sends as something other than a finite number) must leave
//! the current value untouched. A suggested value of exactly `0.0` is a real
//! instruction to level out and is applied like any other number, so
//! presence is tracked with `Option`, never inferred from truthiness.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four aircraft setpoints plus the suggested throttle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetSet {
    /// Desired pitch angle in radians.
    pub pitch: f64,
    /// Desired roll angle in radians.
    pub roll: f64,
    /// Desired yaw angle in radians.
    pub yaw: f64,
    /// Desired altitude above the surface in world units.
    pub altitude: f64,
    /// Suggested throttle in [0, 1], used directly while external targets
    /// drive the vehicle.
    pub throttle: f64,
}

impl TargetSet {
    /// Merge a sparse update into the current targets, field by field.
    pub fn apply(&mut self, update: &TargetUpdate) {
        if let Some(pitch) = update.target_pitch {
            self.pitch = pitch;
        }
        if let Some(roll) = update.target_roll {
            self.roll = roll;
        }
        if let Some(yaw) = update.target_yaw {
            self.yaw = yaw;
        }
        if let Some(altitude) = update.target_altitude {
            self.altitude = altitude;
        }
        if let Some(throttle) = update.throttle {
            self.throttle = throttle;
        }
    }
}

/// A sparse setpoint update: absent fields leave the current value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUpdate {
    /// New pitch target, if suggested.
    pub target_pitch: Option<f64>,
    /// New roll target, if suggested.
    pub target_roll: Option<f64>,
    /// New yaw target, if suggested.
    pub target_yaw: Option<f64>,
    /// New altitude target, if suggested.
    pub target_altitude: Option<f64>,
    /// New suggested throttle, if suggested.
    pub throttle: Option<f64>,
}

impl TargetUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Extract an update from an arbitrary JSON value.
    ///
    /// Only fields present as finite JSON numbers are taken; strings,
    /// booleans, nulls, NaN and anything else are skipped field-wise rather
    /// than failing the whole update.
    pub fn from_json(value: &Value) -> Self {
        let finite = |key: &str| -> Option<f64> {
            value.get(key)?.as_f64().filter(|v| v.is_finite())
        };
        Self {
            target_pitch: finite("targetPitch"),
            target_roll: finite("targetRoll"),
            target_yaw: finite("targetYaw"),
            target_altitude: finite("targetAltitude"),
            throttle: finite("throttle"),
        }
    }
}
