//! Flight state payloads sent to the copilot service.
//!
//! The wire format mirrors the service's existing contract: vectors as
//! `{x, y, z}` objects, the orientation as an `{x, y, z, w}` quaternion, and
//! the whole report wrapped in a `flightData` envelope.

use glam::{DQuat, DVec3};
use serde::Serialize;

/// A world-frame vector on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vec3Payload {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for Vec3Payload {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// An orientation quaternion on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuatPayload {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl From<DQuat> for QuatPayload {
    fn from(q: DQuat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

/// One tick's worth of vehicle state, as the service expects to see it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightReport {
    pub position: Vec3Payload,
    pub velocity: Vec3Payload,
    pub quaternion: QuatPayload,
    pub throttle: f64,
    pub engine_on: bool,
}

impl FlightReport {
    /// Build a report from raw vehicle state.
    pub fn new(
        position: DVec3,
        velocity: DVec3,
        quaternion: DQuat,
        throttle: f64,
        engine_on: bool,
    ) -> Self {
        Self {
            position: position.into(),
            velocity: velocity.into(),
            quaternion: quaternion.into(),
            throttle,
            engine_on,
        }
    }
}

/// The request body: a report under the `flightData` key.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    pub flight_data: FlightReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let report = FlightReport::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::ZERO,
            DQuat::IDENTITY,
            0.7,
            true,
        );
        let value = serde_json::to_value(ControlRequest {
            flight_data: report,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "flightData": {
                    "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
                    "velocity": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "quaternion": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 },
                    "throttle": 0.7,
                    "engineOn": true,
                }
            })
        );
    }
}
