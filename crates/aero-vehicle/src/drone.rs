//! Multirotor drone: velocity-free kinematic flight.
//!
//! The drone skips force integration entirely. Active control flags
//! translate directly into per-tick positional displacement in the drone's
//! local frame, with a hard floor holding it above the surface. The
//! pitch/roll tilt is purely cosmetic: an exponentially smoothed lean that
//! never feeds back into the displacement.

use aero_control::{InputSnapshot, TargetUpdate};
use aero_world::World;
use glam::{DQuat, DVec3, EulerRot};

use crate::aircraft::surface_orientation;

/// Drone movement tuning.
#[derive(Clone, Debug)]
pub struct DroneConfig {
    /// Displacement per tick for an active movement flag.
    pub move_speed: f64,
    /// Displacement per tick with the boost flag held.
    pub boost_speed: f64,
    /// Yaw rotation per tick for an active yaw flag, radians.
    pub yaw_rate: f64,
    /// Target lean angle while translating, radians.
    pub tilt_amount: f64,
    /// Exponential smoothing factor for the visual tilt, per tick.
    pub tilt_smoothing: f64,
    /// Minimum clearance above the surface radius. Hard floor, not a bounce.
    pub clearance: f64,
    /// Altitude at which the takeoff is considered complete.
    pub takeoff_altitude: f64,
}

impl Default for DroneConfig {
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

/// The drone's boolean control flags, set fresh each tick from whichever
/// source is driving it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DroneControls {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
}

impl From<&InputSnapshot> for DroneControls {
    fn from(input: &InputSnapshot) -> Self {
        Self {
            forward: input.forward,
            backward: input.backward,
            left: input.left,
            right: input.right,
            yaw_left: input.yaw_left,
            yaw_right: input.yaw_right,
            up: input.up,
            down: input.down,
            boost: input.boost,
        }
    }
}

/// Outward-facing drone state snapshot.
#[derive(Clone, Copy, Debug)]
pub struct DroneState {
    /// World-frame position, measured from the world center.
    pub position: DVec3,
    /// Displayed attitude as (pitch, yaw, roll) radians.
    pub rotation: DVec3,
    /// Last tick's displacement. Derived, not integrated.
    pub velocity: DVec3,
    /// Control flags currently active.
    pub controls: DroneControls,
    /// Whether external targets are driving the drone.
    pub auto_mode: bool,
    /// Whether the drone has climbed past its takeoff altitude.
    pub takeoff_complete: bool,
}

/// A multirotor drone over a spherical world.
#[derive(Clone, Debug)]
pub struct Drone {
    config: DroneConfig,
    /// World-frame position, measured from the world center.
    pub position: DVec3,
    /// Unit orientation quaternion (yaw only; tilt is separate).
    pub orientation: DQuat,
    /// Last tick's world-frame displacement.
    pub velocity: DVec3,
    /// Active control flags.
    pub controls: DroneControls,
    /// Whether external targets are driving the drone.
    pub auto_mode: bool,
    /// Latched once altitude first reaches the takeoff altitude.
    pub takeoff_complete: bool,
    // Smoothed visual lean, radians.
    tilt_pitch: f64,
    tilt_roll: f64,
}

impl Drone {
    /// Create a drone at `position` with `up` pointing away from the world
    /// center.
    pub fn new(config: DroneConfig, position: DVec3, up: DVec3) -> Self {
        Self {
            config,
            position,
            orientation: surface_orientation(up),
            velocity: DVec3::ZERO,
            controls: DroneControls::default(),
            auto_mode: false,
            takeoff_complete: false,
            tilt_pitch: 0.0,
            tilt_roll: 0.0,
        }
    }

    /// Spawn hovering at the minimum clearance above a latitude/longitude.
    pub fn spawn(config: DroneConfig, world: &World, lat: f64, long: f64) -> Self {
        let position = world.surface_position(lat, long, config.clearance);
        let up = position.normalize();
        Self::new(config, position, up)
    }

    /// Replace the control flags from this tick's input snapshot.
    pub fn set_controls(&mut self, input: &InputSnapshot) {
        self.controls = DroneControls::from(input);
    }

    /// Apply externally supplied targets.
    ///
    /// The drone has no PID setpoints; the only target it understands is the
    /// suggested throttle, which maps onto the vertical flags: strongly
    /// positive climbs, strongly negative descends.
    pub fn apply_targets(&mut self, update: &TargetUpdate) {
        if let Some(throttle) = update.throttle {
            self.controls.up = throttle > 0.5;
            self.controls.down = throttle < -0.5;
        }
    }

    /// Displayed attitude as (pitch, yaw, roll) radians.
    pub fn rotation(&self) -> DVec3 {
        let (yaw, _, _) = self.orientation.to_euler(EulerRot::YXZ);
        DVec3::new(self.tilt_pitch, yaw, self.tilt_roll)
    }

    /// Altitude above the given world's surface.
    pub fn altitude(&self, world: &World) -> f64 {
        world.altitude_of(self.position)
    }

    /// Whether the drone is resting at its minimum clearance.
    pub fn on_floor(&self, world: &World) -> bool {
        self.altitude(world) <= self.config.clearance + 1e-9
    }

    /// Outward-facing state snapshot.
    pub fn state(&self) -> DroneState {
        DroneState {
            position: self.position,
            rotation: self.rotation(),
            velocity: self.velocity,
            controls: self.controls,
            auto_mode: self.auto_mode,
            takeoff_complete: self.takeoff_complete,
        }
    }

    /// Advance one simulation tick: displace, clamp to the floor, yaw, and
    /// smooth the visual tilt.
    pub fn update(&mut self, world: &World) {
        let speed = if self.controls.boost {
            self.config.boost_speed
        } else {
            self.config.move_speed
        };

        // Horizontal displacement in the drone's local frame.
        let mut movement = DVec3::ZERO;
        if self.controls.forward {
            movement.z -= speed;
        }
        if self.controls.backward {
            movement.z += speed;
        }
        if self.controls.left {
            movement.x -= speed;
        }
        if self.controls.right {
            movement.x += speed;
        }
        let mut movement = self.orientation * movement;

        // Vertical displacement along the radial up direction.
        let up = self.position.normalize_or_zero();
        if self.controls.up {
            movement += up * speed;
        }
        if self.controls.down {
            movement -= up * speed;
        }
        self.position += movement;

        // Hard floor above the surface.
        let floor = world.radius + self.config.clearance;
        let distance = self.position.length();
        if distance < floor && distance > 0.0 {
            self.position = self.position / distance * floor;
        }

        // Direct yaw, no PID.
        if self.controls.yaw_left {
            self.orientation =
                (self.orientation * DQuat::from_rotation_y(self.config.yaw_rate)).normalize();
        }
        if self.controls.yaw_right {
            self.orientation =
                (self.orientation * DQuat::from_rotation_y(-self.config.yaw_rate)).normalize();
        }

        // Visual tilt leans into the active movement flags.
        let mut target_pitch = 0.0;
        let mut target_roll = 0.0;
        if self.controls.forward {
            target_pitch = -self.config.tilt_amount;
        }
        if self.controls.backward {
            target_pitch = self.config.tilt_amount;
        }
        if self.controls.left {
            target_roll = self.config.tilt_amount;
        }
        if self.controls.right {
            target_roll = -self.config.tilt_amount;
        }
        self.tilt_pitch += (target_pitch - self.tilt_pitch) * self.config.tilt_smoothing;
        self.tilt_roll += (target_roll - self.tilt_roll) * self.config.tilt_smoothing;

        self.velocity = movement;

        if !self.takeoff_complete && self.altitude(world) >= self.config.takeoff_altitude {
            self.takeoff_complete = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        World::new(50.0)
    }

    fn spawned() -> Drone {
        Drone::spawn(DroneConfig::default(), &test_world(), 0.0, -45.0)
    }

    #[test]
    fn test_never_below_clearance_floor() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.down = true;
        for _ in 0..200 {
            drone.update(&world);
            assert!(
                drone.position.length() >= world.radius + 0.5 - 1e-9,
                "drone sank below the clearance floor"
            );
        }
    }

    #[test]
    fn test_forward_flag_moves_forward() {
        let world = test_world();
        let mut drone = spawned();
        let start = drone.position;
        let forward = drone.orientation * -DVec3::Z;
        drone.controls.forward = true;
        drone.update(&world);
        let displacement = drone.position - start;
        assert!(displacement.dot(forward) > 0.0);
        assert!((displacement.length() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_boost_doubles_speed() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.up = true;
        drone.controls.boost = true;
        let before = drone.position.length();
        drone.update(&world);
        assert!((drone.position.length() - before - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_up_flag_climbs_radially() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.up = true;
        for _ in 0..100 {
            drone.update(&world);
        }
        assert!(drone.altitude(&world) > 9.0);
    }

    #[test]
    fn test_yaw_flags_rotate_orientation() {
        let world = test_world();
        let mut drone = spawned();
        let forward_before = drone.orientation * -DVec3::Z;
        drone.controls.yaw_left = true;
        for _ in 0..10 {
            drone.update(&world);
        }
        let forward_after = drone.orientation * -DVec3::Z;
        assert!(forward_before.dot(forward_after) < 0.95);
        assert!((drone.orientation.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tilt_smooths_toward_target_and_back() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.forward = true;
        for _ in 0..200 {
            drone.update(&world);
        }
        // Converged near the full lean angle.
        assert!((drone.rotation().x + 0.2).abs() < 1e-3);

        drone.controls.forward = false;
        for _ in 0..200 {
            drone.update(&world);
        }
        assert!(drone.rotation().x.abs() < 1e-3);
    }

    #[test]
    fn test_tilt_does_not_affect_displacement() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.forward = true;
        let mut last_step = 0.0;
        let mut start = drone.position;
        for _ in 0..50 {
            drone.update(&world);
            last_step = (drone.position - start).length();
            start = drone.position;
        }
        // Per-tick displacement stays exactly move_speed despite the lean.
        assert!((last_step - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_takeoff_complete_latches() {
        let world = test_world();
        let mut drone = spawned();
        assert!(!drone.takeoff_complete);
        drone.controls.up = true;
        while drone.altitude(&world) < 5.0 {
            drone.update(&world);
        }
        assert!(drone.takeoff_complete);
        // Descending afterwards does not clear the latch.
        drone.controls.up = false;
        drone.controls.down = true;
        for _ in 0..200 {
            drone.update(&world);
        }
        assert!(drone.takeoff_complete);
    }

    #[test]
    fn test_suggested_throttle_maps_to_vertical_flags() {
        let mut drone = spawned();
        drone.apply_targets(&TargetUpdate {
            throttle: Some(0.9),
            ..Default::default()
        });
        assert!(drone.controls.up);
        assert!(!drone.controls.down);

        drone.apply_targets(&TargetUpdate {
            throttle: Some(-0.9),
            ..Default::default()
        });
        assert!(!drone.controls.up);
        assert!(drone.controls.down);

        // No throttle field: flags untouched.
        drone.apply_targets(&TargetUpdate::default());
        assert!(drone.controls.down);
    }

    #[test]
    fn test_velocity_is_last_displacement() {
        let world = test_world();
        let mut drone = spawned();
        drone.controls.forward = true;
        drone.update(&world);
        assert!((drone.velocity.length() - 0.1).abs() < 1e-9);
        drone.controls.forward = false;
        drone.update(&world);
        assert_eq!(drone.velocity, DVec3::ZERO);
    }
}
