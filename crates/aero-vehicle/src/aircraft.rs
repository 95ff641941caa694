//! Fixed-wing aircraft: PID-stabilized orientation plus a simplified
//! proportional force model.
//!
//! Orientation is integrated through an angular-velocity state that the
//! per-axis PID corrections and manual inputs push on, with multiplicative
//! damping every tick as the sole guard against runaway spin. Translation
//! applies gravity, thrust, lift, and drag directly to a velocity vector and
//! clamps to the world surface on contact. None of this is real
//! aerodynamics; every force is a tunable proportional term on the
//! simulation's own scale.

use aero_control::{Pid, TargetSet, TargetUpdate};
use aero_world::World;
use glam::{DMat3, DQuat, DVec3, EulerRot};

/// Aircraft physics and controller tuning.
#[derive(Clone, Debug)]
pub struct AircraftConfig {
    /// Multiplicative angular-velocity damping applied every tick (< 1).
    pub angular_damping: f64,
    /// Gravity magnitude toward the world center, per tick-second.
    pub gravity: f64,
    /// Lift coefficient: lift magnitude = speed² × this × air density.
    pub lift_coefficient: f64,
    /// Drag coefficient: drag magnitude = speed² × this, opposing velocity.
    pub drag_coefficient: f64,
    /// Thrust force at full throttle along the local forward axis.
    pub thrust_force: f64,
    /// Constant air density (no altitude dependence in this model).
    pub air_density: f64,
    /// Vehicle mass.
    pub mass: f64,
    /// Initial pitch target in radians (the takeoff climb angle).
    pub initial_target_pitch: f64,
    /// Initial altitude target above the surface.
    pub initial_target_altitude: f64,
    /// Initial suggested throttle.
    pub initial_throttle: f64,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            angular_damping: 0.95,
            gravity: 0.01,
            lift_coefficient: 0.04,
            drag_coefficient: 0.00015,
            thrust_force: 0.1,
            air_density: 1.0,
            mass: 1.0,
            initial_target_pitch: 0.15,
            initial_target_altitude: 50.0,
            initial_throttle: 0.7,
        }
    }
}

/// Outward-facing aircraft state snapshot.
#[derive(Clone, Copy, Debug)]
pub struct AircraftState {
    /// World-frame position, measured from the world center.
    pub position: DVec3,
    /// World-frame velocity.
    pub velocity: DVec3,
    /// Unit orientation quaternion.
    pub quaternion: DQuat,
    /// Whether the engine is running.
    pub engine_on: bool,
    /// Whether the aircraft is resting on the surface.
    pub grounded: bool,
    /// Altitude above the surface radius.
    pub altitude: f64,
}

/// A fixed-wing aircraft over a spherical world.
#[derive(Clone, Debug)]
pub struct Aircraft {
    config: AircraftConfig,
    /// World-frame position, measured from the world center.
    pub position: DVec3,
    /// World-frame velocity.
    pub velocity: DVec3,
    /// Unit orientation quaternion.
    pub orientation: DQuat,
    /// Per-axis angular velocity (x = pitch, y = yaw, z = roll).
    pub angular_velocity: DVec3,
    /// Whether the engine is producing thrust.
    pub engine_on: bool,
    /// Whether the aircraft is resting on the surface.
    pub grounded: bool,
    /// PID regulating pitch toward `targets.pitch`.
    pub pid_pitch: Pid,
    /// PID regulating roll toward `targets.roll`.
    pub pid_roll: Pid,
    /// PID regulating yaw toward `targets.yaw`.
    pub pid_yaw: Pid,
    /// PID nudging throttle toward `targets.altitude` after takeoff.
    pub pid_throttle: Pid,
    /// Current setpoints.
    pub targets: TargetSet,
    // Transient manual torque inputs, consumed and zeroed every tick.
    manual_pitch: f64,
    manual_roll: f64,
    manual_yaw: f64,
    // Last extracted attitude, for state readouts.
    current_pitch: f64,
    current_roll: f64,
    current_yaw: f64,
}

/// Nominal tick duration substituted for missing or excessive deltas.
pub const NOMINAL_TICK: f64 = 1.0 / 60.0;

/// Clamp a frame delta to something the integrators can trust.
///
/// Zero, negative, NaN, and anything above half a time-unit (a stalled or
/// backgrounded loop) all collapse to the nominal 60 Hz tick.
pub fn clamp_delta(delta: f64) -> f64 {
    if delta > 0.0 && delta <= 0.5 {
        delta
    } else {
        NOMINAL_TICK
    }
}

impl Aircraft {
    /// Create an aircraft with the given tuning, parked at `position` with
    /// `up` pointing away from the world center.
    ///
    /// PID gains follow the stock tuning: gentle corrections for the
    /// attitude axes, a small incremental output for throttle.
    pub fn new(config: AircraftConfig, position: DVec3, up: DVec3) -> Self {
        let targets = TargetSet {
            pitch: config.initial_target_pitch,
            roll: 0.0,
            yaw: 0.0,
            altitude: config.initial_target_altitude,
            throttle: config.initial_throttle,
        };
        Self {
            config,
            position,
            velocity: DVec3::ZERO,
            orientation: surface_orientation(up),
            angular_velocity: DVec3::ZERO,
            engine_on: false,
            grounded: true,
            pid_pitch: Pid::new(0.1, 0.01, 0.05, 0.5, -0.5, 0.5),
            pid_roll: Pid::new(0.1, 0.01, 0.05, 0.5, -0.5, 0.5),
            pid_yaw: Pid::new(0.1, 0.01, 0.05, 0.5, -0.5, 0.5),
            pid_throttle: Pid::new(0.4, 0.02, 0.06, 0.1, -0.01, 0.01),
            targets,
            manual_pitch: 0.0,
            manual_roll: 0.0,
            manual_yaw: 0.0,
            current_pitch: 0.0,
            current_roll: 0.0,
            current_yaw: 0.0,
        }
    }

    /// Spawn at a latitude/longitude slightly above the surface, tangent
    /// oriented.
    pub fn spawn(config: AircraftConfig, world: &World, lat: f64, long: f64) -> Self {
        let position = world.surface_position(lat, long, 0.5);
        let up = position.normalize();
        Self::new(config, position, up)
    }

    /// Start the engine, zeroing any residual velocity.
    pub fn start_engine(&mut self) {
        self.engine_on = true;
        self.velocity = DVec3::ZERO;
    }

    /// Cut the engine. The translational forces stop applying; orientation
    /// control keeps running.
    pub fn stop_engine(&mut self) {
        self.engine_on = false;
    }

    /// Add a manual pitch torque for this tick.
    pub fn pitch(&mut self, amount: f64) {
        self.manual_pitch += amount;
    }

    /// Add a manual roll torque for this tick.
    pub fn roll(&mut self, amount: f64) {
        self.manual_roll += amount;
    }

    /// Add a manual yaw torque for this tick.
    pub fn yaw(&mut self, amount: f64) {
        self.manual_yaw += amount;
    }

    /// Merge externally supplied setpoints, field by field.
    pub fn apply_targets(&mut self, update: &TargetUpdate) {
        self.targets.apply(update);
    }

    /// Current attitude as (pitch, roll, yaw) radians, YXZ order.
    pub fn attitude(&self) -> (f64, f64, f64) {
        (self.current_pitch, self.current_roll, self.current_yaw)
    }

    /// Local forward axis (−Z) in the world frame.
    pub fn forward(&self) -> DVec3 {
        self.orientation * -DVec3::Z
    }

    /// Local right axis (+X) in the world frame.
    pub fn right(&self) -> DVec3 {
        self.orientation * DVec3::X
    }

    /// Altitude above the given world's surface.
    pub fn altitude(&self, world: &World) -> f64 {
        world.altitude_of(self.position)
    }

    /// Advance one simulation tick.
    ///
    /// `throttle` is the arbitrated engine setting in [0, 1], decided by
    /// whoever won the control-mode arbitration this tick. Orientation always
    /// integrates; translation only runs with the engine on.
    pub fn update(&mut self, throttle: f64, world: &World, delta: f64) {
        if !self.engine_on && throttle > 0.0 {
            self.start_engine();
        }

        let delta = clamp_delta(delta);
        self.integrate_orientation(delta);

        if self.engine_on {
            self.integrate_translation(throttle, world, delta);
        }
    }

    /// Outward-facing state snapshot.
    pub fn state(&self, world: &World) -> AircraftState {
        AircraftState {
            position: self.position,
            velocity: self.velocity,
            quaternion: self.orientation,
            engine_on: self.engine_on,
            grounded: self.grounded,
            altitude: self.altitude(world),
        }
    }

    /// PID corrections plus manual torques → angular velocity → damped →
    /// incremental rotation composed onto the orientation.
    fn integrate_orientation(&mut self, delta: f64) {
        // Fixed YXZ extraction: yaw about Y, pitch about X, roll about Z.
        let (yaw, pitch, roll) = self.orientation.to_euler(EulerRot::YXZ);
        self.current_pitch = pitch;
        self.current_roll = roll;
        self.current_yaw = yaw;

        let pitch_torque = self.pid_pitch.update(self.targets.pitch, pitch) + self.manual_pitch;
        let roll_torque = self.pid_roll.update(self.targets.roll, roll) + self.manual_roll;
        let yaw_torque = self.pid_yaw.update(self.targets.yaw, yaw) + self.manual_yaw;

        self.angular_velocity.x += pitch_torque;
        self.angular_velocity.z += roll_torque;
        self.angular_velocity.y += yaw_torque;

        // Damping runs every tick in every mode; it is the only thing
        // bounding the rotation rate.
        self.angular_velocity *= self.config.angular_damping;

        let step = self.angular_velocity * delta;
        let rotation = DQuat::from_euler(EulerRot::YXZ, step.y, step.x, step.z);
        self.orientation = (self.orientation * rotation).normalize();

        // Manual inputs are write-once-per-tick signals, not state.
        self.manual_pitch = 0.0;
        self.manual_roll = 0.0;
        self.manual_yaw = 0.0;
    }

    /// Gravity, thrust, lift, drag onto the velocity; integrate position;
    /// resolve ground contact against the surface radius.
    fn integrate_translation(&mut self, throttle: f64, world: &World, delta: f64) {
        let up = self.position.normalize_or_zero();

        // Gravity, toward the world center.
        self.velocity -= up * (self.config.gravity * self.config.mass * delta);

        // Thrust along the rotated local forward axis.
        self.velocity += self.forward() * (throttle * self.config.thrust_force * delta);

        // Lift, perpendicular to velocity and the local right axis. Skipped
        // entirely when velocity is parallel to the right vector; a zero
        // cross product must not normalize into NaN.
        let speed_sq = self.velocity.length_squared();
        let lift_dir = self.velocity.cross(self.right());
        if lift_dir.length_squared() > f64::EPSILON {
            let magnitude = speed_sq * self.config.lift_coefficient * self.config.air_density;
            self.velocity += lift_dir.normalize() * (magnitude * delta);
        }

        // Drag, opposing velocity.
        self.velocity += self.velocity * (-self.config.drag_coefficient * speed_sq * delta);

        self.position += self.velocity * delta;

        // Ground contact: clamp to exactly the surface radius, kill all
        // momentum.
        if self.position.length() < world.radius {
            self.position = self.position.normalize() * world.radius;
            self.velocity = DVec3::ZERO;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

/// Orientation for a vehicle resting on the sphere: local up along the
/// radial direction, forward along a consistent tangent.
pub fn surface_orientation(up: DVec3) -> DQuat {
    let reference = -DVec3::Z;
    let mut right = reference.cross(up);
    if right.length_squared() < f64::EPSILON {
        // Spawn point is at a pole; any tangent will do.
        right = DVec3::X;
    }
    let right = right.normalize();
    let forward = up.cross(right);
    // Local −Z is forward, so the +Z basis column points backward.
    DQuat::from_mat3(&DMat3::from_cols(right, up, -forward)).normalize()
}
