//! Simulation session: vehicle, world, and control-mode arbitration.
//!
//! The session owns everything the tick loop mutates and decides, each tick,
//! who is flying: the takeoff sequencer, the manual input snapshot, or the
//! copilot's last suggested targets. Mode transitions change only the targets
//! and the throttle source; controller state carries across untouched.

use aero_config::{AircraftTuning, DroneTuning};
use aero_control::{InputSnapshot, TargetUpdate};
use aero_vehicle::{
    Aircraft, AircraftConfig, Drone, DroneConfig, TickContext, Vehicle, VehicleState,
};
use aero_world::World;

/// Who is flying the vehicle this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// Per-tick key polling drives throttle and attitude increments.
    Manual,
    /// The takeoff sequencer owns the throttle until handover altitude.
    AutoTakeoff,
    /// The copilot's last suggested targets and throttle drive the vehicle.
    AiAssist,
}

impl std::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ControlMode::Manual => "manual",
            ControlMode::AutoTakeoff => "auto-takeoff",
            ControlMode::AiAssist => "ai-assist",
        };
        f.write_str(name)
    }
}

/// Takeoff sequencing thresholds and progress.
#[derive(Clone, Debug)]
struct TakeoffPlan {
    /// Forward speed required before rotating.
    speed: f64,
    /// Climb pitch target set once rotation speed is reached, radians.
    climb_angle: f64,
    /// Altitude at which control hands over to manual.
    handover_altitude: f64,
    /// Latched once the climb pitch has been set.
    rotated: bool,
}

/// Simulation state for one vehicle over one world.
pub struct SimulationSession {
    world: World,
    vehicle: Vehicle,
    mode: ControlMode,
    throttle: f64,
    /// Last copilot-suggested throttle, used directly in AI-assist.
    ai_throttle: f64,
    takeoff: TakeoffPlan,
    input: InputSnapshot,
}

/// Per-tick throttle step for manual keys.
const THROTTLE_STEP: f64 = 0.01;
/// Per-tick attitude increment for manual keys, radians.
const ATTITUDE_STEP: f64 = 0.01;

/// Map the persisted aircraft tuning onto the flight-model config.
fn aircraft_config(tuning: &AircraftTuning) -> AircraftConfig {
    AircraftConfig {
        angular_damping: tuning.angular_damping,
        gravity: tuning.gravity,
        lift_coefficient: tuning.lift_coefficient,
        drag_coefficient: tuning.drag_coefficient,
        thrust_force: tuning.thrust_force,
        mass: tuning.mass,
        initial_target_pitch: tuning.climb_angle,
        initial_target_altitude: tuning.initial_target_altitude,
        initial_throttle: tuning.initial_throttle,
        ..AircraftConfig::default()
    }
}

/// Map the persisted drone tuning onto the flight-model config.
fn drone_config(tuning: &DroneTuning) -> DroneConfig {
    DroneConfig {
        move_speed: tuning.move_speed,
        boost_speed: tuning.boost_speed,
        yaw_rate: tuning.yaw_rate,
        tilt_amount: tuning.tilt_amount,
        tilt_smoothing: tuning.tilt_smoothing,
        clearance: tuning.clearance,
        takeoff_altitude: tuning.takeoff_altitude,
    }
}

impl SimulationSession {
    /// Start a session flying an aircraft. Initial mode is auto-takeoff.
    pub fn with_aircraft(world: World, tuning: &AircraftTuning, lat: f64, long: f64) -> Self {
        let aircraft = Aircraft::spawn(aircraft_config(tuning), &world, lat, long);
        Self {
            world,
            vehicle: Vehicle::Aircraft(aircraft),
            mode: ControlMode::AutoTakeoff,
            throttle: 0.0,
            ai_throttle: 0.0,
            takeoff: TakeoffPlan {
                speed: tuning.takeoff_speed,
                climb_angle: tuning.climb_angle,
                handover_altitude: tuning.takeoff_altitude,
                rotated: false,
            },
            input: InputSnapshot::released(),
        }
    }

    /// Start a session flying a drone. Initial mode is manual; the aircraft
    /// takeoff thresholds are unused.
    pub fn with_drone(world: World, tuning: &DroneTuning, lat: f64, long: f64) -> Self {
        let drone = Drone::spawn(drone_config(tuning), &world, lat, long);
        Self {
            world,
            vehicle: Vehicle::Drone(drone),
            mode: ControlMode::Manual,
            throttle: 0.0,
            ai_throttle: 0.0,
            takeoff: TakeoffPlan {
                speed: 0.0,
                climb_angle: 0.0,
                handover_altitude: 0.0,
                rotated: true,
            },
            input: InputSnapshot::released(),
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Current arbitrated throttle in [0, 1].
    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Whether the engine is producing thrust (always true for the drone).
    pub fn engine_on(&self) -> bool {
        match &self.vehicle {
            Vehicle::Aircraft(aircraft) => aircraft.engine_on,
            Vehicle::Drone(_) => true,
        }
    }

    /// Replace the manual input snapshot for the coming ticks.
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    /// Switch control mode. Controller state (PID integrals, angular
    /// velocity) carries across; only the targets and throttle source change.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        tracing::info!(from = %self.mode, to = %mode, "control mode changed");
        if mode == ControlMode::AutoTakeoff {
            // Re-arm the sequence for another departure.
            self.takeoff.rotated = false;
        }
        self.mode = mode;
    }

    /// Merge a copilot target update into the session.
    ///
    /// Aircraft setpoints are updated whenever a suggestion arrives; the
    /// suggested throttle only drives the engine while in AI-assist. The
    /// drone ignores suggestions entirely outside AI-assist.
    pub fn apply_external_targets(&mut self, update: &TargetUpdate) {
        if update.is_empty() {
            return;
        }
        if let Some(throttle) = update.throttle {
            self.ai_throttle = throttle;
        }
        match &mut self.vehicle {
            Vehicle::Aircraft(aircraft) => aircraft.apply_targets(update),
            Vehicle::Drone(drone) => {
                if self.mode == ControlMode::AiAssist {
                    drone.apply_targets(update);
                }
            }
        }
    }

    /// Common vehicle state snapshot.
    pub fn state(&self) -> VehicleState {
        self.vehicle.state(&self.world)
    }

    /// Advance the session one tick: arbitrate control, then integrate.
    pub fn tick(&mut self, delta: f64) {
        match &mut self.vehicle {
            Vehicle::Aircraft(aircraft) => match self.mode {
                ControlMode::AutoTakeoff => {
                    let speed = aircraft.velocity.length();
                    if speed < self.takeoff.speed {
                        self.throttle = 1.0;
                    } else if !self.takeoff.rotated {
                        tracing::info!(speed, "takeoff speed reached; rotating");
                        aircraft.targets.pitch = self.takeoff.climb_angle;
                        self.takeoff.rotated = true;
                    }

                    if self.takeoff.rotated {
                        let altitude = aircraft.altitude(&self.world);
                        // Small incremental nudges toward the altitude target.
                        let adjust = aircraft
                            .pid_throttle
                            .update(aircraft.targets.altitude, altitude);
                        self.throttle = (self.throttle + adjust).clamp(0.0, 1.0);

                        if altitude >= self.takeoff.handover_altitude {
                            tracing::info!(altitude, "takeoff complete; leveling out");
                            aircraft.targets.pitch = 0.0;
                            self.mode = ControlMode::Manual;
                        }
                    }
                }
                ControlMode::Manual => {
                    if self.input.forward {
                        self.throttle = (self.throttle + THROTTLE_STEP).min(1.0);
                    }
                    if self.input.backward {
                        self.throttle = (self.throttle - THROTTLE_STEP).max(0.0);
                    }
                    if self.input.left {
                        aircraft.roll(-ATTITUDE_STEP);
                    }
                    if self.input.right {
                        aircraft.roll(ATTITUDE_STEP);
                    }
                    if self.input.yaw_left {
                        aircraft.yaw(ATTITUDE_STEP);
                    }
                    if self.input.yaw_right {
                        aircraft.yaw(-ATTITUDE_STEP);
                    }
                    if self.input.pitch_up {
                        aircraft.pitch(ATTITUDE_STEP);
                    }
                    if self.input.pitch_down {
                        aircraft.pitch(-ATTITUDE_STEP);
                    }
                }
                ControlMode::AiAssist => {
                    self.throttle = self.ai_throttle;
                }
            },
            Vehicle::Drone(drone) => {
                if self.mode == ControlMode::AiAssist {
                    drone.auto_mode = true;
                } else {
                    drone.auto_mode = false;
                    drone.set_controls(&self.input);
                }
            }
        }

        let ctx = TickContext {
            world: &self.world,
            delta,
            throttle: self.throttle,
        };
        self.vehicle.tick(&ctx);
    }
}
