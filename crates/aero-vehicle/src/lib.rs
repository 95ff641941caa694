//! Flyable vehicles: the PID-stabilized fixed-wing aircraft and the
//! kinematic multirotor drone.
//!
//! Both vehicles live over the same spherical world and accept the same
//! sparse target updates, but their flight models share nothing else: the
//! aircraft integrates forces onto a velocity, the drone displaces its
//! position directly from control flags.

pub mod aircraft;
pub mod drone;

pub use aircraft::{
    Aircraft, AircraftConfig, AircraftState, NOMINAL_TICK, clamp_delta, surface_orientation,
};
pub use drone::{Drone, DroneConfig, DroneControls, DroneState};

use aero_control::TargetUpdate;
use aero_world::World;
use glam::{DQuat, DVec3};

/// Per-tick context handed to whichever vehicle is active.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    /// The world the vehicle flies over.
    pub world: &'a World,
    /// Wall-clock frame delta, clamped internally before integration.
    pub delta: f64,
    /// Arbitrated throttle setting in [0, 1].
    pub throttle: f64,
}

/// State snapshot common to every vehicle kind.
#[derive(Clone, Copy, Debug)]
pub struct VehicleState {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
    pub altitude: f64,
    pub grounded: bool,
}

/// The active vehicle, dispatching ticks and targets to its flight model.
#[derive(Clone, Debug)]
pub enum Vehicle {
    Aircraft(Aircraft),
    Drone(Drone),
}

impl Vehicle {
    /// Advance the vehicle one simulation tick.
    pub fn tick(&mut self, ctx: &TickContext<'_>) {
        match self {
            Vehicle::Aircraft(aircraft) => aircraft.update(ctx.throttle, ctx.world, ctx.delta),
            Vehicle::Drone(drone) => drone.update(ctx.world),
        }
    }

    /// Merge externally supplied setpoints into the vehicle's targets.
    pub fn apply_targets(&mut self, update: &TargetUpdate) {
        match self {
            Vehicle::Aircraft(aircraft) => aircraft.apply_targets(update),
            Vehicle::Drone(drone) => drone.apply_targets(update),
        }
    }

    /// Common state snapshot, regardless of vehicle kind.
    pub fn state(&self, world: &World) -> VehicleState {
        match self {
            Vehicle::Aircraft(aircraft) => {
                let state = aircraft.state(world);
                VehicleState {
                    position: state.position,
                    velocity: state.velocity,
                    orientation: state.quaternion,
                    altitude: state.altitude,
                    grounded: state.grounded,
                }
            }
            Vehicle::Drone(drone) => VehicleState {
                position: drone.position,
                velocity: drone.velocity,
                orientation: drone.orientation,
                altitude: drone.altitude(world),
                grounded: drone.on_floor(world),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_dispatch_ticks_both_kinds() {
        let world = World::new(50.0);
        let ctx = TickContext {
            world: &world,
            delta: NOMINAL_TICK,
            throttle: 1.0,
        };

        let mut aircraft = Vehicle::Aircraft(Aircraft::spawn(
            AircraftConfig::default(),
            &world,
            0.0,
            -45.0,
        ));
        aircraft.tick(&ctx);
        assert!(aircraft.state(&world).position.is_finite());

        let mut drone = Vehicle::Drone(Drone::spawn(DroneConfig::default(), &world, 0.0, -45.0));
        drone.tick(&ctx);
        assert!(drone.state(&world).position.is_finite());
    }

    #[test]
    fn test_vehicle_targets_reach_the_flight_model() {
        let world = World::new(50.0);
        let mut vehicle = Vehicle::Aircraft(Aircraft::spawn(
            AircraftConfig::default(),
            &world,
            0.0,
            -45.0,
        ));
        vehicle.apply_targets(&TargetUpdate {
            target_altitude: Some(120.0),
            ..Default::default()
        });
        let Vehicle::Aircraft(aircraft) = &vehicle else {
            panic!("vehicle kind changed");
        };
        assert_eq!(aircraft.targets.altitude, 120.0);
    }
}
