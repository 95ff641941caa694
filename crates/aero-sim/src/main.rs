//! Binary entry point for the flight simulator.
//!
//! Loads configuration, spawns the chosen vehicle over the world, starts the
//! copilot link, and drives the simulation at a fixed 60 Hz cadence until
//! interrupted. The copilot exchange runs in the background; the tick loop
//! only ever drains its latest arrived targets.

mod session;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use aero_config::{CliArgs, SimConfig, VehicleKind};
use aero_copilot::{CopilotConfig, CopilotLink, FlightReport};
use aero_world::{ElevationMap, World};

use crate::session::SimulationSession;

/// Fixed simulation cadence: 60 Hz.
const TICK_PERIOD: Duration = Duration::from_micros(16_667);

/// How often the config file is polled for hot-reload.
const RELOAD_PERIOD: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(|| PathBuf::from("."));

    let disk_config = match SimConfig::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load configuration: {error}");
            std::process::exit(1);
        }
    };
    let mut config = disk_config.clone();
    config.apply_cli_overrides(&args);

    aero_log::init_logging(None, Some(&config));

    if let Err(error) = run(args.vehicle, &config, disk_config, &config_dir).await {
        tracing::error!(%error, "simulation aborted");
        std::process::exit(1);
    }
}

async fn run(
    kind: VehicleKind,
    config: &SimConfig,
    // On-disk snapshot, kept separate so hot-reload comparisons are not
    // confused by CLI overrides.
    mut disk_config: SimConfig,
    config_dir: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = World::new(config.world.radius);
    if let Some(path) = &config.world.elevation_data {
        let map = ElevationMap::load(path)?;
        tracing::info!(samples = map.len(), "elevation data loaded");
        world = world.with_elevation(map);
    }

    let lat = config.world.departure_latitude;
    let long = config.world.departure_longitude;
    let mut session = match kind {
        VehicleKind::Aircraft => {
            SimulationSession::with_aircraft(world, &config.aircraft, lat, long)
        }
        VehicleKind::Drone => SimulationSession::with_drone(world, &config.drone, lat, long),
    };
    tracing::info!(?kind, lat, long, mode = %session.mode(), "vehicle spawned");

    let mut link = config.copilot.enabled.then(|| {
        tracing::info!(endpoint = %config.copilot.endpoint, "copilot link started");
        CopilotLink::spawn(CopilotConfig {
            endpoint: config.copilot.endpoint.clone(),
            interval: Duration::from_secs(config.copilot.interval_secs),
        })
    });

    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut reload_ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + RELOAD_PERIOD,
        RELOAD_PERIOD,
    );
    let mut status_every = Duration::from_secs(config.debug.status_interval_secs);
    let mut last_tick = Instant::now();
    let mut last_status = Instant::now();
    let mut primed = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let delta = now.duration_since(last_tick).as_secs_f64();
                last_tick = now;

                if let Some(link) = link.as_mut()
                    && let Some(update) = link.latest()
                {
                    session.apply_external_targets(&update);
                }

                session.tick(delta);

                if let Some(link) = link.as_ref() {
                    let state = session.state();
                    link.publish(FlightReport::new(
                        state.position,
                        state.velocity,
                        state.orientation,
                        session.throttle(),
                        session.engine_on(),
                    ));
                    // Kick off the first exchange as soon as a report exists
                    // instead of waiting out a full interval.
                    if !primed {
                        link.request_now();
                        primed = true;
                    }
                }

                if status_every > Duration::ZERO && now.duration_since(last_status) >= status_every {
                    log_status(&session);
                    last_status = now;
                }
            }
            _ = reload_ticker.tick() => {
                match disk_config.reload(config_dir) {
                    Ok(Some(changed)) => {
                        // Physics and copilot tuning apply to freshly spawned
                        // vehicles; only the status cadence takes effect live.
                        status_every = Duration::from_secs(changed.debug.status_interval_secs);
                        tracing::info!("config file changed; updated settings apply to the next spawn");
                        disk_config = changed;
                    }
                    Ok(None) => {}
                    Err(error) => tracing::warn!(%error, "config reload failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                if let Some(link) = link.take() {
                    link.shutdown();
                }
                break;
            }
        }
    }

    Ok(())
}

/// Periodic one-line flight status, in the units pilots read.
fn log_status(session: &SimulationSession) {
    let state = session.state();
    let fix = session.world().cartesian_to_lat_long(state.position);
    tracing::info!(
        position = %fix,
        altitude_ft = format_args!("{:.0}", state.altitude * 3.28084),
        speed_kts = format_args!("{:.0}", state.velocity.length() * 1.94384),
        mode = %session.mode(),
        throttle = format_args!("{:.2}", session.throttle()),
        grounded = state.grounded,
        "flight status"
    );
}
