//! Background exchange with the copilot service.
//!
//! A timer task posts the latest flight report at a fixed interval and
//! writes whatever targets come back into a single-slot [`watch`] cell. The
//! simulation tick reads the cell without blocking; while a request is in
//! flight it keeps flying on the previous targets. Failures of any kind are
//! logged and absorbed; the prior targets always survive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use aero_control::TargetUpdate;
use tokio::sync::watch;

use crate::report::{ControlRequest, FlightReport};
use crate::response::extract_targets;

/// Copilot endpoint and cadence.
#[derive(Clone, Debug)]
pub struct CopilotConfig {
    /// Full URL of the control endpoint.
    pub endpoint: String,
    /// How often to post a flight report.
    pub interval: Duration,
}

/// Errors from a single copilot request.
#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(u16),
}

/// Handle to the background copilot task.
///
/// Created via [`CopilotLink::spawn`]. The simulation publishes flight
/// reports into it each tick and drains arrived target updates; dropping the
/// handle (or calling [`shutdown`](Self::shutdown)) stops the task.
pub struct CopilotLink {
    /// Latest flight report, overwritten each tick.
    report_tx: watch::Sender<Option<FlightReport>>,
    /// Latest arrived target update.
    update_rx: watch::Receiver<TargetUpdate>,
    /// Bumped to force an immediate request outside the timer cadence.
    poke_tx: watch::Sender<u64>,
    /// Sending `true` causes the timer task to exit.
    shutdown_tx: watch::Sender<bool>,
}

impl CopilotLink {
    /// Spawn the timer task. Requires a running tokio runtime.
    pub fn spawn(config: CopilotConfig) -> Self {
        let (report_tx, report_rx) = watch::channel(None);
        let (update_tx, update_rx) = watch::channel(TargetUpdate::default());
        let (poke_tx, poke_rx) = watch::channel(0u64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            run_loop(config, report_rx, update_tx, poke_rx, shutdown_rx).await;
        });

        Self {
            report_tx,
            update_rx,
            poke_tx,
            shutdown_tx,
        }
    }

    /// Overwrite the flight report the next request will carry.
    pub fn publish(&self, report: FlightReport) {
        self.report_tx.send_replace(Some(report));
    }

    /// Request a post right now instead of waiting for the next timer tick.
    pub fn request_now(&self) {
        self.poke_tx.send_modify(|n| *n += 1);
    }

    /// Drain the latest target update, if one arrived since the last call.
    pub fn latest(&mut self) -> Option<TargetUpdate> {
        match self.update_rx.has_changed() {
            Ok(true) => Some(*self.update_rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Stop the timer task. Requests already in flight are abandoned.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Timer loop: fire on the interval (or a poke), skip if a request is still
/// in flight, otherwise hand the latest report to a request task.
async fn run_loop(
    config: CopilotConfig,
    report_rx: watch::Receiver<Option<FlightReport>>,
    update_tx: watch::Sender<TargetUpdate>,
    mut poke_rx: watch::Receiver<u64>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let client = reqwest::Client::new();
    let in_flight = Arc::new(AtomicBool::new(false));
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                fire(&client, &config, &report_rx, &update_tx, &in_flight);
            }
            result = poke_rx.changed() => {
                if result.is_err() {
                    break;
                }
                fire(&client, &config, &report_rx, &update_tx, &in_flight);
            }
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }
}

/// Start one request task, unless one is already running or there is
/// nothing to report yet.
fn fire(
    client: &reqwest::Client,
    config: &CopilotConfig,
    report_rx: &watch::Receiver<Option<FlightReport>>,
    update_tx: &watch::Sender<TargetUpdate>,
    in_flight: &Arc<AtomicBool>,
) {
    let Some(report) = *report_rx.borrow() else {
        return;
    };
    if in_flight.swap(true, Ordering::AcqRel) {
        tracing::debug!("previous copilot request still in flight; skipping");
        return;
    }

    let client = client.clone();
    let endpoint = config.endpoint.clone();
    let update_tx = update_tx.clone();
    let in_flight = Arc::clone(in_flight);
    tokio::spawn(async move {
        match request_targets(&client, &endpoint, report).await {
            Ok(update) if !update.is_empty() => {
                tracing::debug!(?update, "copilot targets received");
                update_tx.send_replace(update);
            }
            Ok(_) => {
                tracing::debug!("copilot reply carried no usable targets");
            }
            Err(error) => {
                tracing::warn!(%error, "copilot request failed; keeping prior targets");
            }
        }
        in_flight.store(false, Ordering::Release);
    });
}

/// Post one flight report and extract whatever targets come back.
pub async fn request_targets(
    client: &reqwest::Client,
    endpoint: &str,
    report: FlightReport,
) -> Result<TargetUpdate, CopilotError> {
    let response = client
        .post(endpoint)
        .json(&ControlRequest {
            flight_data: report,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CopilotError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(extract_targets(&body))
}
