//! Structured logging for the flight simulator.
//!
//! Provides structured, filterable logging via the `tracing` ecosystem:
//! console output with uptime timestamps and module paths, plus optional
//! JSON file logging for post-flight analysis. Integrates with the
//! configuration system for runtime log level control.

use std::path::Path;

use aero_config::SimConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the simulator.
///
/// Console output carries timestamps (uptime since launch), module paths,
/// and severity levels. `RUST_LOG` takes precedence; otherwise the config's
/// `debug.log_level` drives the filter. When `log_dir` is given, a JSON file
/// layer is added for post-flight analysis.
pub fn init_logging(log_dir: Option<&Path>, config: Option<&SimConfig>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => "info,reqwest=warn,hyper=warn".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("flight.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string: `info` everywhere,
/// with the HTTP stack quieted to `warn`.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info,reqwest=warn,hyper=warn")
}
