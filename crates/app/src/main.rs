//! fanvault entry point.
//!
//! Seeds a session, replays an optional action script and prints the resulting state
//! as JSON on stdout. Logs go to stderr.

use std::fs;

use anyhow::Context;
use fanvault_common::{Config, LogFormat};
use fanvault_core::{ActionOutcome, Session};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config);

    info!(viewer_id = config.session.current_user_id, "Starting fanvault session...");
    let session = Session::seed(&config)?;

    if let Some(path) = &config.session.replay_path {
        let script = fs::read_to_string(path)
            .with_context(|| format!("failed to read action script {}", path.display()))?;
        let actions = Session::parse_script(&script)?;
        info!(path = %path.display(), count = actions.len(), "Replaying actions");

        // Failed actions are logged and skipped; the rest of the script still runs.
        for (index, action) in actions.into_iter().enumerate() {
            match session.dispatch(action) {
                Ok(ActionOutcome::NotFound) => warn!(index, "Action referenced a missing id"),
                Ok(_) => {}
                Err(e) => {
                    e.log();
                    warn!(index, code = e.error_code(), "Action failed");
                }
            }
        }
    }

    let metrics = session.metrics();
    info!(
        mutations = metrics.mutations_total(),
        not_found = metrics.not_found_total,
        "Session complete"
    );

    let snapshot = session.snapshot()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
