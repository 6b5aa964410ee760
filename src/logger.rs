//! logger.rs
//!
//! Two sinks: the in-state activity ring shown in the status bar, and a
//! `tracing` file log (the terminal belongs to the UI).
//!
//! Log level is controlled by `BLAST_LOG`, e.g. `BLAST_LOG=debug blast-testgen`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::state::{AppState, LogLevel};

pub const LOG_ENV: &str = "BLAST_LOG";

/// Install the file subscriber. Returns the log directory.
pub fn init() -> std::io::Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "blast-testgen.log");

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("blast_testgen=info,warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init();

    tracing::info!(dir = %log_dir.display(), "blast-testgen starting");
    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("blast-testgen").join("logs")
}

pub fn log(state: &mut AppState, level: LogLevel, msg: impl Into<String>) {
    let text = msg.into();

    match level {
        LogLevel::Error => tracing::error!("{text}"),
        LogLevel::Warn => tracing::warn!("{text}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{text}"),
    }

    state.push_log(level, text);
}

pub fn log_status(state: &mut AppState, msg: impl Into<String>) {
    log(state, LogLevel::Info, msg);
}
