//! Math Master CLI - binary entry point.
//!
//! ```text
//! main() -> init_tracing() -> MathConfig::load() -> Session::new() -> Session::run(stdin)
//! ```
//!
//! Logs go to `~/.mathmaster/logs/mathmaster.log`, never to the terminal the
//! game is drawn on.

mod commands;
mod render;
mod session;
mod store;

use std::{
    fs::{self, OpenOptions},
    io::{self, stdout},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mathmaster_config::{DriverSettings, MathConfig, app_dir};
use mathmaster_core::{Game, RngRange};
use mathmaster_types::GameSettings;

use crate::session::Session;
use crate::store::ProgressStore;

fn main() -> Result<()> {
    init_tracing();

    let config = match MathConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Already logged by the loader; play on with defaults.
            eprintln!("Ignoring config: {err}");
            None
        }
    };
    let settings = match config.as_ref().map(MathConfig::game_settings).transpose() {
        Ok(settings) => settings.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("Invalid game settings, using defaults: {err}");
            eprintln!("Ignoring config: {err}");
            GameSettings::default()
        }
    };
    let driver = config
        .as_ref()
        .map(MathConfig::driver_settings)
        .unwrap_or_default();

    run(settings, &driver)
}

fn run(settings: GameSettings, driver: &DriverSettings) -> Result<()> {
    tracing::info!(
        strategy = settings.strategy.as_str(),
        scoring = settings.scoring.as_str(),
        state = %driver.state_file.display(),
        "Starting session"
    );

    let store = ProgressStore::new(driver.state_file.clone());
    let mut session = Session::new(
        Game::new(settings),
        store,
        RngRange::entropy(),
        driver.feedback_delay,
    )
    .context("start session")?;

    let stdin = io::stdin();
    session.run(stdin.lock(), &mut stdout())?;
    tracing::info!(
        score = session.progress().score,
        attempted = session.progress().total_attempted,
        "Session ended"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than interleave logs with questions.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.mathmaster/logs/mathmaster.log
    if let Some(dir) = app_dir() {
        candidates.push(dir.join("logs").join("mathmaster.log"));
    }

    // Fallback: ./.mathmaster/logs/mathmaster.log
    candidates.push(PathBuf::from(".mathmaster").join("logs").join("mathmaster.log"));

    candidates
}
