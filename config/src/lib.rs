//! Configuration loading for Math Master.
//!
//! Reads `~/.mathmaster/config.toml`. Every key is optional; a missing file
//! means built-in defaults. Raw TOML structs stay private to this crate and are
//! resolved into validated [`GameSettings`] and [`DriverSettings`].
//!
//! ```toml
//! [game]
//! strategy = "digits"      # or "bands"
//! scoring = "streak"       # or "flat"
//! unlock_window = 15
//! unlock_threshold = 60
//! hints = 3
//!
//! [driver]
//! feedback_delay_ms = 2000
//! state_file = "~/.mathmaster/progress.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use mathmaster_types::{
    GameSettings, ScoringScheme, SettingsError, StrategyKind, UnlockPolicy,
};

const APP_DIR: &str = ".mathmaster";
const DEFAULT_FEEDBACK_DELAY_MS: u64 = 2_000;
const DEFAULT_STATE_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [game] settings: {0}")]
    Invalid(#[from] SettingsError),
}

#[derive(Debug, Default, Deserialize)]
pub struct MathConfig {
    game: Option<GameConfig>,
    driver: Option<DriverConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct GameConfig {
    strategy: Option<StrategyKind>,
    scoring: Option<ScoringScheme>,
    unlock_window: Option<u32>,
    /// Minimum window accuracy, in percent.
    unlock_threshold: Option<u32>,
    hints: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct DriverConfig {
    /// Pause between feedback and the next question.
    feedback_delay_ms: Option<u64>,
    /// Where progress is saved. `~/` expands to the home directory.
    state_file: Option<String>,
}

/// Resolved settings for the terminal driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSettings {
    pub feedback_delay: Duration,
    pub state_file: PathBuf,
}

impl MathConfig {
    /// Load the user config. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {}: {}", path.display(), err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Resolve `[game]` into validated settings, filling defaults.
    pub fn game_settings(&self) -> Result<GameSettings, ConfigError> {
        let defaults = GameSettings::default();
        let Some(game) = self.game.as_ref() else {
            return Ok(defaults);
        };

        let unlock = UnlockPolicy::new(
            game.unlock_window.unwrap_or(UnlockPolicy::DEFAULT_WINDOW),
            game.unlock_threshold
                .unwrap_or(UnlockPolicy::DEFAULT_THRESHOLD),
        )?;

        Ok(GameSettings {
            strategy: game.strategy.unwrap_or(defaults.strategy),
            scoring: game.scoring.unwrap_or(defaults.scoring),
            unlock,
            hints: game.hints.unwrap_or(defaults.hints),
        })
    }

    /// Resolve `[driver]`, falling back to `~/.mathmaster/progress.json`
    /// (or `./.mathmaster/progress.json` without a home directory).
    #[must_use]
    pub fn driver_settings(&self) -> DriverSettings {
        let driver = self.driver.as_ref();
        let feedback_delay = Duration::from_millis(
            driver
                .and_then(|d| d.feedback_delay_ms)
                .unwrap_or(DEFAULT_FEEDBACK_DELAY_MS),
        );
        let state_file = driver
            .and_then(|d| d.state_file.as_deref())
            .map(expand_home)
            .unwrap_or_else(default_state_path);
        DriverSettings {
            feedback_delay,
            state_file,
        }
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        MathConfig::default().driver_settings()
    }
}

/// `~/.mathmaster`, if the home directory is known.
#[must_use]
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("config.toml"))
}

fn default_state_path() -> PathBuf {
    app_dir()
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
        .join(DEFAULT_STATE_FILE)
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
