//! Console game configuration.

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_reversi::{ExecutorSettings, PlayerMode};
use tracing::{debug, info, instrument};

/// Settings for a console game. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ReversiConfig {
    /// Where the game is saved after every change.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Pause before an automated move, in milliseconds.
    #[serde(default = "default_automated_delay_ms")]
    automated_delay_ms: u64,

    /// Animate placements one cell at a time.
    #[serde(default = "default_animate")]
    animate: bool,

    /// Pause between animated cells, in milliseconds.
    #[serde(default = "default_animation_step_ms")]
    animation_step_ms: u64,

    /// Mode forced on dark at start-up.
    #[serde(default)]
    dark: Option<PlayerMode>,

    /// Mode forced on light at start-up.
    #[serde(default)]
    light: Option<PlayerMode>,
}

#[instrument]
fn default_save_path() -> PathBuf {
    PathBuf::from("reversi_save.txt")
}

#[instrument]
fn default_automated_delay_ms() -> u64 {
    2000
}

#[instrument]
fn default_animate() -> bool {
    true
}

#[instrument]
fn default_animation_step_ms() -> u64 {
    60
}

impl Default for ReversiConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            automated_delay_ms: default_automated_delay_ms(),
            animate: default_animate(),
            animation_step_ms: default_animation_step_ms(),
            dark: None,
            light: None,
        }
    }
}

impl ReversiConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(save_path = %config.save_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file named by `--config`, or the defaults, then applies
    /// the remaining flags on top.
    #[instrument(skip(args))]
    pub fn resolve(args: &PlayArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(save) = &args.save {
            config.save_path = save.clone();
        }
        if args.dark.is_some() {
            config.dark = args.dark;
        }
        if args.light.is_some() {
            config.light = args.light;
        }
        if args.no_animation {
            config.animate = false;
        }
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Executor settings derived from this configuration.
    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            automated_delay: Duration::from_millis(self.automated_delay_ms),
            animate: self.animate,
        }
    }

    /// Pause between animated cells.
    pub fn animation_step(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
