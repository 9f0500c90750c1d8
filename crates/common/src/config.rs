//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clock::SAMPLE_TIME_DECIMALS;
use crate::error::{MondrianError, MondrianResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where exported path tables are written.
    pub output_dir: PathBuf,

    /// Recording session parameters.
    pub session: SessionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Recording session parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Seconds moved by rewind and fast-forward.
    pub jump_interval_secs: f64,

    /// Decimal places compared while the pointer is moving.
    pub high_resolution_decimals: u32,

    /// Decimal places compared while the pointer is idle.
    pub low_resolution_decimals: u32,

    /// Stroke weight assigned to new paths.
    pub stroke_weight: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mondrian=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs_default_output(),
            session: SessionDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            jump_interval_secs: 5.0,
            high_resolution_decimals: 2,
            low_resolution_decimals: 0,
            stroke_weight: 3.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl SessionDefaults {
    /// Reject values the recording engine cannot work with.
    pub fn validate(&self) -> MondrianResult<()> {
        if !self.jump_interval_secs.is_finite() || self.jump_interval_secs <= 0.0 {
            return Err(MondrianError::config(format!(
                "jump_interval_secs must be a positive number, got {}",
                self.jump_interval_secs
            )));
        }
        if self.low_resolution_decimals > self.high_resolution_decimals {
            return Err(MondrianError::config(
                "low_resolution_decimals must not exceed high_resolution_decimals",
            ));
        }
        if self.high_resolution_decimals > SAMPLE_TIME_DECIMALS {
            return Err(MondrianError::config(format!(
                "high_resolution_decimals must be at most {SAMPLE_TIME_DECIMALS}, \
                 the precision sample times are recorded at; got {}",
                self.high_resolution_decimals
            )));
        }
        if !self.stroke_weight.is_finite() || self.stroke_weight <= 0.0 {
            return Err(MondrianError::config("stroke_weight must be positive"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(config) => match config.session.validate() {
                        Ok(()) => return config,
                        Err(e) => {
                            tracing::warn!("Ignoring invalid config at {:?}: {}", config_path, e);
                        }
                    },
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("mondrian").join("config.json")
}

/// Default export directory.
fn dirs_default_output() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("mondrian").join("paths")
}
