//! Configuration management
//!
//! Configuration is layered from:
//! - Configuration files (TOML)
//! - Environment variables
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LOG_LEVEL_ENV: &str = "DFA_SIM_LOG_LEVEL";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Structural analysis settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Alphabet to check totality against, one symbol per character.
    /// When unset the alphabet is inferred from the transitions.
    pub alphabet: Option<String>,
}

/// Graphviz export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Graphviz `rankdir` attribute (LR, TB, RL, BT)
    #[serde(default = "default_rankdir")]
    pub rankdir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rankdir() -> String {
    "LR".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rankdir: default_rankdir(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read config file {:?}: {}", path, e)))?;

        Self::from_toml(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./dfa-sim.toml
    /// 2. ~/.dfa-sim/config.toml
    /// 3. /etc/dfa-sim/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("dfa-sim.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".dfa-sim").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/dfa-sim/config.toml"));

        Self::load_from(&paths)
    }

    /// Load the first existing file among `paths`, or defaults if none exists
    pub fn load_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Effective log level: environment variable > config file
    pub fn log_level(&self) -> String {
        self.resolve_log_level(std::env::var(LOG_LEVEL_ENV).ok())
    }

    fn resolve_log_level(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| self.logging.level.clone())
    }

    fn validate(&self) -> Result<()> {
        match self.export.rankdir.as_str() {
            "LR" | "TB" | "RL" | "BT" => {}
            other => {
                return Err(Error::config(format!(
                    "Invalid rankdir '{}', expected one of LR, TB, RL, BT",
                    other
                )));
            }
        }

        if let Some(alphabet) = &self.analysis.alphabet
            && alphabet.is_empty()
        {
            return Err(Error::config("Analysis alphabet must not be empty"));
        }

        Ok(())
    }
}
