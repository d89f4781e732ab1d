//! Scan schedule and logging configuration.
//!
//! Every field has a default, so an empty JSON object (or no configuration
//! at all) gives the stock behavior: ten scans spread over the first ten
//! seconds, then two follow-up scans after every batch of DOM mutations.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SCAN_DELAY_MS;

pub const DEFAULT_INITIAL_SCANS_MS: [u32; 10] = [500, 1000, 1500, 2000, 2500, 3000, 4000, 5000, 7000, 10_000];
pub const DEFAULT_MUTATION_RESCANS_MS: [u32; 2] = [100, 500];

/// Error returned by [`AnnotatorConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} delay {value}ms exceeds the {max}ms limit")]
    DelayTooLong { field: &'static str, value: u32, max: u32 },
}

/// Verbosity of diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotatorConfig {
    /// Delays after start-up at which a full pass runs.
    pub initial_scans_ms: Vec<u32>,
    /// Delays after each mutation batch at which a full pass runs.
    pub mutation_rescans_ms: Vec<u32>,
    /// Watch the document body for changes.
    pub observe_mutations: bool,
    pub log_level: LogLevel,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            initial_scans_ms: DEFAULT_INITIAL_SCANS_MS.to_vec(),
            mutation_rescans_ms: DEFAULT_MUTATION_RESCANS_MS.to_vec(),
            observe_mutations: true,
            log_level: LogLevel::default(),
        }
    }
}

impl AnnotatorConfig {
    /// Parse and validate configuration JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject delays longer than [`MAX_SCAN_DELAY_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_delays("initial_scans_ms", &self.initial_scans_ms)?;
        check_delays("mutation_rescans_ms", &self.mutation_rescans_ms)
    }
}

fn check_delays(field: &'static str, delays: &[u32]) -> Result<(), ConfigError> {
    match delays.iter().find(|&&value| value > MAX_SCAN_DELAY_MS) {
        Some(&value) => Err(ConfigError::DelayTooLong { field, value, max: MAX_SCAN_DELAY_MS }),
        None => Ok(()),
    }
}
