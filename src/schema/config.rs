//! Configuration types for the simulation engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Seed;
use crate::compute::{DEFAULT_ALIVE_PROBABILITY, DEFAULT_DIMENSION, Dimensions, GridError};
use crate::runtime::{DEFAULT_INTERVAL_MS, Interval, SchedulerError};

fn default_alive_probability() -> f64 {
    DEFAULT_ALIVE_PROBABILITY
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid rows, in `[10, 100]`.
    pub rows: usize,
    /// Grid columns, in `[10, 100]`.
    pub cols: usize,
    /// Delay between scheduled generations in milliseconds, in `[50, 2000]`.
    pub interval_ms: u64,
    /// Alive share used by the randomize command.
    #[serde(default = "default_alive_probability")]
    pub alive_probability: f64,
    /// Initial grid content.
    #[serde(default)]
    pub seed: Seed,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMENSION,
            cols: DEFAULT_DIMENSION,
            interval_ms: DEFAULT_INTERVAL_MS,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            seed: Seed::default(),
        }
    }
}

impl EngineConfig {
    /// Validated grid shape.
    pub fn dimensions(&self) -> Result<Dimensions, GridError> {
        Dimensions::new(self.rows, self.cols)
    }

    /// Validated run-loop interval.
    pub fn interval(&self) -> Result<Interval, SchedulerError> {
        Interval::from_millis(self.interval_ms)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions()?;
        self.interval()?;
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::InvalidProbability(self.alive_probability));
        }
        self.seed.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Interval(#[from] SchedulerError),
    #[error("Alive probability {0} must be within [0, 1]")]
    InvalidProbability(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
