//! Glyphnet - online digit recognition on 15x15 pixel grids
//!
//! This library implements a single-layer neural network that learns to
//! recognize handwritten digits from labeled samples, one at a time, using a
//! reinforcement-style weight update instead of gradient descent. The
//! network core lives in [`network`], sample acquisition in [`samples`], and
//! the training/evaluation loop in [`session`].

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod network;
pub mod samples;
pub mod session;

// Re-export commonly used items for easier access
pub use network::{Connection, Network, NetworkError, Neuron};
pub use network::{CLASS_COUNT, GRID_HEIGHT, GRID_WIDTH, INPUT_COUNT};
pub use samples::{GlyphSource, GridSample, SampleError, SampleSource};
pub use session::{Mode, Session, SessionError, SessionStats, StepObserver, StepOutcome, StopFlag};

use serde::{Deserialize, Serialize};

/// Main configuration structure for a recognizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphnetConfig {
    /// Noise level applied by the sample source; 0 disables corruption.
    pub noise_level: u32,
    /// Number of training steps the demo performs.
    pub training_steps: u64,
    /// Number of frozen evaluation steps performed after training.
    pub evaluation_steps: u64,
    /// Steps between progress log lines.
    pub status_interval: u64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GlyphnetConfig {
    fn default() -> Self {
        GlyphnetConfig {
            noise_level: 0,
            training_steps: 5_000,
            evaluation_steps: 500,
            status_interval: 500,
            rng_seed: None,
        }
    }
}

impl GlyphnetConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from: {}", path);
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        let config = serde_yaml::from_str(&raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    ReadError(String),
    /// The file contents are not valid YAML for this configuration.
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(msg) => write!(f, "config read error: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
