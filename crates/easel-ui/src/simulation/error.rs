use std::path::PathBuf;

use thiserror::Error;

use super::config::{MAX_DIMENSION, MAX_FPS};

/// Invalid or unreadable simulation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid window size {width}x{height}: each side must be 1..={}", MAX_DIMENSION)]
    InvalidDimension { width: u32, height: u32 },

    #[error("invalid target frame rate {0}: must be 1..={}", MAX_FPS)]
    InvalidFrameRate(u32),

    #[error("window title must not be empty")]
    EmptyTitle,

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Why [`Simulation::run`](super::Simulation::run) failed.
#[derive(Error, Debug)]
pub enum SimError {
    /// A hook or element callback returned an error.
    #[error("{origin} failed")]
    Callback {
        origin: String,
        #[source]
        source: anyhow::Error,
    },

    /// Window, GPU or presentation failure.
    #[error("platform error: {0:#}")]
    Platform(anyhow::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SimError {
    pub(crate) fn callback(origin: impl Into<String>, source: anyhow::Error) -> Self {
        SimError::Callback { origin: origin.into(), source }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, SimError::Config(_))
    }
}
