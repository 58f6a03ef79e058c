//! Error types for nbsim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected input: non-positive G or dt, negative softening,
    /// non-positive mass, mismatched array lengths, non-finite initial data.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A non-finite value showed up while integrating.
    #[error("numeric instability at step {step}: non-finite {quantity} on body {body}")]
    NumericInstability {
        step: u64,
        body: usize,
        quantity: &'static str,
    },

    /// `step` was called after a numeric instability without re-initializing.
    #[error("simulation diverged at step {step}; re-initialize before stepping")]
    Diverged { step: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
