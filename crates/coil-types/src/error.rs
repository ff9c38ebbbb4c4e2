use thiserror::Error;

/// Unified error type for all coil-core operations.
#[derive(Error, Debug)]
pub enum CoilError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Broadcast shape mismatch: {left} vs {right}")]
    ShapeMismatch { left: usize, right: usize },

    #[error("No valid optimum: all {n_samples} Q samples are NaN")]
    NoValidOptimum { n_samples: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the coil crates.
pub type CoilResult<T> = Result<T, CoilError>;
