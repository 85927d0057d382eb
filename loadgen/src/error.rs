//! Error types for load generator setup and task execution

use thiserror::Error;

/// Errors that prevent a load test from starting
#[derive(Debug, Error)]
pub enum LoadGenError {
    #[error("Invalid wait time: min={min}s, max={max}s")]
    InvalidWaitTime { min: f64, max: f64 },

    #[error("Invalid target host: {0}")]
    InvalidTargetHost(String),

    #[error("Request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("At least one simulated user is required")]
    NoUsers,

    #[error("Task set is empty")]
    NoTasks,

    #[error("Total task weight overflows u32 when registering {0}")]
    WeightOverflow(&'static str),

    #[error("Task weight must be greater than zero: {0}")]
    ZeroWeight(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised by a single task invocation.
///
/// Non-2xx responses are not errors; only failures to produce a response are.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}
