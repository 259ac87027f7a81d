//! Error types for Mindcoach
//!
//! The schedule and performance transforms never fail; these errors only come
//! from the edges (configuration, input decoding, payload encoding).

use thiserror::Error;

/// Errors that can occur while loading configuration or decoding/encoding payloads
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
