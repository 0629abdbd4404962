//! Error types for the classification engine.

use thiserror::Error;

/// Errors that can occur while building a classifier.
///
/// Classifying a message never fails; these errors only signal a broken
/// configuration handed to the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is structurally invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialized configuration could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
