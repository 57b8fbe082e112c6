//! Application-wide error type.

use thiserror::Error;

/// Result type alias for tscat operations.
pub type Result<T> = std::result::Result<T, TscatError>;

/// Main error type shared by the tscat crates.
#[derive(Error, Debug)]
pub enum TscatError {
    /// Configuration related errors.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TscatError {
    /// Creates a configuration error wrapping its cause.
    pub fn config_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
