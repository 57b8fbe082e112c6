//! Error types for catalog loading and writing

use thiserror::Error;

/// Errors that can occur while loading, compiling or installing a catalog.
///
/// Lookups never produce these; a missing translation is not an error.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to read a catalog file
    #[error("Failed to load catalog file {path}: {source}")]
    ResourceLoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The XML itself is malformed
    #[error("Malformed XML at byte {position}: {source}")]
    XmlError {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// Well-formed XML that is not a valid `.ts` document
    #[error("Invalid catalog structure at byte {position}: {message}")]
    InvalidStructure { position: usize, message: String },

    /// The file extension names no known catalog format
    #[error("Unsupported catalog format: {path}")]
    UnsupportedFormat { path: String },

    /// A compiled catalog could not be encoded or decoded
    #[error("Compiled catalog error: {0}")]
    CompiledFormat(#[from] serde_json::Error),

    /// A process-wide catalog was already installed
    #[error("A catalog is already installed for this process")]
    AlreadyInstalled,
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
