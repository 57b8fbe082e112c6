//! Application-wide error types using thiserror.

use std::path::PathBuf;
use tscat_catalog::CatalogError;

/// Errors raised while running a command.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Catalog loading or writing failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Neither `--catalog`, `TSCAT_CATALOG` nor the config file named one.
    #[error("No catalog given; pass --catalog, set TSCAT_CATALOG or set catalog.path")]
    NoCatalog,

    /// The command reads workflow state only a `.ts` source carries.
    #[error("'{command}' needs a .ts source catalog, got {}", path.display())]
    SourceRequired {
        /// Command name.
        command: &'static str,
        /// The catalog that was given.
        path: PathBuf,
    },
}

/// Result type for command execution.
pub type CliResult<T> = Result<T, CliError>;
