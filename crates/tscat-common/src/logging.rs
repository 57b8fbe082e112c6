//! Structured logging infrastructure for tscat

use crate::error::{Result, TscatError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Options for the logging system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Log level filter (e.g., "info", "debug", "tscat_catalog=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human readable output
    pub json_format: bool,
    /// Optional file path for log output; stderr when absent
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Parses filter directives in `RUST_LOG` syntax.
///
/// `RUST_LOG` itself is not consulted here; the configuration layer folds
/// it into `level` so command line options can override it.
pub fn parse_filter(level: &str) -> Result<EnvFilter> {
    if level.trim().is_empty() {
        return Err(TscatError::Logging("empty log filter".to_string()));
    }
    EnvFilter::try_new(level)
        .map_err(|e| TscatError::Logging(format!("invalid log filter '{level}': {e}")))
}

/// Initialize the tracing subscriber with the given options.
///
/// Stdout is reserved for command output, so console logs go to stderr.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let env_filter = parse_filter(&options.level)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (&options.file_path, options.json_format) {
        (Some(path), json) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let file = std::sync::Mutex::new(file);
            if json {
                registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(options.include_targets)
                            .with_writer(file),
                    )
                    .try_init()
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_ansi(false)
                            .with_target(options.include_targets)
                            .with_writer(file),
                    )
                    .try_init()
            }
        }
        (None, true) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(options.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (None, false) => registry
            .with(
                fmt::layer()
                    .with_target(options.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| TscatError::Logging(e.to_string()))
}
