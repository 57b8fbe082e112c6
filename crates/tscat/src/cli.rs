//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tscat_config::Config;

/// Query, check and convert Qt Linguist translation catalogs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (.ts or compiled .json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Locale overriding the catalog's language, e.g. `ru_RU`
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Log filter, e.g. `debug` or `tscat_catalog=trace`
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Translate a source string
    Lookup {
        /// Context name, usually the UI class
        context: String,
        /// Source text as written in the application
        source: String,
        /// Disambiguation comment
        #[arg(short, long)]
        disambiguation: Option<String>,
    },
    /// Translate a plural source string for a count
    Plural {
        context: String,
        source: String,
        count: u64,
        #[arg(short, long)]
        disambiguation: Option<String>,
    },
    /// Show translation progress
    Stats {
        /// Break the numbers down per context
        #[arg(long)]
        by_context: bool,
    },
    /// Check placeholders, plural forms and duplicate keys
    Validate,
    /// Write the compiled JSON form of the catalog
    Compile {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Re-serialize a .ts catalog
    Rewrite {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List context names
    Contexts,
}

impl Command {
    /// Name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "lookup",
            Self::Plural { .. } => "plural",
            Self::Stats { .. } => "stats",
            Self::Validate => "validate",
            Self::Compile { .. } => "compile",
            Self::Rewrite { .. } => "rewrite",
            Self::Contexts => "contexts",
        }
    }
}

impl Args {
    /// Command line options win over file and environment settings.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(catalog) = &self.catalog {
            config.catalog.path = Some(catalog.clone());
        }
        if let Some(locale) = &self.locale {
            config.catalog.locale = Some(locale.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
