//! Command execution.
//!
//! Commands return their output as text so the binary decides where it
//! goes and tests can inspect it.

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tscat_catalog::{
    load_catalog, load_document, save_compiled, save_document, validate, Catalog, CatalogFormat,
    Locale, Statistics, TsDocument,
};
use tscat_common::{escape_for_display, format_percent, truncate_string};
use tscat_config::Config;

/// Result of a command: text for stdout and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Runs commands against the configured catalog.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute one command
    pub fn run(&self, command: &Command) -> CliResult<Outcome> {
        debug!(command = command.name(), "Running command");
        match command {
            Command::Lookup {
                context,
                source,
                disambiguation,
            } => {
                let catalog = self.catalog()?;
                let text = catalog.lookup(context, source, disambiguation.as_deref());
                Ok(Outcome::ok(format!("{text}\n")))
            }
            Command::Plural {
                context,
                source,
                count,
                disambiguation,
            } => {
                let catalog = self.catalog()?;
                let text = catalog.lookup_plural_with_disambiguation(
                    context,
                    source,
                    disambiguation.as_deref(),
                    *count,
                );
                Ok(Outcome::ok(format!("{text}\n")))
            }
            Command::Stats { by_context } => {
                let document = self.document(command.name())?;
                Ok(Outcome::ok(self.render_stats(&document, *by_context)))
            }
            Command::Validate => {
                let document = self.document(command.name())?;
                Ok(self.render_validation(&document))
            }
            Command::Compile { output } => {
                let catalog = self.catalog()?;
                let entries = save_compiled(&catalog, output)?;
                Ok(Outcome::ok(format!(
                    "Compiled {entries} entries to {}\n",
                    output.display()
                )))
            }
            Command::Rewrite { output } => {
                let document = self.document(command.name())?;
                save_document(&document, output)?;
                Ok(Outcome::ok(format!(
                    "Wrote {} messages to {}\n",
                    document.message_count(),
                    output.display()
                )))
            }
            Command::Contexts => {
                let catalog = self.catalog()?;
                let mut names: Vec<&str> = catalog.contexts().collect();
                names.sort_unstable();
                let mut out = String::new();
                for name in names {
                    let _ = writeln!(out, "{name}");
                }
                Ok(Outcome::ok(out))
            }
        }
    }

    fn catalog_path(&self) -> CliResult<&Path> {
        self.config
            .catalog
            .path
            .as_deref()
            .ok_or(CliError::NoCatalog)
    }

    /// The lookup catalog, with the configured locale applied
    pub fn catalog(&self) -> CliResult<Catalog> {
        let catalog = load_catalog(self.catalog_path()?)?;
        match &self.config.catalog.locale {
            Some(tag) => {
                let locale = Locale::parse(tag)?;
                info!(locale = %locale, "Overriding catalog locale");
                Ok(catalog.with_locale(locale))
            }
            None => Ok(catalog),
        }
    }

    /// The `.ts` document; compiled catalogs lack workflow state
    fn document(&self, command: &'static str) -> CliResult<TsDocument> {
        let path = self.catalog_path()?;
        if CatalogFormat::from_path(path)? != CatalogFormat::Ts {
            return Err(CliError::SourceRequired {
                command,
                path: PathBuf::from(path),
            });
        }
        let mut document = load_document(path)?;
        if let Some(tag) = &self.config.catalog.locale {
            document.language = Some(Locale::parse(tag)?.tag().to_string());
        }
        Ok(document)
    }

    fn display(&self, text: &str) -> String {
        let escaped = escape_for_display(text);
        match self.config.output.truncate {
            0 => escaped,
            width => truncate_string(&escaped, width),
        }
    }

    fn render_stats(&self, document: &TsDocument, by_context: bool) -> String {
        let stats = Statistics::from_document(document);
        let overall = &stats.overall;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Language: {}",
            stats.language.as_deref().unwrap_or("(none)")
        );
        let _ = writeln!(
            out,
            "Messages: {} ({} finished, {} unfinished, {} plural)",
            overall.total, overall.finished, overall.unfinished, overall.plural
        );
        let _ = writeln!(out, "Obsolete: {}", overall.obsolete);
        let _ = writeln!(
            out,
            "Coverage: {}",
            format_percent(overall.finished, overall.total)
        );

        if by_context {
            let _ = writeln!(out);
            for context in &stats.contexts {
                let _ = writeln!(
                    out,
                    "{:>7}  {:>4}/{:<4}  {}",
                    format_percent(context.counts.finished, context.counts.total),
                    context.counts.finished,
                    context.counts.total,
                    self.display(&context.name)
                );
            }
        }
        out
    }

    fn render_validation(&self, document: &TsDocument) -> Outcome {
        let report = validate(document);
        let mut out = String::new();
        for issue in &report.issues {
            let _ = write!(out, "{}: {}", issue.context, self.display(&issue.source));
            if let Some(disambiguation) = &issue.disambiguation {
                let _ = write!(out, " ({})", self.display(disambiguation));
            }
            let _ = writeln!(out, ": {}", issue.kind);
        }
        let _ = writeln!(
            out,
            "{} issues in {} messages",
            report.len(),
            report.messages_checked
        );
        Outcome {
            output: out,
            success: report.is_clean(),
        }
    }
}
