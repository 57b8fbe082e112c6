//! Compiled catalog form.
//!
//! A compiled catalog holds only what lookups need: the usable translations
//! with their keys and the language metadata. It is stored as JSON and loads
//! without an XML pass.

use crate::catalog::{Catalog, Entry};
use crate::error::CatalogResult;
use crate::locale::Locale;
use crate::model::{TranslationState, TranslationText};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Current compiled format version
pub const COMPILED_FORMAT_VERSION: u32 = 1;

/// One usable translation in compiled form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledEntry {
    pub context: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
    pub text: TranslationText,
}

/// Serializable snapshot of a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCatalog {
    pub format_version: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
    pub entries: Vec<CompiledEntry>,
}

impl CompiledCatalog {
    /// Encode as pretty-printed JSON
    pub fn to_json(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON
    pub fn from_json(input: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

impl Catalog {
    /// Snapshot the usable translations. Entries are sorted by key so the
    /// output is stable across runs.
    pub fn compile(&self) -> CompiledCatalog {
        let mut entries: Vec<CompiledEntry> = self
            .entries()
            .filter_map(|(context, source, disambiguation, entry)| {
                let text = match entry {
                    Entry::Untranslated => return None,
                    Entry::Single(text) => TranslationText::Single(text.clone()),
                    Entry::Plural(forms) => TranslationText::Plural(forms.clone()),
                };
                Some(CompiledEntry {
                    context: context.to_string(),
                    source: source.to_string(),
                    disambiguation: (!disambiguation.is_empty()).then(|| disambiguation.to_string()),
                    text,
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            (&a.context, &a.source, &a.disambiguation).cmp(&(&b.context, &b.source, &b.disambiguation))
        });

        CompiledCatalog {
            format_version: COMPILED_FORMAT_VERSION,
            language: self.language().map(str::to_string),
            source_language: self.source_language().map(str::to_string),
            entries,
        }
    }

    /// Rebuild a catalog from its compiled form.
    ///
    /// A newer format version is accepted with a warning; unknown fields are
    /// ignored by the decoder.
    pub fn from_compiled(compiled: &CompiledCatalog) -> CatalogResult<Self> {
        if compiled.format_version > COMPILED_FORMAT_VERSION {
            warn!(
                found = compiled.format_version,
                supported = COMPILED_FORMAT_VERSION,
                "Compiled catalog is newer than this reader"
            );
        }

        let locale = compiled.language.as_deref().map(Locale::parse).transpose()?;
        let mut catalog = Self::with_metadata(locale, compiled.source_language.clone());

        for entry in &compiled.entries {
            let value = Entry::from_translation(TranslationState::Finished, &entry.text);
            if !catalog.insert(
                &entry.context,
                &entry.source,
                entry.disambiguation.as_deref().unwrap_or_default(),
                value,
            ) {
                warn!(
                    context = %entry.context,
                    source = %entry.source,
                    "Duplicate entry in compiled catalog, keeping the first occurrence"
                );
            }
        }

        debug!(entries = catalog.len(), "Loaded compiled catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Message, Translation, TsDocument};

    fn document() -> TsDocument {
        TsDocument::new("de").with_context(
            Context::new("MainWindow")
                .with_message(Message::new("Open", Translation::finished("Öffnen")))
                .with_message(
                    Message::new("Open", Translation::finished("Aufmachen")).with_comment("door"),
                )
                .with_message(Message::new("Quit", Translation::unfinished()))
                .with_message(Message::new(
                    "%n file(s)",
                    Translation::plural(["%n Datei", "%n Dateien"]),
                )),
        )
    }

    #[test]
    fn test_compile_keeps_usable_entries_only() {
        let compiled = Catalog::from_document(&document()).unwrap().compile();
        assert_eq!(compiled.format_version, COMPILED_FORMAT_VERSION);
        assert_eq!(compiled.language.as_deref(), Some("de"));
        assert_eq!(compiled.entries.len(), 3);
        assert!(compiled.entries.iter().all(|e| e.source != "Quit"));
    }

    #[test]
    fn test_compile_is_sorted() {
        let compiled = Catalog::from_document(&document()).unwrap().compile();
        let keys: Vec<_> = compiled
            .entries
            .iter()
            .map(|e| (e.source.as_str(), e.disambiguation.as_deref()))
            .collect();
        assert_eq!(
            keys,
            vec![("%n file(s)", None), ("Open", None), ("Open", Some("door"))]
        );
    }

    #[test]
    fn test_compiled_catalog_answers_like_source() {
        let original = Catalog::from_document(&document()).unwrap();
        let json = original.compile().to_json().unwrap();
        let loaded = Catalog::from_compiled(&CompiledCatalog::from_json(&json).unwrap()).unwrap();

        assert_eq!(loaded.lookup("MainWindow", "Open", None), "Öffnen");
        assert_eq!(loaded.lookup("MainWindow", "Open", Some("door")), "Aufmachen");
        assert_eq!(loaded.lookup("MainWindow", "Quit", None), "Quit");
        assert_eq!(loaded.lookup_plural("MainWindow", "%n file(s)", 2), "2 Dateien");
        assert_eq!(loaded.plural_rule(), original.plural_rule());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(CompiledCatalog::from_json("{not json").is_err());
    }
}
