//! Immutable translation lookup table.
//!
//! # Invariants
//!
//! 1. **Lookups never fail**: a missing key, an unfinished entry or an
//!    empty translation all resolve to the source text.
//! 2. **Built once**: the table is constructed from a document or a
//!    compiled catalog and has no mutation path afterwards.
//! 3. **Thread safety**: `Catalog` is `Send + Sync`; lookups take `&self`.
//!
//! Keys are (context, source, disambiguation). An absent disambiguation and
//! an empty one are the same key.

use crate::error::CatalogResult;
use crate::locale::Locale;
use crate::model::{TranslationState, TranslationText, TsDocument};
use crate::placeholder::substitute_count;
use crate::plural::PluralRule;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Runtime value stored for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Present in the catalog but unusable at runtime (unfinished or empty)
    Untranslated,
    Single(String),
    Plural(Vec<String>),
}

impl Entry {
    pub(crate) fn from_translation(state: TranslationState, text: &TranslationText) -> Self {
        if state != TranslationState::Finished || text.is_empty() {
            return Self::Untranslated;
        }
        match text {
            TranslationText::Single(text) => Self::Single(text.clone()),
            TranslationText::Plural(forms) => Self::Plural(forms.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct Variant {
    disambiguation: String,
    entry: Entry,
}

/// Messages of one context keyed by source text. Variants differ only in
/// their disambiguation and are few, so a short list is enough.
type ContextTable = HashMap<String, Vec<Variant>>;

/// Immutable translation catalog for one target language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: Option<Locale>,
    source_language: Option<String>,
    rule: PluralRule,
    contexts: HashMap<String, ContextTable>,
    len: usize,
}

impl Catalog {
    /// Build the lookup table from a parsed document.
    ///
    /// Vanished and obsolete messages are left out. When a key appears more
    /// than once the first occurrence wins.
    pub fn from_document(document: &TsDocument) -> CatalogResult<Self> {
        let locale = document
            .language
            .as_deref()
            .map(Locale::parse)
            .transpose()?;

        let mut catalog = Self {
            rule: locale.as_ref().map(Locale::plural_rule).unwrap_or_default(),
            locale,
            source_language: document.source_language.clone(),
            ..Self::default()
        };

        for (context, message) in document.messages() {
            if !message.translation.state.is_live() {
                continue;
            }
            let entry = Entry::from_translation(message.translation.state, &message.translation.text);
            let inserted = catalog.insert(
                context,
                &message.source,
                message.disambiguation().unwrap_or_default(),
                entry,
            );
            if !inserted {
                warn!(
                    context,
                    source = %message.source,
                    "Duplicate message in catalog, keeping the first occurrence"
                );
            }
        }

        debug!(
            language = catalog.language().unwrap_or("<none>"),
            entries = catalog.len,
            contexts = catalog.contexts.len(),
            "Built translation catalog"
        );
        Ok(catalog)
    }

    /// Used by the builders only; returns false for duplicates.
    pub(crate) fn insert(
        &mut self,
        context: &str,
        source: &str,
        disambiguation: &str,
        entry: Entry,
    ) -> bool {
        let variants = self
            .contexts
            .entry(context.to_string())
            .or_default()
            .entry(source.to_string())
            .or_default();

        if variants.iter().any(|v| v.disambiguation == disambiguation) {
            return false;
        }
        variants.push(Variant {
            disambiguation: disambiguation.to_string(),
            entry,
        });
        self.len += 1;
        true
    }

    pub(crate) fn with_metadata(
        locale: Option<Locale>,
        source_language: Option<String>,
    ) -> Self {
        Self {
            rule: locale.as_ref().map(Locale::plural_rule).unwrap_or_default(),
            locale,
            source_language,
            ..Self::default()
        }
    }

    /// Replace the active locale, and with it the plural rule.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.rule = locale.plural_rule();
        self.locale = Some(locale);
        self
    }

    fn entry(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&Entry> {
        let disambiguation = disambiguation.unwrap_or_default();
        self.contexts
            .get(context)?
            .get(source)?
            .iter()
            .find(|v| v.disambiguation == disambiguation)
            .map(|v| &v.entry)
    }

    /// Translate `source` in `context`.
    ///
    /// Returns the finished translation, or `source` itself when the key is
    /// absent or not translated yet.
    pub fn lookup<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        disambiguation: Option<&str>,
    ) -> &'a str {
        match self.entry(context, source, disambiguation) {
            Some(Entry::Single(text)) => text,
            // A plural message looked up without a count: Qt hands back the
            // first form, or the source when that form is empty.
            Some(Entry::Plural(forms)) => forms
                .first()
                .filter(|form| !form.is_empty())
                .map_or(source, String::as_str),
            Some(Entry::Untranslated) => {
                trace!(context, source, "Translation unfinished, using source text");
                source
            }
            None => {
                trace!(context, source, "No translation found, using source text");
                source
            }
        }
    }

    /// Translate a plural message for quantity `n`.
    ///
    /// Picks the numerus form the active rule assigns to `n` and replaces
    /// `%n` with its digits. Without a usable translation the source gets
    /// the same substitution.
    pub fn lookup_plural(&self, context: &str, source: &str, n: u64) -> String {
        self.lookup_plural_with_disambiguation(context, source, None, n)
    }

    /// [`lookup_plural`](Self::lookup_plural) with a disambiguation.
    pub fn lookup_plural_with_disambiguation(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: u64,
    ) -> String {
        let template = match self.entry(context, source, disambiguation) {
            Some(Entry::Plural(forms)) => self.pick_form(forms, n).unwrap_or(source),
            Some(Entry::Single(text)) => text.as_str(),
            Some(Entry::Untranslated) | None => {
                trace!(context, source, n, "No plural translation found, using source text");
                source
            }
        };
        substitute_count(template, n)
    }

    /// Form the rule assigns to `n`, clamped to the last stored form. An
    /// empty chosen form counts as missing.
    fn pick_form<'f>(&self, forms: &'f [String], n: u64) -> Option<&'f str> {
        let last = forms.len().checked_sub(1)?;
        let form = forms[self.rule.form_index(n).min(last)].as_str();
        (!form.is_empty()).then_some(form)
    }

    /// Whether the key exists, translated or not.
    pub fn contains(&self, context: &str, source: &str, disambiguation: Option<&str>) -> bool {
        self.entry(context, source, disambiguation).is_some()
    }

    /// Whether lookups for the key return a translation.
    pub fn is_translated(&self, context: &str, source: &str, disambiguation: Option<&str>) -> bool {
        matches!(
            self.entry(context, source, disambiguation),
            Some(Entry::Single(_) | Entry::Plural(_))
        )
    }

    /// Context names, unordered.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Every key with its runtime entry, unordered.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str, &str, &Entry)> {
        self.contexts.iter().flat_map(|(context, table)| {
            table.iter().flat_map(move |(source, variants)| {
                variants.iter().map(move |v| {
                    (
                        context.as_str(),
                        source.as_str(),
                        v.disambiguation.as_str(),
                        &v.entry,
                    )
                })
            })
        })
    }

    /// Number of keys in the catalog.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active locale, if the document declared one or one was set.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Active language tag as written.
    pub fn language(&self) -> Option<&str> {
        self.locale.as_ref().map(Locale::tag)
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    /// Plural rule used by [`lookup_plural`](Self::lookup_plural).
    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Message, Translation};

    fn catalog() -> Catalog {
        let doc = TsDocument::new("ug").with_context(
            Context::new("NotifyManager")
                .with_message(Message::new("Clear all", Translation::finished("ھەممىسىنى تازىلاش")))
                .with_message(Message::new(
                    "%n day(s) ago",
                    Translation::plural(["%n كۈن ئىلگىرى"]),
                ))
                .with_message(Message::new("Mouse", Translation::unfinished()))
                .with_message(Message::new("Open", Translation::finished("A")))
                .with_message(
                    Message::new("Open", Translation::finished("B")).with_comment("verb"),
                ),
        );
        Catalog::from_document(&doc).unwrap()
    }

    #[test]
    fn test_lookup_translated() {
        assert_eq!(
            catalog().lookup("NotifyManager", "Clear all", None),
            "ھەممىسىنى تازىلاش"
        );
    }

    #[test]
    fn test_lookup_unfinished_falls_back() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("NotifyManager", "Mouse", None), "Mouse");
        assert!(catalog.contains("NotifyManager", "Mouse", None));
        assert!(!catalog.is_translated("NotifyManager", "Mouse", None));
    }

    #[test]
    fn test_lookup_absent_is_identity() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("Unknown", "No such string", None), "No such string");
        assert_eq!(catalog.lookup("NotifyManager", "No such string", None), "No such string");
    }

    #[test]
    fn test_disambiguation_is_part_of_key() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("NotifyManager", "Open", None), "A");
        assert_eq!(catalog.lookup("NotifyManager", "Open", Some("")), "A");
        assert_eq!(catalog.lookup("NotifyManager", "Open", Some("verb")), "B");
        assert_eq!(catalog.lookup("NotifyManager", "Open", Some("noun")), "Open");
    }

    #[test]
    fn test_lookup_plural_single_form() {
        let catalog = catalog();
        for n in [0, 1, 3, 100] {
            assert_eq!(
                catalog.lookup_plural("NotifyManager", "%n day(s) ago", n),
                format!("{n} كۈن ئىلگىرى")
            );
        }
    }

    #[test]
    fn test_lookup_plural_fallback_substitutes_count() {
        assert_eq!(
            catalog().lookup_plural("Nowhere", "%n item(s)", 4),
            "4 item(s)"
        );
    }

    #[test]
    fn test_lookup_plural_uses_rule() {
        let doc = TsDocument::new("ru").with_context(Context::new("D").with_message(
            Message::new("%n file(s)", Translation::plural(["%n файл", "%n файла", "%n файлов"])),
        ));
        let catalog = Catalog::from_document(&doc).unwrap();
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 1), "1 файл");
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 3), "3 файла");
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 5), "5 файлов");
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 21), "21 файл");
    }

    #[test]
    fn test_missing_forms_use_last() {
        let doc = TsDocument::new("ru").with_context(
            Context::new("D").with_message(Message::new("%n x", Translation::plural(["%n a"]))),
        );
        let catalog = Catalog::from_document(&doc).unwrap();
        assert_eq!(catalog.lookup_plural("D", "%n x", 5), "5 a");
    }

    #[test]
    fn test_lookup_empty_first_form_falls_back() {
        let doc = TsDocument::new("en").with_context(Context::new("D").with_message(
            Message::new("%n file(s)", Translation::plural(["", "%n files"])),
        ));
        let catalog = Catalog::from_document(&doc).unwrap();
        assert_eq!(catalog.lookup("D", "%n file(s)", None), "%n file(s)");
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 1), "1 file(s)");
        assert_eq!(catalog.lookup_plural("D", "%n file(s)", 2), "2 files");
    }

    #[test]
    fn test_with_locale_changes_rule() {
        let catalog = catalog().with_locale(Locale::parse("en").unwrap());
        assert_eq!(catalog.plural_rule(), PluralRule::OneOther);
        assert_eq!(catalog.language(), Some("en"));
    }

    #[test]
    fn test_vanished_excluded_and_duplicates_keep_first() {
        let mut vanished = Message::new("Old", Translation::finished("Alt"));
        vanished.translation.state = TranslationState::Vanished;
        let doc = TsDocument::new("de").with_context(
            Context::new("C")
                .with_message(vanished)
                .with_message(Message::new("Dup", Translation::finished("first")))
                .with_message(Message::new("Dup", Translation::finished("second"))),
        );
        let catalog = Catalog::from_document(&doc).unwrap();
        assert!(!catalog.contains("C", "Old", None));
        assert_eq!(catalog.lookup("C", "Dup", None), "first");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
