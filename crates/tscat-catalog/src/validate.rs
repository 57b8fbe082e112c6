//! Consistency checks over a parsed document.
//!
//! Only finished translations are checked for content; unfinished ones are
//! work in progress and vanished ones are ignored at runtime.

use crate::locale::Locale;
use crate::model::{Message, TranslationState, TranslationText, TsDocument};
use crate::placeholder::{has_count, positional};
use crate::plural::PluralRule;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Kind of problem found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The document's `language` attribute does not parse
    InvalidLanguage(String),
    /// Another live message already uses this key
    DuplicateKey,
    /// `%N` markers in the translation differ from the source
    PlaceholderMismatch {
        expected: BTreeSet<u8>,
        found: BTreeSet<u8>,
    },
    /// Numerus form count differs from what the language's rule needs
    FormCountMismatch { expected: usize, found: usize },
    /// The source uses `%n` but this numerus form does not
    MissingCount { form: usize },
    /// Numerus forms on a message without `numerus="yes"`
    UnexpectedNumerus,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLanguage(tag) => write!(f, "invalid language tag '{tag}'"),
            Self::DuplicateKey => f.write_str("duplicate message key"),
            Self::PlaceholderMismatch { expected, found } => {
                write!(f, "placeholders {found:?} do not match source {expected:?}")
            }
            Self::FormCountMismatch { expected, found } => {
                write!(f, "{found} numerus forms, language needs {expected}")
            }
            Self::MissingCount { form } => write!(f, "numerus form {form} lacks %n"),
            Self::UnexpectedNumerus => f.write_str("numerus forms on a non-numerus message"),
        }
    }
}

/// One finding, located by message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub context: String,
    pub source: String,
    pub disambiguation: Option<String>,
    pub kind: IssueKind,
}

impl ValidationIssue {
    fn new(context: &str, message: &Message, kind: IssueKind) -> Self {
        Self {
            context: context.to_string(),
            source: message.source.clone(),
            disambiguation: message.disambiguation().map(str::to_string),
            kind,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.context, self.source)?;
        if let Some(disambiguation) = &self.disambiguation {
            write!(f, " ({disambiguation})")?;
        }
        write!(f, ": {}", self.kind)
    }
}

/// Every issue found in a document, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub messages_checked: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check a document for problems lrelease would warn about.
pub fn validate(document: &TsDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    let rule = match document.language.as_deref().map(Locale::parse) {
        Some(Ok(locale)) => Some(locale.plural_rule()),
        Some(Err(_)) => {
            let tag = document.language.clone().unwrap_or_default();
            report.issues.push(ValidationIssue {
                context: String::new(),
                source: String::new(),
                disambiguation: None,
                kind: IssueKind::InvalidLanguage(tag),
            });
            None
        }
        None => None,
    };

    let mut seen = HashSet::new();
    for (context, message) in document.messages() {
        if !message.translation.state.is_live() {
            continue;
        }
        report.messages_checked += 1;

        let key = (context, message.source.as_str(), message.disambiguation());
        if !seen.insert(key) {
            report
                .issues
                .push(ValidationIssue::new(context, message, IssueKind::DuplicateKey));
        }

        if message.translation.state == TranslationState::Finished {
            check_message(context, message, rule, &mut report.issues);
        }
    }

    if report.is_clean() {
        debug!(messages = report.messages_checked, "Catalog validated cleanly");
    } else {
        warn!(issues = report.len(), "Catalog validation found issues");
    }
    report
}

fn check_message(
    context: &str,
    message: &Message,
    rule: Option<PluralRule>,
    issues: &mut Vec<ValidationIssue>,
) {
    let expected = positional(&message.source);
    let mut push = |kind| issues.push(ValidationIssue::new(context, message, kind));

    match &message.translation.text {
        TranslationText::Single(text) => {
            if !text.is_empty() {
                let found = positional(text);
                if found != expected {
                    push(IssueKind::PlaceholderMismatch {
                        expected: expected.clone(),
                        found,
                    });
                }
            }
        }
        TranslationText::Plural(forms) => {
            if !message.numerus {
                push(IssueKind::UnexpectedNumerus);
            }
            if let Some(rule) = rule {
                if forms.len() != rule.form_count() {
                    push(IssueKind::FormCountMismatch {
                        expected: rule.form_count(),
                        found: forms.len(),
                    });
                }
            }
            let source_has_count = has_count(&message.source);
            for (index, form) in forms.iter().enumerate().filter(|(_, f)| !f.is_empty()) {
                if source_has_count && !has_count(form) {
                    push(IssueKind::MissingCount { form: index });
                }
                let found = positional(form);
                if found != expected {
                    push(IssueKind::PlaceholderMismatch {
                        expected: expected.clone(),
                        found,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Translation};

    fn kinds(report: &ValidationReport) -> Vec<&IssueKind> {
        report.issues.iter().map(|i| &i.kind).collect()
    }

    #[test]
    fn test_clean_document() {
        let doc = TsDocument::new("de").with_context(
            Context::new("C")
                .with_message(Message::new("Saved %1 of %2", Translation::finished("%2: %1")))
                .with_message(Message::new("%n file(s)", Translation::plural(["%n Datei", "%n Dateien"])))
                .with_message(Message::new("Quit %1", Translation::unfinished())),
        );
        let report = validate(&doc);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.messages_checked, 3);
    }

    #[test]
    fn test_placeholder_mismatch() {
        let doc = TsDocument::new("de").with_context(
            Context::new("C").with_message(Message::new("Saved %1 of %2", Translation::finished("%1 gespeichert"))),
        );
        let report = validate(&doc);
        assert_eq!(
            kinds(&report),
            vec![&IssueKind::PlaceholderMismatch {
                expected: BTreeSet::from([1, 2]),
                found: BTreeSet::from([1]),
            }]
        );
        assert!(report.issues[0].to_string().starts_with("C: \"Saved %1 of %2\""));
    }

    #[test]
    fn test_duplicate_key() {
        let doc = TsDocument::new("de").with_context(
            Context::new("C")
                .with_message(Message::new("Open", Translation::finished("a")))
                .with_message(Message::new("Open", Translation::finished("b")))
                .with_message(Message::new("Open", Translation::finished("c")).with_comment("verb")),
        );
        assert_eq!(kinds(&validate(&doc)), vec![&IssueKind::DuplicateKey]);
    }

    #[test]
    fn test_form_count_and_missing_count() {
        let doc = TsDocument::new("ru").with_context(
            Context::new("C").with_message(Message::new(
                "%n file(s)",
                Translation::plural(["%n файл", "файла"]),
            )),
        );
        assert_eq!(
            kinds(&validate(&doc)),
            vec![
                &IssueKind::FormCountMismatch { expected: 3, found: 2 },
                &IssueKind::MissingCount { form: 1 },
            ]
        );
    }

    #[test]
    fn test_unexpected_numerus() {
        let mut message = Message::new("x", Translation::plural(["y"]));
        message.numerus = false;
        let doc = TsDocument::new("ug").with_context(Context::new("C").with_message(message));
        assert_eq!(kinds(&validate(&doc)), vec![&IssueKind::UnexpectedNumerus]);
    }

    #[test]
    fn test_invalid_language_reported() {
        let doc = TsDocument::new("not a tag!");
        assert!(matches!(
            kinds(&validate(&doc))[..],
            [IssueKind::InvalidLanguage(_)]
        ));
    }

    #[test]
    fn test_vanished_messages_skipped() {
        let mut message = Message::new("Saved %1", Translation::finished("nope"));
        message.translation.state = TranslationState::Vanished;
        let doc = TsDocument::new("de").with_context(Context::new("C").with_message(message));
        let report = validate(&doc);
        assert!(report.is_clean());
        assert_eq!(report.messages_checked, 0);
    }
}
