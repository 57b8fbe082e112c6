//! Translation progress statistics, counted the way lrelease reports them.

use crate::model::{TranslationState, TranslationText, TsDocument};
use serde::Serialize;

/// Counts for a set of messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Live messages (finished + unfinished)
    pub total: usize,
    /// Finished with non-empty text
    pub finished: usize,
    /// Unfinished, or finished but empty
    pub unfinished: usize,
    /// Vanished and obsolete, not part of `total`
    pub obsolete: usize,
    /// Live numerus messages
    pub plural: usize,
}

impl Counts {
    fn record(&mut self, state: TranslationState, text: &TranslationText, numerus: bool) {
        if !state.is_live() {
            self.obsolete += 1;
            return;
        }
        self.total += 1;
        if numerus {
            self.plural += 1;
        }
        if state == TranslationState::Finished && !text.is_empty() {
            self.finished += 1;
        } else {
            self.unfinished += 1;
        }
    }

    /// Share of live messages that are finished, 0.0 to 100.0.
    /// A set with nothing to translate counts as complete.
    pub fn coverage_percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.finished as f64 / self.total as f64 * 100.0
        }
    }
}

/// Per-context breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextCoverage {
    pub name: String,
    pub counts: Counts,
}

/// Whole-document statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub language: Option<String>,
    pub overall: Counts,
    /// In document order
    pub contexts: Vec<ContextCoverage>,
}

impl Statistics {
    pub fn from_document(document: &TsDocument) -> Self {
        let mut overall = Counts::default();
        let contexts = document
            .contexts
            .iter()
            .map(|context| {
                let mut counts = Counts::default();
                for message in &context.messages {
                    let translation = &message.translation;
                    counts.record(translation.state, &translation.text, message.numerus);
                    overall.record(translation.state, &translation.text, message.numerus);
                }
                ContextCoverage {
                    name: context.name.clone(),
                    counts,
                }
            })
            .collect();

        Self {
            language: document.language.clone(),
            overall,
            contexts,
        }
    }

    /// Contexts with at least one unfinished message, least covered first.
    pub fn incomplete_contexts(&self) -> Vec<&ContextCoverage> {
        let mut incomplete: Vec<_> = self
            .contexts
            .iter()
            .filter(|c| c.counts.unfinished > 0)
            .collect();
        incomplete.sort_by(|a, b| {
            a.counts
                .coverage_percent()
                .total_cmp(&b.counts.coverage_percent())
                .then_with(|| a.name.cmp(&b.name))
        });
        incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Message, Translation};

    fn document() -> TsDocument {
        let mut vanished = Message::new("Old", Translation::finished("Alt"));
        vanished.translation.state = TranslationState::Vanished;
        TsDocument::new("de")
            .with_context(
                Context::new("A")
                    .with_message(Message::new("one", Translation::finished("eins")))
                    .with_message(Message::new("two", Translation::unfinished()))
                    .with_message(Message::new("%n x", Translation::plural(["%n a", "%n b"])))
                    .with_message(vanished),
            )
            .with_context(
                Context::new("B").with_message(Message::new("empty", Translation::finished(""))),
            )
    }

    #[test]
    fn test_overall_counts() {
        let stats = Statistics::from_document(&document());
        assert_eq!(
            stats.overall,
            Counts {
                total: 4,
                finished: 2,
                unfinished: 2,
                obsolete: 1,
                plural: 1,
            }
        );
        assert!((stats.overall.coverage_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_per_context_and_incomplete_order() {
        let stats = Statistics::from_document(&document());
        assert_eq!(stats.contexts.len(), 2);
        assert_eq!(stats.contexts[0].counts.finished, 2);
        let incomplete: Vec<_> = stats.incomplete_contexts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(incomplete, vec!["B", "A"]);
    }

    #[test]
    fn test_empty_document_is_complete() {
        let stats = Statistics::from_document(&TsDocument::default());
        assert_eq!(stats.overall.total, 0);
        assert!((stats.overall.coverage_percent() - 100.0).abs() < f64::EPSILON);
    }
}
