//! Document model of a Qt Linguist `.ts` file.
//!
//! This mirrors the file closely, including provenance and translator
//! comments, so a document can be written back without losing anything.
//! The runtime lookup table in [`crate::catalog`] is built from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line reference of a `<location>`: absolute, or relative to the previous
/// location when lupdate runs with `-locations relative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineRef {
    Absolute(u32),
    Relative(i32),
}

impl LineRef {
    /// Parse the `line` attribute value
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('+') || value.starts_with('-') {
            value.parse().ok().map(Self::Relative)
        } else {
            value.parse().ok().map(Self::Absolute)
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(line) => write!(f, "{line}"),
            Self::Relative(delta) => write!(f, "{delta:+}"),
        }
    }
}

/// Where a message was extracted from; advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub filename: String,
    pub line: Option<LineRef>,
}

impl Location {
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: filename.into(),
            line: Some(LineRef::Absolute(line)),
        }
    }
}

/// Translator workflow state of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationState {
    /// No `type` attribute: the translation is done
    #[default]
    Finished,
    Unfinished,
    /// The source string no longer exists in the application
    Vanished,
    /// Pre-5.x spelling of `Vanished`
    Obsolete,
}

impl TranslationState {
    /// Value of the `type` attribute, `None` for finished
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Parse the `type` attribute; unknown values are treated as unfinished
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            None => Self::Finished,
            Some("vanished") => Self::Vanished,
            Some("obsolete") => Self::Obsolete,
            Some(_) => Self::Unfinished,
        }
    }

    /// Whether the application still uses this message
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

/// Translation text: a single string or numerus forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationText {
    Single(String),
    Plural(Vec<String>),
}

impl TranslationText {
    /// True when no usable text is present
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }
}

impl Default for TranslationText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

/// The `<translation>` element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub state: TranslationState,
    pub text: TranslationText,
}

impl Translation {
    /// A finished single translation
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Finished,
            text: TranslationText::Single(text.into()),
        }
    }

    /// An unfinished translation with no text
    pub fn unfinished() -> Self {
        Self {
            state: TranslationState::Unfinished,
            text: TranslationText::default(),
        }
    }

    /// A finished set of numerus forms
    pub fn plural<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: TranslationState::Finished,
            text: TranslationText::Plural(forms.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether lookups may use this translation
    pub fn is_usable(&self) -> bool {
        self.state == TranslationState::Finished && !self.text.is_empty()
    }
}

/// One `<message>`: a translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Optional `id` attribute (id-based translations)
    pub id: Option<String>,
    /// `numerus="yes"`
    pub numerus: bool,
    pub locations: Vec<Location>,
    pub source: String,
    /// Disambiguation, the `<comment>` element
    pub comment: Option<String>,
    pub old_source: Option<String>,
    pub old_comment: Option<String>,
    /// Developer note for translators, `<extracomment>`
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub translation: Translation,
}

impl Message {
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        let numerus = matches!(translation.text, TranslationText::Plural(_));
        Self {
            source: source.into(),
            numerus,
            translation,
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Disambiguation as used in lookup keys
    pub fn disambiguation(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }
}

/// A `<context>` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    /// Context-level `<comment>`, rarely used
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// A whole `.ts` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsDocument {
    /// Format version, `2.1` for current lupdate
    pub version: String,
    /// Target language tag as written
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for TsDocument {
    fn default() -> Self {
        Self {
            version: "2.1".to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl TsDocument {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// Iterate over every message with its context name, in file order
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |m| (ctx.name.as_str(), m)))
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|ctx| ctx.messages.len()).sum()
    }
}
