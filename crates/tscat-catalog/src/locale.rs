//! Locale handling for catalog languages

use crate::error::{CatalogError, CatalogResult};
use crate::plural::PluralRule;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Target language of a catalog.
///
/// Accepts both the underscore form Qt writes (`zh_CN`) and BCP 47
/// (`zh-CN`). The original spelling is kept so documents re-serialize
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    id: LanguageIdentifier,
}

impl Locale {
    /// Parse a locale from a language code
    pub fn parse(tag: &str) -> CatalogResult<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidLanguageId(tag.to_string()));
        }
        let id: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| CatalogError::InvalidLanguageId(tag.to_string()))?;
        Ok(Self {
            tag: trimmed.to_string(),
            id,
        })
    }

    /// The tag exactly as written
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the short language code for this locale
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag, if any
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }

    /// Get the canonical BCP 47 form (`zh-CN`)
    pub fn bcp47(&self) -> String {
        self.id.to_string()
    }

    /// The numerus rule used for plural lookups in this locale
    pub fn plural_rule(&self) -> PluralRule {
        PluralRule::for_language(self.language(), self.region())
    }
}

impl FromStr for Locale {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
