//! Numerus rules for plural form selection.
//!
//! A `.ts` numerus message stores its forms in the order the target
//! language's rule defines. The rule maps a quantity to an index into that
//! list; the category names are CLDR-style labels for those positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CLDR-style plural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plural rule families, one per distinct numerus table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluralRule {
    /// One form for every quantity (Uyghur, Japanese, Chinese, Turkish, ...)
    Single,
    /// `n == 1` singular, everything else plural (English, German, ...)
    OneOther,
    /// `n <= 1` singular (French, Brazilian Portuguese, ...)
    ZeroOrOneOther,
    Latvian,
    Irish,
    Romanian,
    Lithuanian,
    /// Russian, Ukrainian, Belarusian, Serbian, Croatian, Bosnian
    EastSlavic,
    CzechSlovak,
    Polish,
    Slovenian,
    Maltese,
    Welsh,
    Arabic,
    Macedonian,
    Icelandic,
}

impl Default for PluralRule {
    fn default() -> Self {
        Self::OneOther
    }
}

impl PluralRule {
    /// Pick the rule for a language, optionally refined by region.
    pub fn for_language(language: &str, region: Option<&str>) -> Self {
        match (language, region) {
            ("pt", Some("BR")) => return Self::ZeroOrOneOther,
            ("pt", _) => return Self::OneOther,
            _ => {}
        }

        match language {
            "bi" | "bo" | "dz" | "fa" | "fj" | "gn" | "hu" | "id" | "ja" | "jv" | "ko" | "ms"
            | "my" | "na" | "om" | "su" | "th" | "tt" | "tr" | "ug" | "vi" | "yo" | "za" | "zh" => {
                Self::Single
            }
            "fr" | "ak" | "am" | "bh" | "fil" | "tl" | "gun" | "hi" | "ln" | "mg" | "nso"
            | "ti" | "wa" | "oc" => Self::ZeroOrOneOther,
            "lv" => Self::Latvian,
            "ga" => Self::Irish,
            "ro" | "mo" => Self::Romanian,
            "lt" => Self::Lithuanian,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" | "sh" => Self::EastSlavic,
            "cs" | "sk" => Self::CzechSlovak,
            "pl" => Self::Polish,
            "sl" => Self::Slovenian,
            "mt" => Self::Maltese,
            "cy" => Self::Welsh,
            "ar" => Self::Arabic,
            "mk" => Self::Macedonian,
            "is" => Self::Icelandic,
            _ => Self::OneOther,
        }
    }

    /// Categories in numerus form order.
    pub fn categories(&self) -> &'static [PluralCategory] {
        use PluralCategory::{Few, Many, One, Other, Two, Zero};

        match self {
            Self::Single => &[Other],
            Self::OneOther | Self::ZeroOrOneOther | Self::Icelandic => &[One, Other],
            Self::Latvian => &[One, Other, Zero],
            Self::Irish => &[One, Two, Other],
            Self::Romanian => &[One, Few, Other],
            Self::Lithuanian => &[One, Few, Other],
            Self::EastSlavic | Self::Polish => &[One, Few, Many],
            Self::CzechSlovak => &[One, Few, Other],
            Self::Slovenian => &[One, Two, Few, Other],
            Self::Maltese => &[One, Few, Many, Other],
            Self::Welsh => &[One, Two, Many, Other],
            Self::Arabic => &[Zero, One, Two, Few, Many, Other],
            Self::Macedonian => &[One, Two, Other],
        }
    }

    /// Number of numerus forms a complete translation carries.
    pub fn form_count(&self) -> usize {
        self.categories().len()
    }

    /// Index of the numerus form used for `n`.
    ///
    /// Always less than [`form_count`](Self::form_count).
    pub fn form_index(&self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;

        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOrOneOther => usize::from(n > 1),
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=10).contains(&n100) {
                    1
                } else if (11..=19).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            Self::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            Self::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if (3..=10).contains(&n100) {
                    3
                } else if n100 >= 11 {
                    4
                } else {
                    5
                }
            }
            Self::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Icelandic => usize::from(!(n10 == 1 && n100 != 11)),
        }
    }

    /// Category the rule assigns to `n`.
    pub fn category(&self, n: u64) -> PluralCategory {
        self.categories()[self.form_index(n)]
    }
}
