//! Catalog types — selectable options in the canonical language plus their
//! per-language projections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Es,
    It,
}

impl Language {
    /// The authoring language. Every option has text in it.
    pub const CANONICAL: Language = Language::Fr;

    /// Languages every new option is translated into.
    pub const TARGETS: [Language; 3] = [Language::En, Language::Es, Language::It];

    /// Parse a two-letter code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Some(Self::Fr),
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "it" => Some(Self::It),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Es => "es",
            Self::It => "it",
        }
    }

    /// English name, used inside generator instructions.
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::Fr => "French",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::It => "Italian",
        }
    }
}

// ---------------------------------------------------------------------------
// Translations — the complete result of one translation call
// ---------------------------------------------------------------------------

/// Text for every target language. Only constructed once all targets are
/// present, so a value of this type is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translations(BTreeMap<Language, String>);

impl Translations {
    /// Build from a language map, returning the missing targets on failure.
    pub fn try_from_map(map: BTreeMap<Language, String>) -> Result<Self, Vec<Language>> {
        let missing: Vec<Language> = Language::TARGETS
            .iter()
            .copied()
            .filter(|lang| map.get(lang).map_or(true, |t| t.trim().is_empty()))
            .collect();
        if missing.is_empty() {
            Ok(Self(map))
        } else {
            Err(missing)
        }
    }

    pub fn get(&self, lang: Language) -> Option<&str> {
        self.0.get(&lang).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// LocalizedText — canonical text plus optional projections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText {
    pub canonical: String,
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub es: Option<String>,
    #[serde(default)]
    pub it: Option<String>,
}

impl LocalizedText {
    pub fn canonical_only(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            en: None,
            es: None,
            it: None,
        }
    }

    pub fn with_translations(canonical: impl Into<String>, translations: &Translations) -> Self {
        let owned = |lang| translations.get(lang).map(str::to_string);
        Self {
            canonical: canonical.into(),
            en: owned(Language::En),
            es: owned(Language::Es),
            it: owned(Language::It),
        }
    }

    /// Stored text for `lang`, if any. Canonical language always answers.
    pub fn get(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::Fr => Some(self.canonical.as_str()),
            Language::En => self.en.as_deref(),
            Language::Es => self.es.as_deref(),
            Language::It => self.it.as_deref(),
        }
    }

    /// Text for a requested language code, falling back to canonical text for
    /// unknown codes and missing or blank projections.
    pub fn project(&self, code: &str) -> &str {
        Language::from_code(code)
            .and_then(|lang| self.get(lang))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(self.canonical.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stored entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlavorOption {
    pub id: i64,
    /// Free-text grouping label ("Antipasti", "Dolci", ...).
    pub category: String,
    pub text: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtmosphereOption {
    pub id: i64,
    pub text: LocalizedText,
}

// ---------------------------------------------------------------------------
// Public projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionView {
    pub id: i64,
    pub text: String,
}

/// Catalog as served to guests: `{servers, flavors, atmospheres}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogView {
    pub servers: Vec<String>,
    pub flavors: BTreeMap<String, Vec<OptionView>>,
    pub atmospheres: Vec<OptionView>,
}
