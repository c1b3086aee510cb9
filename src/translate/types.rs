//! Request / result records and language helpers.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::LanguageConfig;

// ---------------------------------------------------------------------------
// LanguagePair
// ---------------------------------------------------------------------------

/// A `(source, target)` pair of ISO-639-1 codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Dictionary key for this direction, e.g. `"en-de"`.
    ///
    /// ```
    /// use voice_translator::translate::LanguagePair;
    ///
    /// assert_eq!(LanguagePair::new("en", "de").key(), "en-de");
    /// ```
    pub fn key(&self) -> String {
        pair_key(&self.source, &self.target)
    }

    /// The same pair in the opposite direction.
    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("en", "de")
    }
}

impl From<&LanguageConfig> for LanguagePair {
    fn from(cfg: &LanguageConfig) -> Self {
        Self::new(cfg.source.clone(), cfg.target.clone())
    }
}

/// Dictionary key for a `src -> dest` direction.
pub fn pair_key(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}

// ---------------------------------------------------------------------------
// TranslationRequest
// ---------------------------------------------------------------------------

/// One translation call. `text` is guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    text: String,
    languages: LanguagePair,
}

impl TranslationRequest {
    /// Returns `None` when `text` is empty or whitespace only.
    pub fn new(text: &str, languages: LanguagePair) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            languages,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.languages.source
    }

    pub fn target_lang(&self) -> &str {
        &self.languages.target
    }
}

// ---------------------------------------------------------------------------
// TranslationResult
// ---------------------------------------------------------------------------

/// Outcome of [`TranslationResolver::resolve`](crate::translate::TranslationResolver::resolve).
///
/// `translated_text` is empty only for empty input; every other outcome
/// carries a displayable string (at worst the "translation needed"
/// marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The input with surrounding whitespace trimmed, as it was sent to the
    /// backends. The fallback marker quotes this same trimmed text.
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Local>,
    /// `true` when the offline dictionary produced the text.
    pub is_fallback: bool,
    /// Name of the backend that produced the text, if a backend did.
    pub backend: Option<String>,
}

impl TranslationResult {
    pub(crate) fn new(
        original_text: &str,
        translated_text: String,
        languages: &LanguagePair,
        is_fallback: bool,
        backend: Option<&str>,
    ) -> Self {
        Self {
            original_text: original_text.to_string(),
            translated_text,
            source_lang: languages.source.clone(),
            target_lang: languages.target.clone(),
            timestamp: Local::now(),
            is_fallback,
            backend: backend.map(str::to_string),
        }
    }

    /// `true` for the empty-input short-circuit result.
    pub fn is_empty(&self) -> bool {
        self.translated_text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Language names and quick phrases
// ---------------------------------------------------------------------------

static LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("pl", "Polish"),
];

/// Human-readable name for a language code; unknown codes are returned as-is.
///
/// ```
/// use voice_translator::translate::language_name;
///
/// assert_eq!(language_name("de"), "German");
/// assert_eq!(language_name("xx"), "xx");
/// ```
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

static QUICK_PHRASES_EN: &[&str] = &[
    "Hello",
    "Thank you",
    "Please",
    "Excuse me",
    "How are you?",
    "Where is the bathroom?",
    "How much?",
    "I need help",
    "Do you speak English?",
    "I don't understand",
];

static QUICK_PHRASES_DE: &[&str] = &[
    "Hallo",
    "Danke",
    "Bitte",
    "Entschuldigung",
    "Wie geht es dir?",
    "Wo ist die Toilette?",
    "Wie viel?",
    "Ich brauche Hilfe",
    "Sprechen Sie Englisch?",
    "Ich verstehe nicht",
];

/// Canned one-tap phrases for a source language (empty for unsupported codes).
pub fn quick_phrases(code: &str) -> &'static [&'static str] {
    match code {
        "en" => QUICK_PHRASES_EN,
        "de" => QUICK_PHRASES_DE,
        _ => &[],
    }
}
