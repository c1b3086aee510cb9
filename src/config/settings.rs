//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files. Every field carries a
//! serde default, so a partial `settings.toml` only overrides what it names.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// BackendKind
// ---------------------------------------------------------------------------

/// Identifies one translation backend adapter.
///
/// The order of [`TranslationConfig::backends`] is the priority order in
/// which the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Google Translate's public `gtx` endpoint.
    Google,
    /// MyMemory free translation API.
    MyMemory,
    /// A LibreTranslate instance.
    LibreTranslate,
}

impl BackendKind {
    /// Stable lowercase name used in logs and on [`TranslationResult`](crate::translate::TranslationResult).
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Google => "google",
            BackendKind::MyMemory => "mymemory",
            BackendKind::LibreTranslate => "libretranslate",
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationConfig
// ---------------------------------------------------------------------------

/// Settings for the network translation backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Backends to try, highest priority first. Empty means offline
    /// (dictionary only).
    pub backends: Vec<BackendKind>,
    /// Maximum seconds to wait for each backend before moving on.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every backend request.
    pub user_agent: String,
    /// Base URL of the Google Translate endpoint.
    pub google_url: String,
    /// Base URL of the MyMemory API.
    pub mymemory_url: String,
    /// Contact e-mail passed to MyMemory as `de=`; raises the daily quota.
    pub mymemory_email: Option<String>,
    /// Base URL of the LibreTranslate instance.
    pub libretranslate_url: String,
    /// API key for LibreTranslate instances that require one.
    pub libretranslate_api_key: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backends: vec![
                BackendKind::Google,
                BackendKind::MyMemory,
                BackendKind::LibreTranslate,
            ],
            timeout_secs: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            google_url: "https://translate.googleapis.com".into(),
            mymemory_url: "https://api.mymemory.translated.net".into(),
            mymemory_email: None,
            libretranslate_url: "https://libretranslate.de".into(),
            libretranslate_api_key: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageConfig
// ---------------------------------------------------------------------------

/// Default language pair used when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// ISO-639-1 code of the spoken / typed language.
    pub source: String,
    /// ISO-639-1 code to translate into.
    pub target: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: "en".into(),
            target: "de".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of entries kept in the conversation history.
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { history_limit: 50 }
    }
}

// ---------------------------------------------------------------------------
// DictionaryConfig
// ---------------------------------------------------------------------------

/// Offline dictionary settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// JSON file with extra phrase entries. `None` means the platform
    /// default (`user-dictionary.json` next to `settings.toml`), used only
    /// when it exists.
    pub user_dictionary: Option<PathBuf>,
}

impl DictionaryConfig {
    /// Path of the user dictionary to load, if any.
    pub fn resolved_path(&self) -> PathBuf {
        self.user_dictionary
            .clone()
            .unwrap_or_else(|| AppPaths::new().user_dictionary_file)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use voice_translator::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.session.history_limit > 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default language pair.
    pub languages: LanguageConfig,
    /// Backend chain settings.
    pub translation: TranslationConfig,
    /// Session bookkeeping settings.
    pub session: SessionConfig,
    /// Offline dictionary settings.
    pub dictionary: DictionaryConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.languages.source, loaded.languages.source);
        assert_eq!(original.languages.target, loaded.languages.target);
        assert_eq!(original.translation.backends, loaded.translation.backends);
        assert_eq!(original.translation.timeout_secs, loaded.translation.timeout_secs);
        assert_eq!(original.translation.mymemory_url, loaded.translation.mymemory_url);
        assert_eq!(original.session.history_limit, loaded.session.history_limit);
        assert_eq!(
            original.dictionary.user_dictionary,
            loaded.dictionary.user_dictionary
        );
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.languages.source, "en");
        assert_eq!(config.session.history_limit, 50);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.languages.source, "en");
        assert_eq!(cfg.languages.target, "de");
        assert_eq!(
            cfg.translation.backends,
            vec![
                BackendKind::Google,
                BackendKind::MyMemory,
                BackendKind::LibreTranslate
            ]
        );
        assert_eq!(cfg.translation.timeout_secs, 5);
        assert!(cfg.translation.mymemory_email.is_none());
        assert!(cfg.translation.libretranslate_api_key.is_none());
        assert_eq!(cfg.session.history_limit, 50);
        assert!(cfg.dictionary.user_dictionary.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[translation]\nbackends = [\"MyMemory\"]\ntimeout_secs = 8\n",
        )
        .expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.translation.backends, vec![BackendKind::MyMemory]);
        assert_eq!(cfg.translation.timeout_secs, 8);
        assert_eq!(cfg.translation.google_url, "https://translate.googleapis.com");
        assert_eq!(cfg.languages.target, "de");
        assert_eq!(cfg.session.history_limit, 50);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.languages.source = "de".into();
        cfg.languages.target = "en".into();
        cfg.translation.backends = vec![BackendKind::LibreTranslate];
        cfg.translation.libretranslate_api_key = Some("lt-key".into());
        cfg.translation.mymemory_email = Some("me@example.com".into());
        cfg.session.history_limit = 100;
        cfg.dictionary.user_dictionary = Some(PathBuf::from("/tmp/dict.json"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.languages.source, "de");
        assert_eq!(loaded.languages.target, "en");
        assert_eq!(loaded.translation.backends, vec![BackendKind::LibreTranslate]);
        assert_eq!(
            loaded.translation.libretranslate_api_key,
            Some("lt-key".into())
        );
        assert_eq!(
            loaded.translation.mymemory_email,
            Some("me@example.com".into())
        );
        assert_eq!(loaded.session.history_limit, 100);
        assert_eq!(
            loaded.dictionary.user_dictionary,
            Some(PathBuf::from("/tmp/dict.json"))
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[session\nhistory_limit = ").expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn explicit_dictionary_path_wins() {
        let cfg = DictionaryConfig {
            user_dictionary: Some(PathBuf::from("/data/words.json")),
        };
        assert_eq!(cfg.resolved_path(), PathBuf::from("/data/words.json"));
    }
}
