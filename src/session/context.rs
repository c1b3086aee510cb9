//! Explicit per-session state.
//!
//! [`SessionContext`] owns everything a front end needs between
//! interactions: the active language pair, the latest result, the
//! conversation history and running statistics. Front ends hold one value
//! per user session and pass it to [`SessionContext::translate`]; nothing
//! here is global.

use crate::config::AppConfig;
use crate::session::history::ConversationHistory;
use crate::session::stats::SessionStats;
use crate::translate::{LanguagePair, TranslationResolver, TranslationResult};

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// State of one translation session.
///
/// # Example
/// ```rust
/// use voice_translator::session::SessionContext;
/// use voice_translator::translate::{PhraseDictionary, TranslationResolver};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let resolver = TranslationResolver::new(Vec::new(), PhraseDictionary::builtin());
/// let mut session = SessionContext::default();
///
/// session.translate(&resolver, "good night").await;
/// assert_eq!(session.current().unwrap().translated_text, "gute nacht");
/// assert_eq!(session.stats().translations_count, 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    languages: LanguagePair,
    current: Option<TranslationResult>,
    history: ConversationHistory,
    stats: SessionStats,
}

impl SessionContext {
    /// Session with an explicit language pair and history limit.
    pub fn new(languages: LanguagePair, history_limit: usize) -> Self {
        Self {
            languages,
            current: None,
            history: ConversationHistory::with_limit(history_limit),
            stats: SessionStats::new(),
        }
    }

    /// Session seeded from the configured default languages and limits.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            LanguagePair::from(&config.languages),
            config.session.history_limit,
        )
    }

    // -----------------------------------------------------------------------
    // Translation
    // -----------------------------------------------------------------------

    /// Translate `text` with the session's current language pair and record
    /// the outcome. Returns the recorded result (empty for blank input, in
    /// which case nothing is recorded).
    pub async fn translate(
        &mut self,
        resolver: &TranslationResolver,
        text: &str,
    ) -> TranslationResult {
        let result = resolver
            .resolve(text, &self.languages.source, &self.languages.target)
            .await;
        self.record(result.clone());
        result
    }

    /// Record a finished translation: it becomes the current result, counts
    /// toward the statistics, and is appended to the history.
    ///
    /// Empty results are ignored.
    pub fn record(&mut self, result: TranslationResult) {
        if result.is_empty() {
            return;
        }
        self.stats.record(&result);
        self.history.push(result.clone());
        self.current = Some(result);
    }

    /// Append the current result to the history again (no-op when it is
    /// already there or there is no current result).
    pub fn save_current(&mut self) -> bool {
        match &self.current {
            Some(result) => self.history.push(result.clone()),
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Languages
    // -----------------------------------------------------------------------

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn set_languages(&mut self, languages: LanguagePair) {
        self.languages = languages;
    }

    /// Reverse the translation direction.
    pub fn swap_languages(&mut self) {
        self.languages = self.languages.swapped();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn current(&self) -> Option<&TranslationResult> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Up to `n` most recent history entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&TranslationResult> {
        self.history.recent(n)
    }

    /// Forget history, the current result and statistics. The language pair
    /// and history limit are kept.
    pub fn clear(&mut self) {
        self.history.clear();
        self.current = None;
        self.stats = SessionStats::new();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
