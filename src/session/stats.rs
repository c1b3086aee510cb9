//! Running statistics for one translation session.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::translate::TranslationResult;

#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    /// Number of recorded translations.
    pub translations_count: usize,
    /// Whitespace-separated words across all translated originals.
    pub total_words: usize,
    /// How many of those came from the offline dictionary.
    pub fallback_count: usize,
    pub session_start: DateTime<Local>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            translations_count: 0,
            total_words: 0,
            fallback_count: 0,
            session_start: Local::now(),
        }
    }

    pub fn record(&mut self, result: &TranslationResult) {
        self.translations_count += 1;
        self.total_words += result.original_text.split_whitespace().count();
        if result.is_fallback {
            self.fallback_count += 1;
        }
    }

    /// Time elapsed since the session started.
    pub fn duration(&self) -> Duration {
        Local::now().signed_duration_since(self.session_start)
    }

    /// Duration formatted as `"{minutes}m {seconds}s"`.
    pub fn duration_label(&self) -> String {
        let secs = self.duration().num_seconds().max(0);
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::LanguagePair;

    fn result(text: &str, is_fallback: bool) -> TranslationResult {
        TranslationResult::new(text, "x".into(), &LanguagePair::default(), is_fallback, None)
    }

    #[test]
    fn counts_translations_words_and_fallbacks() {
        let mut stats = SessionStats::new();
        stats.record(&result("where is the train station", false));
        stats.record(&result("danke", true));

        assert_eq!(stats.translations_count, 2);
        assert_eq!(stats.total_words, 6);
        assert_eq!(stats.fallback_count, 1);
    }

    #[test]
    fn fresh_session_has_short_duration() {
        let stats = SessionStats::new();
        assert!(stats.duration().num_seconds() < 5);
        assert!(stats.duration_label().starts_with("0m "));
    }
}
