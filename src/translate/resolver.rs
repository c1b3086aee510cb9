//! Ordered backend chain with dictionary fallback.
//!
//! [`TranslationResolver`] tries each backend in priority order, one at a
//! time, and keeps the first answer that is non-empty and differs from the
//! input. A backend that echoes the input is treated as refusing (quota or
//! block), not as translating. When the chain is exhausted the
//! [`PhraseDictionary`] answers, and when that misses too the result carries
//! the "translation needed" marker. Resolution never returns an error.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::translate::backend::{build_backends, BackendError, TranslationBackend};
use crate::translate::dictionary::PhraseDictionary;
use crate::translate::types::{LanguagePair, TranslationRequest, TranslationResult};

/// Default per-backend time budget.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// TranslationResolver
// ---------------------------------------------------------------------------

/// Resolves text through the configured backends, then the dictionary.
///
/// # Example
/// ```rust
/// use voice_translator::translate::{PhraseDictionary, TranslationResolver};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// // No backends: dictionary only.
/// let resolver = TranslationResolver::new(Vec::new(), PhraseDictionary::builtin());
/// let result = resolver.resolve("thank you", "en", "de").await;
/// assert_eq!(result.translated_text, "danke");
/// assert!(result.is_fallback);
/// # }
/// ```
pub struct TranslationResolver {
    backends: Vec<Box<dyn TranslationBackend>>,
    dictionary: Arc<PhraseDictionary>,
    attempt_timeout: Duration,
}

impl TranslationResolver {
    /// Build a resolver over an explicit backend list (highest priority first).
    pub fn new(
        backends: Vec<Box<dyn TranslationBackend>>,
        dictionary: impl Into<Arc<PhraseDictionary>>,
    ) -> Self {
        Self {
            backends,
            dictionary: dictionary.into(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Build the backend chain described by `config`.
    pub fn from_config(
        config: &TranslationConfig,
        dictionary: impl Into<Arc<PhraseDictionary>>,
    ) -> Self {
        Self::new(build_backends(config), dictionary)
            .with_attempt_timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Override the per-backend time budget.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Names of the configured backends, in the order they are tried.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Send one bounded `hello` (en -> de) through each configured backend.
    ///
    /// The acceptance rules of [`resolve`](Self::resolve) apply, so a backend
    /// that echoes the input reports `Unchanged`. The dictionary is not
    /// consulted.
    pub async fn check_backends(&self) -> Vec<(&str, Result<(), BackendError>)> {
        let mut report = Vec::with_capacity(self.backends.len());
        let Some(request) = TranslationRequest::new("hello", LanguagePair::new("en", "de")) else {
            return report;
        };

        for backend in &self.backends {
            let outcome = self.attempt(backend.as_ref(), &request).await.map(|_| ());
            if let Err(e) = &outcome {
                log::debug!("{} check failed: {e}", backend.name());
            }
            report.push((backend.name(), outcome));
        }
        report
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Translate `text` from `source` to `target`.
    ///
    /// Empty or whitespace-only input returns an empty, non-fallback result
    /// without contacting any backend.
    pub async fn resolve(&self, text: &str, source: &str, target: &str) -> TranslationResult {
        let languages = LanguagePair::new(source, target);
        match TranslationRequest::new(text, languages.clone()) {
            Some(request) => self.resolve_request(&request).await,
            None => TranslationResult::new(text.trim(), String::new(), &languages, false, None),
        }
    }

    /// Translate an already-validated request.
    pub async fn resolve_request(&self, request: &TranslationRequest) -> TranslationResult {
        let text = request.text();
        let languages = LanguagePair::new(request.source_lang(), request.target_lang());

        for backend in &self.backends {
            match self.attempt(backend.as_ref(), request).await {
                Ok(translated) => {
                    log::debug!(
                        "{} translated {} -> {} (len={})",
                        backend.name(),
                        languages.source,
                        languages.target,
                        text.len()
                    );
                    return TranslationResult::new(
                        text,
                        translated,
                        &languages,
                        false,
                        Some(backend.name()),
                    );
                }
                Err(e) => {
                    log::warn!("{} failed, trying next backend: {e}", backend.name());
                }
            }
        }

        log::info!(
            "All backends exhausted for {}; using dictionary fallback",
            languages.key()
        );
        let translated =
            self.dictionary
                .translate_or_marker(text, &languages.source, &languages.target);
        TranslationResult::new(text, translated, &languages, true, None)
    }

    /// One bounded attempt, with the acceptance rules applied.
    async fn attempt(
        &self,
        backend: &dyn TranslationBackend,
        request: &TranslationRequest,
    ) -> Result<String, BackendError> {
        let call = backend.attempt(request.text(), request.source_lang(), request.target_lang());
        let translated = tokio::time::timeout(self.attempt_timeout, call)
            .await
            .map_err(|_| BackendError::Timeout)??;

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        if translated == request.text() {
            return Err(BackendError::Unchanged);
        }
        Ok(translated.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
