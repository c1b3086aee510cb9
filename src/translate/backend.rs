//! Core `TranslationBackend` trait, its error type, and construction of the
//! configured backend chain.
//!
//! Each adapter makes exactly one attempt per call. Retrying, skipping and
//! falling back are the resolver's job, not the adapter's.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{BackendKind, TranslationConfig};
use crate::translate::google::GoogleBackend;
use crate::translate::libre::LibreTranslateBackend;
use crate::translate::mymemory::MyMemoryBackend;

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

/// Errors a single backend attempt can produce.
///
/// None of these are fatal: the resolver logs them and moves on to the next
/// backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The attempt did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The service answered with a non-200 status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body was not the JSON shape the adapter expects.
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// The response contained no usable text.
    #[error("backend returned an empty translation")]
    EmptyResponse,

    /// The service reported a quota or rate limit instead of a translation.
    #[error("backend quota exhausted: {0}")]
    QuotaExceeded(String),

    /// The backend echoed the input back unchanged.
    #[error("backend returned the input unchanged")]
    Unchanged,
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

impl BackendError {
    /// Map an error raised while reading/decoding a response body.
    ///
    /// The client timeout also covers the body, so a stalled body is still a
    /// `Timeout` rather than a `Parse` failure.
    pub(crate) fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Parse(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationBackend trait
// ---------------------------------------------------------------------------

/// One external translation capability.
///
/// Implementors must be `Send + Sync` so a resolver holding
/// `Box<dyn TranslationBackend>` can be shared behind an `Arc`.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Short stable name used in logs and on results.
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target` in a single attempt.
    async fn attempt(&self, text: &str, source: &str, target: &str)
        -> Result<String, BackendError>;
}

// ---------------------------------------------------------------------------
// Chain construction
// ---------------------------------------------------------------------------

/// Build a `reqwest` client with the configured timeout and user agent.
///
/// Falls back to a default client (no timeout, default user agent) if the
/// builder fails.
pub(crate) fn http_client(config: &TranslationConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build HTTP client ({e}); using reqwest defaults");
            reqwest::Client::new()
        })
}

/// Instantiate one adapter.
pub fn build_backend(kind: BackendKind, config: &TranslationConfig) -> Box<dyn TranslationBackend> {
    match kind {
        BackendKind::Google => Box::new(GoogleBackend::from_config(config)),
        BackendKind::MyMemory => Box::new(MyMemoryBackend::from_config(config)),
        BackendKind::LibreTranslate => Box::new(LibreTranslateBackend::from_config(config)),
    }
}

/// Instantiate every adapter listed in `config.backends`, keeping their order.
pub fn build_backends(config: &TranslationConfig) -> Vec<Box<dyn TranslationBackend>> {
    config
        .backends
        .iter()
        .map(|kind| build_backend(*kind, config))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
