//! Translation resolution for the voice translator.
//!
//! This module provides:
//! * [`TranslationBackend`]: async trait implemented by every backend adapter.
//! * [`GoogleBackend`], [`MyMemoryBackend`], [`LibreTranslateBackend`]: HTTP adapters.
//! * [`PhraseDictionary`]: offline phrase/word fallback.
//! * [`TranslationResolver`]: ordered backend chain ending in the dictionary.
//! * [`TranslationRequest`] / [`TranslationResult`] / [`LanguagePair`]: records.
//! * [`BackendError`]: error variants for a single backend attempt.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_translator::config::AppConfig;
//! use voice_translator::translate::{PhraseDictionary, TranslationResolver};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!
//!     // Google, then MyMemory, then LibreTranslate, then the dictionary.
//!     let resolver =
//!         TranslationResolver::from_config(&config.translation, PhraseDictionary::builtin());
//!
//!     let result = resolver.resolve("Where is the train station?", "en", "de").await;
//!     println!("{} (fallback: {})", result.translated_text, result.is_fallback);
//! }
//! ```

pub mod backend;
pub mod dictionary;
pub mod google;
pub mod libre;
pub mod mymemory;
pub mod resolver;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use backend::{build_backend, build_backends, BackendError, TranslationBackend};
pub use dictionary::{translation_needed, PhraseDictionary};
pub use google::GoogleBackend;
pub use libre::LibreTranslateBackend;
pub use mymemory::MyMemoryBackend;
pub use resolver::{TranslationResolver, DEFAULT_ATTEMPT_TIMEOUT};
pub use types::{
    language_name, pair_key, quick_phrases, LanguagePair, TranslationRequest, TranslationResult,
};
