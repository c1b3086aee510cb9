//! Configuration module for the voice translator.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for cross-platform config locations, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, BackendKind, DictionaryConfig, LanguageConfig, SessionConfig, TranslationConfig,
};
