//! End-to-end checks of the public API with no network backends reachable.

use async_trait::async_trait;
use voice_translator::{
    config::{AppConfig, BackendKind},
    session::SessionContext,
    translate::{
        BackendError, LanguagePair, PhraseDictionary, TranslationBackend, TranslationResolver,
    },
};

/// Stands in for a backend whose host is unreachable.
struct Unreachable(&'static str);

#[async_trait]
impl TranslationBackend for Unreachable {
    fn name(&self) -> &str {
        self.0
    }

    async fn attempt(&self, _: &str, _: &str, _: &str) -> Result<String, BackendError> {
        Err(BackendError::Request("dns error".into()))
    }
}

fn unreachable_chain() -> Vec<Box<dyn TranslationBackend>> {
    vec![
        Box::new(Unreachable("google")),
        Box::new(Unreachable("mymemory")),
        Box::new(Unreachable("libretranslate")),
    ]
}

#[tokio::test]
async fn conversation_falls_back_to_dictionary_both_ways() {
    let resolver = TranslationResolver::new(unreachable_chain(), PhraseDictionary::builtin());
    let mut session = SessionContext::new(LanguagePair::new("en", "de"), 50);

    let hello = session.translate(&resolver, "Hello").await;
    assert_eq!(hello.translated_text, "hallo");
    assert!(hello.is_fallback);

    session.swap_languages();
    let back = session.translate(&resolver, "Wo ist der Bahnhof").await;
    assert_eq!(back.translated_text, "where is the train station");

    let unknown = session.translate(&resolver, "Zzyzx").await;
    assert_eq!(
        unknown.translated_text,
        "[Translation needed: Zzyzx]"
    );

    assert_eq!(session.stats().translations_count, 3);
    assert_eq!(session.stats().fallback_count, 3);
    assert_eq!(session.history().len(), 3);
}

#[tokio::test]
async fn non_empty_input_always_yields_text() {
    let resolver = TranslationResolver::new(unreachable_chain(), PhraseDictionary::new());
    for input in ["a", "xyz abc", "!!!", "Guten Tag"] {
        let result = resolver.resolve(input, "en", "de").await;
        assert!(!result.translated_text.is_empty(), "empty result for {input:?}");
        assert!(result.is_fallback);
    }
}

#[tokio::test]
async fn history_cap_holds_over_long_session() {
    let resolver = TranslationResolver::new(Vec::new(), PhraseDictionary::builtin());
    let mut session = SessionContext::new(LanguagePair::default(), 50);

    for i in 0..75 {
        session.translate(&resolver, &format!("water {i}")).await;
    }

    assert_eq!(session.history().len(), 50);
    let newest = session.recent(1)[0];
    assert_eq!(newest.original_text, "water 74");
    let oldest = session.history().iter().next().unwrap();
    assert_eq!(oldest.original_text, "water 25");
}

#[test]
fn resolver_from_default_config_lists_all_backends() {
    let config = AppConfig::default();
    assert_eq!(
        config.translation.backends,
        vec![
            BackendKind::Google,
            BackendKind::MyMemory,
            BackendKind::LibreTranslate
        ]
    );
    let resolver = TranslationResolver::from_config(&config.translation, PhraseDictionary::builtin());
    assert_eq!(
        resolver.backend_names(),
        vec!["google", "mymemory", "libretranslate"]
    );
}
