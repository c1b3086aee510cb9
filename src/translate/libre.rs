//! LibreTranslate adapter (`POST /translate`, form-encoded).

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::TranslationConfig;
use crate::translate::backend::{http_client, BackendError, TranslationBackend};

pub struct LibreTranslateBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateBackend {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            client: http_client(config),
            base_url: config.libretranslate_url.trim_end_matches('/').to_string(),
            api_key: config
                .libretranslate_api_key
                .clone()
                .filter(|k| !k.is_empty()),
        }
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslateBackend {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn attempt(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, BackendError> {
        let url = format!("{}/translate", self.base_url);

        let mut form = vec![
            ("q", text),
            ("source", source),
            ("target", target),
            ("format", "text"),
        ];
        // Attach the key only for instances that need one.
        if let Some(key) = &self.api_key {
            form.push(("api_key", key.as_str()));
        }

        let response = self.client.post(&url).form(&form).send().await?;

        if response.status() != StatusCode::OK {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(BackendError::from_body)?;

        parse_response(&json)
    }
}

/// Extract `translatedText` from a LibreTranslate response body.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, BackendError> {
    if let Some(err) = json["error"].as_str() {
        return Err(BackendError::Request(err.to_string()));
    }

    let translated = json["translatedText"]
        .as_str()
        .ok_or_else(|| BackendError::Parse("missing translatedText".into()))?
        .trim();

    if translated.is_empty() {
        return Err(BackendError::EmptyResponse);
    }
    Ok(translated.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_translated_text() {
        let body = json!({ "translatedText": "Wo ist der Bahnhof?" });
        assert_eq!(parse_response(&body).unwrap(), "Wo ist der Bahnhof?");
    }

    #[test]
    fn error_field_is_reported() {
        let body = json!({ "error": "Visit https://portal.libretranslate.com to get an API key" });
        assert!(matches!(parse_response(&body), Err(BackendError::Request(_))));
    }

    #[test]
    fn missing_field_is_parse_error() {
        let body = json!({ "detectedLanguage": { "language": "en" } });
        assert!(matches!(parse_response(&body), Err(BackendError::Parse(_))));
    }

    #[test]
    fn whitespace_only_is_empty_response() {
        let body = json!({ "translatedText": "   " });
        assert!(matches!(
            parse_response(&body),
            Err(BackendError::EmptyResponse)
        ));
    }

    #[test]
    fn api_key_kept_when_set() {
        let config = TranslationConfig {
            libretranslate_api_key: Some("secret".into()),
            ..TranslationConfig::default()
        };
        let backend = LibreTranslateBackend::from_config(&config);
        assert_eq!(backend.api_key.as_deref(), Some("secret"));
    }
}
