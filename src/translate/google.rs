//! Google Translate adapter using the public `gtx` client endpoint.
//!
//! The endpoint answers with a nested JSON array; the translated sentence
//! chunks live at `json[0][i][0]` and are concatenated in order.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::TranslationConfig;
use crate::translate::backend::{http_client, BackendError, TranslationBackend};

pub struct GoogleBackend {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleBackend {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            client: http_client(config),
            base_url: config.google_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationBackend for GoogleBackend {
    fn name(&self) -> &str {
        "google"
    }

    async fn attempt(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, BackendError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

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

/// Extract the translation from a `translate_a/single` response body.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, BackendError> {
    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| BackendError::Parse("missing sentence array".into()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
        .collect();

    let translated = translated.trim();
    if translated.is_empty() {
        return Err(BackendError::EmptyResponse);
    }
    Ok(translated.to_string())
}
