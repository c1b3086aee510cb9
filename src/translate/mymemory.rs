//! MyMemory free translation API adapter.
//!
//! MyMemory answers HTTP 200 even for many failures and reports the real
//! outcome in `responseStatus`. When the anonymous daily quota runs out it
//! puts a warning sentence where the translation should be, so the text is
//! screened for those phrases before it is accepted.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::TranslationConfig;
use crate::translate::backend::{http_client, BackendError, TranslationBackend};

/// Lowercase fragments that mark a quota / rate-limit notice.
const QUOTA_PHRASES: &[&str] = &[
    "mymemory warning",
    "quota",
    "usage limit",
    "limit exceeded",
];

pub struct MyMemoryBackend {
    client: reqwest::Client,
    base_url: String,
    email: Option<String>,
}

impl MyMemoryBackend {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            client: http_client(config),
            base_url: config.mymemory_url.trim_end_matches('/').to_string(),
            email: config.mymemory_email.clone().filter(|e| !e.is_empty()),
        }
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryBackend {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn attempt(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, BackendError> {
        let url = format!("{}/get", self.base_url);
        let langpair = format!("{source}|{target}");

        let mut req = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())]);

        if let Some(email) = &self.email {
            req = req.query(&[("de", email.as_str())]);
        }

        let response = req.send().await?;

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

/// Extract the translation from a MyMemory `/get` response body.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, BackendError> {
    // `responseStatus` is a number on success but a string on some errors.
    let status = match &json["responseStatus"] {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| BackendError::Parse("missing responseStatus".into()))?;

    let translated = json["responseData"]["translatedText"]
        .as_str()
        .map(str::trim)
        .unwrap_or("");

    if status != 200 {
        let details = json["responseDetails"].as_str().unwrap_or(translated);
        if is_quota_notice(details) {
            return Err(BackendError::QuotaExceeded(details.to_string()));
        }
        return Err(BackendError::Status(
            u16::try_from(status).unwrap_or(u16::MAX),
        ));
    }

    if translated.is_empty() {
        return Err(BackendError::EmptyResponse);
    }
    if is_quota_notice(translated) {
        return Err(BackendError::QuotaExceeded(translated.to_string()));
    }
    Ok(translated.to_string())
}

fn is_quota_notice(text: &str) -> bool {
    let lower = text.to_lowercase();
    QUOTA_PHRASES.iter().any(|p| lower.contains(p))
}
