//! Translation backends. The production one calls the public Google Translate endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::TranslateError;
use crate::lang::Lang;

/// Default endpoint for [`GoogleTranslateBackend`].
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates text from an auto-detected source language into `target`.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, text: &str, target: Lang) -> Result<String, TranslateError>;
}

/// Google Translate over HTTP (`client=gtx`, source `auto`).
pub struct GoogleTranslateBackend {
    client: reqwest::Client,
    url: String,
}

impl GoogleTranslateBackend {
    /// Uses [`DEFAULT_TRANSLATE_URL`]. `timeout` bounds each HTTP request.
    pub fn new(timeout: Duration) -> Result<Self, TranslateError> {
        Self::with_url(DEFAULT_TRANSLATE_URL, timeout)
    }

    /// Custom endpoint (e.g. a mock server in tests).
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn translate(&self, text: &str, target: Lang) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let translated = parse_segments(&body)?;
        debug!(target_lang = %target, translated_len = translated.len(), "Translated");
        Ok(translated)
    }
}

/// The response is a nested array; the first element lists `[translated, original, ...]` segments.
fn parse_segments(body: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::InvalidResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::InvalidResponse("no translated text".to_string()));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments_joins_all() {
        let body = json!([[["Hello, ", "שלום, ", null, null, 10], ["how are you?", "מה שלומך?", null]], null, "iw"]);
        assert_eq!(parse_segments(&body).unwrap(), "Hello, how are you?");
    }

    #[test]
    fn test_parse_segments_rejects_other_shapes() {
        assert!(parse_segments(&json!(null)).is_err());
        assert!(parse_segments(&json!({"error": "x"})).is_err());
        assert!(parse_segments(&json!([[]])).is_err());
    }
}
