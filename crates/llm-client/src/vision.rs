//! VisionLlmClient over the OpenAI API: text plus one image URL, deterministic sampling.

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, OpenAIClient, SamplingParams};
use tracing::{info, instrument, warn};

use crate::error::LlmError;
use crate::VisionLlmClient;

pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Vision completion client. Temperature is pinned to 0.0 so transcriptions stay stable.
#[derive(Clone)]
pub struct OpenAIVisionClient {
    client: OpenAIClient,
    model: String,
    params: SamplingParams,
    timeout: Duration,
}

impl OpenAIVisionClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_VISION_MODEL.to_string(),
            params: SamplingParams::default().with_temperature(0.0),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Only the output bound is configurable; temperature stays 0.0.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.params = self.params.with_max_tokens(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn params(&self) -> SamplingParams {
        self.params
    }
}

#[async_trait]
impl VisionLlmClient for OpenAIVisionClient {
    #[instrument(skip(self, prompt, system), fields(model = %self.model))]
    async fn complete_with_image(
        &self,
        prompt: &str,
        image_url: &str,
        system: &str,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            system: Some(system),
            user_text: prompt,
            image_url: Some(image_url),
            params: self.params,
        };
        let text = tokio::time::timeout(self.timeout, self.client.chat_completion(request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                warn!(error = %e, "Vision completion failed");
                LlmError::Backend(e.to_string())
            })?;

        if text.is_empty() {
            return Err(LlmError::EmptyResponse(self.model.clone()));
        }
        info!(reply_len = text.len(), "step: vision completion received");
        Ok(text)
    }
}
