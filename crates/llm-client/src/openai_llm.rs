//! LlmClient over an OpenAI-compatible endpoint (Groq in production) with a model pool.

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, OpenAIClient, SamplingParams};
use tracing::{info, instrument, warn};

use crate::error::LlmError;
use crate::model_pool::{ModelPool, ModelSelector};
use crate::LlmClient;

/// Text completion client: picks a model per call, applies fixed sampling params and a timeout.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    pool: ModelPool,
    params: SamplingParams,
    timeout: Duration,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String, pool: ModelPool) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            pool,
            params: SamplingParams::default(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pool(&self) -> &ModelPool {
        &self.pool
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, prompt, system), fields(prompt_len = prompt.len()))]
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        selector: &ModelSelector,
    ) -> Result<String, LlmError> {
        let model = self.pool.select(selector);
        info!(model = %model, "Using model");

        let request = ChatRequest {
            model: &model,
            system: Some(system),
            user_text: prompt,
            image_url: None,
            params: self.params,
        };
        let text = tokio::time::timeout(self.timeout, self.client.chat_completion(request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                warn!(model = %model, error = %e, "Completion failed");
                LlmError::Backend(e.to_string())
            })?;

        if text.is_empty() {
            return Err(LlmError::EmptyResponse(model));
        }
        info!(model = %model, reply_len = text.len(), "step: completion received");
        Ok(text)
    }
}
