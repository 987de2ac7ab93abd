//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for a single non-streamed chat completion. Works against
//! any OpenAI-compatible endpoint (OpenAI itself, Groq via its `/openai/v1` base URL).
//! Provides token masking for safe logging.

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.3,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl SamplingParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// One chat completion: system instruction, user text, optional image URL.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub system: Option<&'a str>,
    pub user_text: &'a str,
    pub image_url: Option<&'a str>,
    pub params: SamplingParams,
}

/// Chat client over an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    /// Kept only for masked logging.
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Default OpenAI base URL.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Custom base URL (Groq, proxies, mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Sends one chat completion and returns the first choice's content, trimmed.
    #[allow(deprecated)]
    pub async fn chat_completion(&self, request: ChatRequest<'_>) -> anyhow::Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()?
                    .into(),
            );
        }
        messages.push(user_message(request.user_text, request.image_url)?);

        tracing::info!(
            model = %request.model,
            with_image = request.image_url.is_some(),
            temperature = request.params.temperature,
            max_tokens = request.params.max_tokens,
            api_key = %mask_token(&self.api_key_for_logging),
            "chat_completion request"
        );

        let params = request.params;
        let body = CreateChatCompletionRequestArgs::default()
            .model(request.model)
            .messages(messages)
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .frequency_penalty(params.frequency_penalty)
            .presence_penalty(params.presence_penalty)
            .build()?;

        if let Ok(json) = serde_json::to_string(&body) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(body).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice
                .message
                .content
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string()),
            None => anyhow::bail!("No choices in completion response"),
        }
    }
}

/// Plain text, or text plus an image part when `image_url` is set.
fn user_message(
    text: &str,
    image_url: Option<&str>,
) -> anyhow::Result<ChatCompletionRequestMessage> {
    let message = match image_url {
        None => ChatCompletionRequestUserMessageArgs::default()
            .content(text)
            .build()?,
        Some(url) => {
            let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
                ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(text)
                    .build()?
                    .into(),
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(
                        ImageUrlArgs::default()
                            .url(url)
                            .detail(ImageDetail::High)
                            .build()?,
                    )
                    .build()?
                    .into(),
            ];
            ChatCompletionRequestUserMessageArgs::default()
                .content(parts)
                .build()?
        }
    };
    Ok(message.into())
}
