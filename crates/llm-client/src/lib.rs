//! # LLM client abstraction
//!
//! [`LlmClient`] (text completion with model selection) and [`VisionLlmClient`] (completion with
//! one image attached), plus implementations over OpenAI-compatible endpoints. Transport-agnostic;
//! used by the relay handlers.
//!
//! Failures come back as [`LlmError`] values; callers decide what the user sees.

use async_trait::async_trait;

mod config;
mod error;
mod model_pool;
mod openai_llm;
mod vision;

pub use config::LlmConfig;
pub use error::LlmError;
pub use model_pool::{ModelPool, ModelSelector, FALLBACK_MODEL};
pub use openai_client::SamplingParams;
pub use openai_llm::OpenAILlmClient;
pub use vision::{OpenAIVisionClient, DEFAULT_VISION_MODEL};

/// Text completion with a selectable model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `system` + `prompt` to the model chosen by `selector` and returns the reply text.
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        selector: &ModelSelector,
    ) -> Result<String, LlmError>;
}

/// Completion over text plus one image reference.
#[async_trait]
pub trait VisionLlmClient: Send + Sync {
    async fn complete_with_image(
        &self,
        prompt: &str,
        image_url: &str,
        system: &str,
    ) -> Result<String, LlmError>;
}
