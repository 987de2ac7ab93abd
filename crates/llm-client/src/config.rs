//! Completion backend configuration, loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

use crate::model_pool::{ModelPool, ModelSelector};
use crate::vision::DEFAULT_VISION_MODEL;

/// Text (Groq) and vision (OpenAI) backend settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub groq_api_key: String,
    pub groq_base_url: String,
    /// GROQ_MODEL, comma-separated.
    pub model_pool: ModelPool,
    pub model_selector: ModelSelector,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub vision_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load from environment variables. API keys must be set and non-empty.
    pub fn from_env() -> Result<Self> {
        let groq_api_key = non_empty("GROQ_API_KEY")?;
        let openai_api_key = non_empty("OPENAI_API_KEY")?;
        let groq_base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());
        let model_pool = ModelPool::from_csv(&env::var("GROQ_MODEL").unwrap_or_default());
        let model_selector = env::var("GROQ_MODEL_SELECTION")
            .map(|s| ModelSelector::parse(&s))
            .unwrap_or(ModelSelector::Random);
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let vision_model =
            env::var("VISION_MODEL").unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());
        let temperature = parse_or("LLM_TEMPERATURE", 0.3)?;
        let max_tokens = parse_or("LLM_MAX_TOKENS", 256)?;
        let timeout_secs = parse_or("LLM_TIMEOUT_SECS", 60)?;

        Ok(Self {
            groq_api_key,
            groq_base_url,
            model_pool,
            model_selector,
            openai_api_key,
            openai_base_url,
            vision_model,
            temperature,
            max_tokens,
            timeout_secs,
        })
    }
}

fn non_empty(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("{} not set", name))?;
    if value.trim().is_empty() {
        anyhow::bail!("{} is empty", name);
    }
    Ok(value)
}

fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for var in [
            "GROQ_BASE_URL",
            "GROQ_MODEL",
            "GROQ_MODEL_SELECTION",
            "OPENAI_BASE_URL",
            "VISION_MODEL",
            "LLM_TEMPERATURE",
            "LLM_MAX_TOKENS",
            "LLM_TIMEOUT_SECS",
        ] {
            env::remove_var(var);
        }
        env::set_var("GROQ_API_KEY", "gsk_test");
        env::set_var("OPENAI_API_KEY", "sk-test");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        let cfg = LlmConfig::from_env().unwrap();
        assert_eq!(cfg.groq_base_url, "https://api.groq.com/openai/v1");
        assert!(cfg.model_pool.is_empty());
        assert_eq!(cfg.model_selector, ModelSelector::Random);
        assert_eq!(cfg.vision_model, "gpt-4o");
        assert_eq!(cfg.temperature, 0.3);
        assert_eq!(cfg.max_tokens, 256);
        assert_eq!(cfg.timeout_secs, 60);
    }

    #[test]
    #[serial]
    fn test_custom_values() {
        clear();
        env::set_var("GROQ_MODEL", "llama3-8b-8192,mixtral-8x7b-32768");
        env::set_var("GROQ_MODEL_SELECTION", "first");
        env::set_var("LLM_TEMPERATURE", "0.7");
        env::set_var("LLM_MAX_TOKENS", "512");

        let cfg = LlmConfig::from_env().unwrap();
        assert_eq!(cfg.model_pool.models().len(), 2);
        assert_eq!(cfg.model_selector, ModelSelector::First);
        assert_eq!(cfg.temperature, 0.7);
        assert_eq!(cfg.max_tokens, 512);

        env::remove_var("GROQ_MODEL");
        env::remove_var("GROQ_MODEL_SELECTION");
        env::remove_var("LLM_TEMPERATURE");
        env::remove_var("LLM_MAX_TOKENS");
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_error() {
        clear();
        env::set_var("LLM_MAX_TOKENS", "lots");
        assert!(LlmConfig::from_env().is_err());
        env::remove_var("LLM_MAX_TOKENS");
    }

    #[test]
    #[serial]
    fn test_empty_key_is_error() {
        clear();
        env::set_var("GROQ_API_KEY", "");
        assert!(LlmConfig::from_env().is_err());
    }
}
