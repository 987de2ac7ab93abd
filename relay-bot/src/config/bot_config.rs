//! BotConfig: BaseConfig + LlmConfig. Use load() for env-based loading.

use anyhow::Result;
use llm_client::LlmConfig;
use std::env;

use super::BaseConfig;

/// Variables that must be set and non-empty before anything starts.
pub const REQUIRED_VARS: [&str; 4] = [
    "OPENAI_API_KEY",
    "GREENAPI_ID_INSTANCE",
    "GREENAPI_ACCESS_TOKEN",
    "GROQ_API_KEY",
];

/// Required variables that are unset or blank, in [`REQUIRED_VARS`] order.
pub fn missing_required_vars() -> Vec<&'static str> {
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| env::var(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .collect()
}

/// Full bot config.
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: LlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. Fails listing every missing required variable.
    /// Call validate() after load to check config before init.
    pub fn load() -> Result<Self> {
        let missing = missing_required_vars();
        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }
        let base = BaseConfig::from_env()?;
        let llm = LlmConfig::from_env()?;
        Ok(Self { base, llm })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        for (name, url) in [
            ("GROQ_BASE_URL", &self.llm.groq_base_url),
            ("OPENAI_BASE_URL", &self.llm.openai_base_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is set but not a valid URL: {}", name, url);
            }
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn llm(&self) -> &LlmConfig {
        &self.llm
    }
}
