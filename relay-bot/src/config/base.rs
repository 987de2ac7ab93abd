//! Base config: Green API connection, history storage, translation, logging, process lock. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Everything except the completion backends.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// GREENAPI_ID_INSTANCE
    pub greenapi_id_instance: String,
    /// GREENAPI_ACCESS_TOKEN
    pub greenapi_access_token: String,
    /// GREENAPI_API_URL
    pub greenapi_api_url: String,
    /// Long-poll timeout for receiveNotification
    pub receive_timeout_secs: u64,
    /// Log file path
    pub log_file: String,
    /// Directory holding one `<user>_data.json` per user
    pub history_dir: PathBuf,
    /// Turns kept in persisted history
    pub history_window: usize,
    /// Advisory lock guarding the history directory
    pub lock_file: PathBuf,
    pub lock_timeout_secs: u64,
    /// Exchanges processed at once across users
    pub max_concurrent_exchanges: usize,
    pub translate_url: String,
    pub translate_timeout_secs: u64,
    /// 0 disables translation and detection caching
    pub translate_cache_size: usize,
}

impl BaseConfig {
    /// Load from environment variables. Credentials default to empty here; [`super::BotConfig::load`]
    /// is what enforces them.
    pub fn from_env() -> Result<Self> {
        let greenapi_id_instance = env::var("GREENAPI_ID_INSTANCE").unwrap_or_default();
        let greenapi_access_token = env::var("GREENAPI_ACCESS_TOKEN").unwrap_or_default();
        let greenapi_api_url = env::var("GREENAPI_API_URL")
            .unwrap_or_else(|_| "https://api.green-api.com".to_string());
        let receive_timeout_secs = parse_or("RECEIVE_TIMEOUT_SECS", 5)?;
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/relay-bot.log".to_string());
        let history_dir = PathBuf::from(env::var("HISTORY_DIR").unwrap_or_else(|_| "./data".to_string()));
        let history_window = parse_or("HISTORY_WINDOW", history::DEFAULT_WINDOW)?;
        let lock_file = PathBuf::from(
            env::var("LOCK_FILE").unwrap_or_else(|_| "./relay-bot.lock".to_string()),
        );
        let lock_timeout_secs = parse_or("LOCK_TIMEOUT_SECS", 1)?;
        let max_concurrent_exchanges = parse_or("MAX_CONCURRENT_EXCHANGES", 1)?;
        let translate_url = env::var("TRANSLATE_URL")
            .unwrap_or_else(|_| translate::DEFAULT_TRANSLATE_URL.to_string());
        let translate_timeout_secs = parse_or("TRANSLATE_TIMEOUT_SECS", 15)?;
        let translate_cache_size = parse_or("TRANSLATE_CACHE_SIZE", 1024)?;

        Ok(Self {
            greenapi_id_instance,
            greenapi_access_token,
            greenapi_api_url,
            receive_timeout_secs,
            log_file,
            history_dir,
            history_window,
            lock_file,
            lock_timeout_secs,
            max_concurrent_exchanges,
            translate_url,
            translate_timeout_secs,
            translate_cache_size,
        })
    }

    /// Validate config (URLs parse, window and concurrency non-zero).
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.greenapi_api_url).with_context(|| {
            format!("GREENAPI_API_URL is not a valid URL: {}", self.greenapi_api_url)
        })?;
        reqwest::Url::parse(&self.translate_url)
            .with_context(|| format!("TRANSLATE_URL is not a valid URL: {}", self.translate_url))?;
        if self.history_window == 0 {
            anyhow::bail!("HISTORY_WINDOW must be greater than 0");
        }
        if self.max_concurrent_exchanges == 0 {
            anyhow::bail!("MAX_CONCURRENT_EXCHANGES must be greater than 0");
        }
        Ok(())
    }
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
