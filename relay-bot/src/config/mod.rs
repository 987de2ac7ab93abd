//! Bot configuration: BaseConfig (transport, storage, logging, runtime) + LlmConfig (completion backends).

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::{missing_required_vars, BotConfig, REQUIRED_VARS};
