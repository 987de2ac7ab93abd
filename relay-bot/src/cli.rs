//! CLI parser and the non-running commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use history::{HistoryStore, JsonFileHistoryStore};
use prompt::Turn;
use relay_core::UserId;

use crate::config::{missing_required_vars, BaseConfig, BotConfig, REQUIRED_VARS};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "WhatsApp relay bot: translation, rolling history, LLM replies", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env).
    Run,
    /// Check that required environment variables are set and config is valid.
    Check,
    /// Print the persisted history for a chat.
    History {
        #[arg(short, long)]
        chat_id: String,
    },
}

/// Load BotConfig from environment.
pub fn load_config() -> Result<BotConfig> {
    BotConfig::load()
}

/// One line per required variable, then validation of the rest. Errors when anything is missing
/// or invalid.
pub fn check_report() -> Result<String> {
    let missing = missing_required_vars();
    let mut report = String::new();
    for name in REQUIRED_VARS {
        let state = if missing.contains(&name) { "missing" } else { "set" };
        report.push_str(&format!("{}: {}\n", name, state));
    }
    if !missing.is_empty() {
        anyhow::bail!(
            "{}Missing required environment variables: {}",
            report,
            missing.join(", ")
        );
    }
    let config = load_config()?;
    config.validate()?;
    report.push_str("config: valid\n");
    Ok(report)
}

/// Reads the stored history lines for `chat_id`.
pub async fn read_history(chat_id: &str) -> Result<Vec<String>> {
    let base = BaseConfig::from_env()?;
    let user = UserId::from_chat_id(chat_id)?;
    let store = JsonFileHistoryStore::new(base.history_dir);
    store
        .load(&user)
        .await
        .with_context(|| format!("Failed to read history for {}", user))
}

/// One numbered line per stored turn, role label padded. Lines without a role prefix are shown
/// verbatim.
pub fn render_history(lines: &[String]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        match Turn::parse(line) {
            Some(turn) => out.push_str(&format!("{:>3}. {:<4} | {}\n", i + 1, turn.role.label(), turn.content)),
            None => out.push_str(&format!("{:>3}. {}\n", i + 1, line)),
        }
    }
    out
}
