//! relay-bot binary: run the relay, check config, inspect history.

use anyhow::Result;
use clap::Parser;
use relay_bot::{check_report, load_config, read_history, render_history, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = load_config()?;
            run_bot(config).await
        }
        Commands::Check => {
            print!("{}", check_report()?);
            Ok(())
        }
        Commands::History { chat_id } => {
            let lines = read_history(&chat_id).await?;
            if lines.is_empty() {
                println!("No history for {}", chat_id);
            }
            print!("{}", render_history(&lines));
            Ok(())
        }
    }
}
