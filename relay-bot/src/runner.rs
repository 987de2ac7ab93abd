//! Runner: config validation, tracing, process lock, component assembly, poll loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use relay_core::{init_tracing, Bot};
use tracing::{error, info, instrument, warn};

use crate::components::build_app_context;
use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::greenapi::GreenApiClient;
use crate::lock::ProcessLock;
use crate::router::build_router;

const RECEIVE_BACKOFF: Duration = Duration::from_secs(5);

/// Main entry: validate config, init logging, take the process lock, build components, then poll
/// Green API until Ctrl-C. Returns `Ok(())` without polling when another instance holds the lock.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.base().log_file)?;

    let base = config.base();
    let lock_timeout = Duration::from_secs(base.lock_timeout_secs);
    let Some(_lock) = ProcessLock::acquire(&base.lock_file, lock_timeout)
        .await
        .with_context(|| format!("Failed to open lock file {}", base.lock_file.display()))?
    else {
        warn!(
            lock_file = %base.lock_file.display(),
            "Another instance is already running, not starting"
        );
        return Ok(());
    };

    let ctx = build_app_context(&config)?;
    let router = build_router(&ctx);
    let client = GreenApiClient::new(
        base.greenapi_api_url.clone(),
        base.greenapi_id_instance.clone(),
        base.greenapi_access_token.clone(),
        base.receive_timeout_secs,
    )?;
    let bot: Arc<dyn Bot> = Arc::new(client.clone());
    let dispatcher = Dispatcher::new(router, bot, base.max_concurrent_exchanges);

    info!(
        id_instance = %base.greenapi_id_instance,
        max_concurrent_exchanges = base.max_concurrent_exchanges,
        "Bot started successfully"
    );

    tokio::select! {
        _ = poll_loop(&client, &dispatcher) => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutdown requested");
        }
    }

    dispatcher.shutdown().await;
    info!("Bot stopped");
    Ok(())
}

/// Receives notifications forever: convert, acknowledge, submit.
pub async fn poll_loop(client: &GreenApiClient, dispatcher: &Dispatcher) {
    loop {
        let notification = match client.receive_notification().await {
            Ok(Some(n)) => n,
            Ok(None) => continue,
            Err(e) => {
                error!(error = %e, "Failed to receive notification, backing off");
                tokio::time::sleep(RECEIVE_BACKOFF).await;
                continue;
            }
        };

        let inbound = notification.to_inbound();
        if let Err(e) = client.delete_notification(notification.receipt_id).await {
            warn!(receipt_id = notification.receipt_id, error = %e, "Failed to delete notification");
        }

        let Some(message) = inbound else {
            continue;
        };
        info!(
            chat_id = %message.chat_id,
            message_id = %message.id,
            kind = %message.kind.as_str(),
            "Received message"
        );
        dispatcher.submit(message);
    }
}
