//! Per-user ordered dispatch: one FIFO queue and worker task per user, a global bound on
//! concurrent exchanges.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use relay_core::{Bot, InboundMessage, UserId};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::router::Router;

struct Shared {
    router: Router,
    bot: Arc<dyn Bot>,
    permits: Semaphore,
}

impl Shared {
    async fn process(&self, message: &InboundMessage) {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!(error = %e, chat_id = %message.chat_id, "Dispatcher closed, dropping message");
                return;
            }
        };

        let Some(reply) = self.router.dispatch(message).await else {
            debug!(chat_id = %message.chat_id, kind = %message.kind.as_str(), "No handler for message");
            return;
        };

        match self.bot.reply_to(message, &reply).await {
            Ok(()) => info!(
                chat_id = %message.chat_id,
                message_id = %message.id,
                reply_len = reply.len(),
                "step: reply sent"
            ),
            Err(e) => error!(error = %e, chat_id = %message.chat_id, "Failed to send reply"),
        }
    }
}

/// How long a user worker waits for the next message before it exits.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

struct UserQueue {
    worker_id: u64,
    tx: mpsc::UnboundedSender<InboundMessage>,
}

/// Feeds messages to the router so that one user's messages are handled strictly in arrival
/// order while different users proceed concurrently, up to `max_concurrent` exchanges at once.
///
/// A user's worker exits after [`DEFAULT_IDLE_TIMEOUT`] (or the configured idle timeout) without
/// messages and drops its queue; the next message starts a new one.
pub struct Dispatcher {
    shared: Arc<Shared>,
    queues: Arc<DashMap<String, UserQueue>>,
    workers: Mutex<JoinSet<()>>,
    next_worker_id: AtomicU64,
    idle_timeout: Duration,
}

impl Dispatcher {
    /// `max_concurrent` of 0 is treated as 1.
    pub fn new(router: Router, bot: Arc<dyn Bot>, max_concurrent: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                router,
                bot,
                permits: Semaphore::new(max_concurrent.max(1)),
            }),
            queues: Arc::new(DashMap::new()),
            workers: Mutex::new(JoinSet::new()),
            next_worker_id: AtomicU64::new(0),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Queues `message` behind earlier messages from the same user. Returns false (and drops the
    /// message) when no handler answers its kind.
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, message_id = %message.id))]
    pub fn submit(&self, message: InboundMessage) -> bool {
        if !self.shared.router.handles(&message) {
            debug!(kind = %message.kind.as_str(), "Ignoring unsupported message");
            return false;
        }

        let key = queue_key(&message);
        // Sending under the entry guard keeps an idle worker from retiring between lookup and send.
        let mut queue = self
            .queues
            .entry(key.clone())
            .or_insert_with(|| self.spawn_worker(&key));
        let message = match queue.tx.send(message) {
            Ok(()) => return true,
            Err(mpsc::error::SendError(message)) => message,
        };

        warn!(queue = %key, "User worker gone, restarting");
        *queue = self.spawn_worker(&key);
        if let Err(e) = queue.tx.send(message) {
            error!(queue = %key, error = %e, "User queue closed");
            return false;
        }
        true
    }

    /// Handles one message inline, bypassing the queues.
    pub async fn process(&self, message: &InboundMessage) {
        self.shared.process(message).await;
    }

    /// Number of users with a live queue.
    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    /// Closes every queue and waits until already queued messages have been handled.
    pub async fn shutdown(&self) {
        self.queues.clear();
        let mut workers = std::mem::take(&mut *self.workers.lock());
        while let Some(res) = workers.join_next().await {
            if let Err(e) = res {
                error!(error = %e, "User worker failed");
            }
        }
        info!("Dispatcher stopped");
    }

    fn spawn_worker(&self, key: &str) -> UserQueue {
        let (tx, mut rx) = mpsc::unbounded_channel::<InboundMessage>();
        let worker_id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
        let shared = self.shared.clone();
        let queues = self.queues.clone();
        let idle_timeout = self.idle_timeout;
        let key = key.to_string();
        debug!(queue = %key, worker_id, "Starting user worker");

        let mut workers = self.workers.lock();
        // Reap finished workers so the set only holds live ones.
        while let Some(res) = workers.try_join_next() {
            if let Err(e) = res {
                error!(error = %e, "User worker failed");
            }
        }
        workers.spawn(async move {
            loop {
                match tokio::time::timeout(idle_timeout, rx.recv()).await {
                    Ok(Some(message)) => shared.process(&message).await,
                    Ok(None) => break,
                    Err(_) => {
                        let retired = queues
                            .remove_if(&key, |_, q| q.worker_id == worker_id && rx.is_empty())
                            .is_some();
                        if retired {
                            debug!(queue = %key, worker_id, "User worker idle, retired");
                            return;
                        }
                    }
                }
            }
            debug!(queue = %key, worker_id, "User worker finished");
        });

        UserQueue { worker_id, tx }
    }
}

/// Digits-only user id when there is one, so chat ids that share a history file share a queue.
fn queue_key(message: &InboundMessage) -> String {
    UserId::from_chat_id(&message.chat_id)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| message.chat_id.clone())
}
