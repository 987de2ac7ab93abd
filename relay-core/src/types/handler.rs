//! Handler trait.

use async_trait::async_trait;

use super::message::InboundMessage;

/// Handles one inbound message and produces the reply text.
///
/// An `Err` is not dropped: the router turns it into a visible failure reply.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &InboundMessage) -> anyhow::Result<String>;
}
