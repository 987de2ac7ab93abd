//! History store trait.

use async_trait::async_trait;
use relay_core::UserId;

use crate::error::HistoryError;

/// Durable per-user conversation log. Lines are role-prefixed turns in arrival order.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns the stored lines, or an empty list when the user has none yet.
    async fn load(&self, user: &UserId) -> Result<Vec<String>, HistoryError>;

    /// Replaces the stored lines for `user`.
    async fn persist(&self, user: &UserId, history: &[String]) -> Result<(), HistoryError>;
}
