//! Green API HTTP client: polls notifications, acknowledges them, sends replies.

use std::time::Duration;

use async_trait::async_trait;
use relay_core::{Bot, InboundMessage, RelayError};
use serde_json::json;
use tracing::{debug, error, instrument};

use super::notification::Notification;

/// Client for one Green API instance (`waInstance{id}`).
#[derive(Clone)]
pub struct GreenApiClient {
    api_url: String,
    id_instance: String,
    access_token: String,
    receive_timeout_secs: u64,
    client: reqwest::Client,
}

impl GreenApiClient {
    pub fn new(
        api_url: impl Into<String>,
        id_instance: impl Into<String>,
        access_token: impl Into<String>,
        receive_timeout_secs: u64,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            // Long polling holds the request open for up to receive_timeout_secs.
            .timeout(Duration::from_secs(receive_timeout_secs + 10))
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            id_instance: id_instance.into(),
            access_token: access_token.into(),
            receive_timeout_secs,
            client,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/waInstance{}/{}/{}",
            self.api_url, self.id_instance, method, self.access_token
        )
    }

    /// Waits up to the receive timeout for the next queued notification.
    #[instrument(skip(self))]
    pub async fn receive_notification(&self) -> Result<Option<Notification>, RelayError> {
        let resp = self
            .client
            .get(self.method_url("receiveNotification"))
            .query(&[("receiveTimeout", self.receive_timeout_secs)])
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("receiveNotification: {}", e)))?;
        let resp = check_status(resp, "receiveNotification").await?;
        let notification: Option<Notification> = resp
            .json()
            .await
            .map_err(|e| RelayError::Transport(format!("receiveNotification body: {}", e)))?;
        if let Some(n) = &notification {
            debug!(receipt_id = n.receipt_id, type_webhook = %n.body.type_webhook, "Notification received");
        }
        Ok(notification)
    }

    /// Removes a handled notification from the instance queue.
    #[instrument(skip(self))]
    pub async fn delete_notification(&self, receipt_id: u64) -> Result<(), RelayError> {
        let url = format!("{}/{}", self.method_url("deleteNotification"), receipt_id);
        let resp = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("deleteNotification: {}", e)))?;
        check_status(resp, "deleteNotification").await?;
        Ok(())
    }

    /// Sends `text` to `chat_id`, optionally quoting `quoted_message_id`.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        quoted_message_id: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut body = json!({ "chatId": chat_id, "message": text });
        if let Some(id) = quoted_message_id.filter(|id| !id.is_empty()) {
            body["quotedMessageId"] = json!(id);
        }
        let resp = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("sendMessage: {}", e)))?;
        check_status(resp, "sendMessage").await?;
        Ok(())
    }
}

async fn check_status(
    resp: reqwest::Response,
    method: &str,
) -> Result<reqwest::Response, RelayError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error!(method = %method, status = %status, body = %body, "Green API request failed");
    Err(RelayError::Transport(format!("{} returned {}", method, status)))
}

#[async_trait]
impl Bot for GreenApiClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> relay_core::Result<()> {
        self.send_text(chat_id, text, None).await
    }

    async fn reply_to(&self, message: &InboundMessage, text: &str) -> relay_core::Result<()> {
        self.send_text(&message.chat_id, text, Some(&message.id)).await
    }
}
