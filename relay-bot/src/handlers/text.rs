//! Text handler: language gate, history, completion, back-translation.

use async_trait::async_trait;
use prompt::SYSTEM_PERSONA;
use relay_core::{Handler, HandlerError, InboundMessage, UserId};
use tracing::{info, instrument};

use super::exchange::{begin, gate_inbound, translate_back};
use crate::components::AppContext;

/// Answers plain text messages through the text completion backend.
pub struct TextHandler {
    ctx: AppContext,
}

impl TextHandler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for TextHandler {
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, message_id = %message.id))]
    async fn handle(&self, message: &InboundMessage) -> anyhow::Result<String> {
        let user = UserId::from_chat_id(&message.chat_id)?;
        info!(user_id = %user, "step: text handler started");

        let gated = gate_inbound(&self.ctx, &message.text).await;
        let pending = begin(&self.ctx, &user, &gated.text).await;

        let response = match self
            .ctx
            .llm
            .complete(&pending.prompt, SYSTEM_PERSONA, &self.ctx.model_selector)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                pending.abandon(&self.ctx).await;
                return Err(HandlerError::Completion(e.to_string()).into());
            }
        };
        info!(user_id = %user, response_len = response.len(), "step: completion received");

        pending.finish(&self.ctx, &response).await;
        Ok(translate_back(&self.ctx, gated.inbound_target, response).await)
    }
}
