//! Steps shared by the text and image handlers: language gate, history cycle, back-translation.

use history::truncate_window;
use prompt::{build_history_prompt, Turn};
use relay_core::UserId;
use tracing::{info, warn};
use translate::Lang;

use crate::components::AppContext;

/// Inbound text after the language gate.
pub(crate) struct Gated {
    /// The raw text contained target-script characters.
    pub inbound_target: bool,
    /// English text when `inbound_target`, otherwise the raw text.
    pub text: String,
}

/// Translates target-script text to English; anything else passes through unchanged.
pub(crate) async fn gate_inbound(ctx: &AppContext, raw: &str) -> Gated {
    if ctx.detector.is_target_script(raw) {
        info!("step: inbound is target script, translating to English");
        Gated {
            inbound_target: true,
            text: ctx.translator.translate(raw, Lang::English).await,
        }
    } else {
        Gated {
            inbound_target: false,
            text: raw.to_string(),
        }
    }
}

/// One exchange between loading history and persisting the reply.
pub(crate) struct PendingExchange {
    user: UserId,
    /// Truncated working copy, already holding the user turn.
    history: Vec<String>,
    /// Prompt for the completion backend, built before truncation.
    pub prompt: String,
}

/// Loads history, appends the user turn, builds the prompt, then truncates for persistence.
///
/// Unreadable history is treated as empty.
pub(crate) async fn begin(ctx: &AppContext, user: &UserId, text: &str) -> PendingExchange {
    let mut history = match ctx.history.load(user).await {
        Ok(history) => history,
        Err(e) => {
            warn!(user_id = %user, error = %e, "Failed to load history, starting empty");
            Vec::new()
        }
    };

    let turn = Turn::user(text);
    history.push(turn.to_string());
    let prompt = build_history_prompt(&history, &turn);
    let history = truncate_window(history, ctx.history_window);
    info!(user_id = %user, turns = history.len(), prompt_len = prompt.len(), "step: history prepared");

    PendingExchange {
        user: user.clone(),
        history,
        prompt,
    }
}

impl PendingExchange {
    /// Appends the bot turn and persists. A write failure is logged; the reply still goes out.
    pub(crate) async fn finish(mut self, ctx: &AppContext, response: &str) {
        self.history.push(Turn::bot(response).to_string());
        self.persist(ctx).await;
    }

    /// Persists the user turn alone when no reply was produced.
    pub(crate) async fn abandon(self, ctx: &AppContext) {
        self.persist(ctx).await;
    }

    async fn persist(&self, ctx: &AppContext) {
        match ctx.history.persist(&self.user, &self.history).await {
            Ok(()) => info!(user_id = %self.user, turns = self.history.len(), "step: history persisted"),
            Err(e) => warn!(user_id = %self.user, error = %e, "Failed to persist history"),
        }
    }
}

/// Translates the reply to Hebrew when the inbound text was Hebrew and the reply is not.
pub(crate) async fn translate_back(ctx: &AppContext, inbound_target: bool, response: String) -> String {
    if inbound_target && !ctx.detector.is_target_script(&response) {
        info!("step: translating reply back");
        ctx.translator.translate(&response, Lang::Hebrew).await
    } else {
        response
    }
}
