//! Callback handler: routes inline-button clicks.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, warn};

use super::deliver::deliver;
use super::AppState;
use crate::event::InboundEvent;
use crate::router::RequestCtx;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query");

    let event = InboundEvent::ButtonClicked {
        data: q.data.clone().unwrap_or_default(),
    };

    let ctx = RequestCtx {
        catalog: &state.catalog,
        lang: q.from.language_code.as_deref(),
    };
    let actions = state.router.dispatch(&event, &ctx);

    if let Some(message) = &q.message {
        deliver(&bot, message.chat().id, Some(message.id()), actions).await;
    } else if !actions.is_empty() {
        // Telegram drops the attached message for queries older than 48h.
        warn!(user_id = %q.from.id, "Callback without an attached message, dropping actions");
    }

    // Answer the callback query to remove the loading state.
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
