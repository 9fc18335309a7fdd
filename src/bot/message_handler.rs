//! Message handler: normalizes incoming Telegram messages and routes them.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use super::deliver::deliver;
use super::AppState;
use crate::event::{classify_text, InboundEvent};
use crate::router::RequestCtx;

/// Normalize a Telegram message into an inbound event. Message kinds the bot
/// has no rules for (stickers, voice notes, ...) yield `None` and are dropped
/// before routing.
pub fn classify_message(msg: &Message) -> Option<InboundEvent> {
    if let Some(text) = msg.text() {
        Some(classify_text(text))
    } else if let Some(location) = msg.location() {
        Some(InboundEvent::Location {
            latitude: location.latitude,
            longitude: location.longitude,
        })
    } else if let Some(contact) = msg.contact() {
        Some(InboundEvent::Contact {
            name: contact.first_name.clone(),
            phone: contact.phone_number.clone(),
        })
    } else if msg.poll().is_some() {
        Some(InboundEvent::PollCreated)
    } else {
        None
    }
}

pub async fn message_handler(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(event) = classify_message(&msg) else {
        debug!(user_id = %msg.chat.id, "Ignoring unsupported message kind");
        return Ok(());
    };

    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    let ctx = RequestCtx {
        catalog: &state.catalog,
        lang: language_code,
    };
    let actions = state.router.dispatch(&event, &ctx);
    deliver(&bot, msg.chat.id, None, actions).await;

    Ok(())
}
