//! Delivery of outbound actions through the Telegram API.

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode, Url};
use tracing::{error, warn};

use super::markup;
use crate::outbound::{Keyboard, OutboundAction, TextStyle};

/// Execute the outbound actions produced for one event. `edit_target` is the
/// message the triggering button click came from, if any.
///
/// Delivery is fire-and-forget: a failed action is logged and does not stop
/// later actions, and it never alters navigation behavior. The screen state
/// lives in the messages themselves, so there is nothing to roll back.
pub async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    edit_target: Option<MessageId>,
    actions: Vec<OutboundAction>,
) {
    for action in actions {
        if let Err(e) = deliver_one(bot, chat_id, edit_target, action).await {
            error!(user_id = %chat_id, error = %e, "Failed to deliver outbound action");
        }
    }
}

async fn deliver_one(
    bot: &Bot,
    chat_id: ChatId,
    edit_target: Option<MessageId>,
    action: OutboundAction,
) -> Result<()> {
    match action {
        OutboundAction::SendMessage {
            text,
            style,
            keyboard,
        } => send_message(bot, chat_id, text, style, keyboard).await,
        OutboundAction::EditMessage {
            text,
            style,
            keyboard,
        } => {
            let Some(message_id) = edit_target else {
                // Only button clicks carry an editable message; fall back to
                // sending so the user still gets a response.
                warn!(user_id = %chat_id, "Edit requested without a target message, sending instead");
                return send_message(bot, chat_id, text, style, keyboard).await;
            };

            let mut request = bot.edit_message_text(chat_id, message_id, text);
            if style == TextStyle::MarkdownV2 {
                request = request.parse_mode(ParseMode::MarkdownV2);
            }
            match keyboard {
                Some(Keyboard::Inline(rows)) => {
                    request = request.reply_markup(markup::inline_markup(&rows));
                }
                Some(_) => {
                    warn!(user_id = %chat_id, "Only inline keyboards can be attached to an edit");
                }
                None => {}
            }
            request.await?;
            Ok(())
        }
        OutboundAction::SendPhoto { url, caption } => {
            let url = Url::parse(&url).with_context(|| format!("Invalid photo URL: {url}"))?;
            bot.send_photo(chat_id, InputFile::url(url))
                .caption(caption)
                .await?;
            Ok(())
        }
    }
}

async fn send_message(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    style: TextStyle,
    keyboard: Option<Keyboard>,
) -> Result<()> {
    let mut request = bot.send_message(chat_id, text);
    if style == TextStyle::MarkdownV2 {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(markup::reply_markup(&keyboard));
    }
    request.await?;
    Ok(())
}
