//! Conversion of core keyboard layouts into Telegram markup types.

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    KeyboardButtonPollType, ReplyKeyboardMarkup, ReplyKeyboardRemove, ReplyMarkup, Url,
};
use tracing::warn;

use crate::outbound::{ButtonAction, InlineButton, Keyboard, ReplyButton, ReplyRequest};

/// Convert inline button rows into Telegram inline markup.
pub fn inline_markup(rows: &[Vec<InlineButton>]) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = rows
        .iter()
        .map(|row| row.iter().map(inline_button).collect())
        .collect();
    InlineKeyboardMarkup::new(buttons)
}

/// Convert any core keyboard into reply markup for a sent message.
pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(inline_markup(rows)),
        Keyboard::Reply { rows, placeholder } => {
            let rows: Vec<Vec<KeyboardButton>> = rows
                .iter()
                .map(|row| row.iter().map(reply_button).collect())
                .collect();
            let mut markup = ReplyKeyboardMarkup::new(rows);
            markup.resize_keyboard = true;
            if let Some(placeholder) = placeholder {
                markup = markup.input_field_placeholder(placeholder.clone());
            }
            ReplyMarkup::Keyboard(markup)
        }
        Keyboard::Remove => ReplyMarkup::KeyboardRemove(ReplyKeyboardRemove::new()),
    }
}

fn inline_button(button: &InlineButton) -> InlineKeyboardButton {
    match &button.action {
        ButtonAction::Callback(data) => {
            InlineKeyboardButton::callback(button.label.clone(), data.clone())
        }
        ButtonAction::Url(url) => match Url::parse(url) {
            Ok(url) => InlineKeyboardButton::url(button.label.clone(), url),
            Err(e) => {
                // A malformed URL comes from our own screen data; degrade the
                // button to an inert callback instead of failing the screen.
                warn!(url = %url, error = %e, "Invalid button URL");
                InlineKeyboardButton::callback(button.label.clone(), "noop".to_string())
            }
        },
        ButtonAction::SwitchInline(query) => {
            InlineKeyboardButton::switch_inline_query(button.label.clone(), query.clone())
        }
    }
}

fn reply_button(button: &ReplyButton) -> KeyboardButton {
    let base = KeyboardButton::new(button.label.clone());
    match button.request {
        ReplyRequest::None => base,
        ReplyRequest::Location => base.request(ButtonRequest::Location),
        ReplyRequest::Contact => base.request(ButtonRequest::Contact),
        ReplyRequest::Poll => {
            base.request(ButtonRequest::Poll(KeyboardButtonPollType { poll_type: None }))
        }
    }
}
