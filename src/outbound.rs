//! Transport-free outbound actions.
//!
//! Handlers describe what should happen in the chat as plain values; the
//! session layer (`crate::bot`) translates them into Telegram API calls.
//! Keeping this boundary value-typed is what makes the routing and
//! navigation core testable without a network.

/// How the text of an outbound message is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    MarkdownV2,
}

/// What pressing an inline button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Send the callback token back to the bot.
    Callback(String),
    /// Open an external URL.
    Url(String),
    /// Prompt the user to share the bot via an inline query.
    SwitchInline(String),
}

/// One inline button: a label and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub action: ButtonAction,
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(token.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn switch_inline(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::SwitchInline(query.into()),
        }
    }
}

/// What a reply-keyboard button requests from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRequest {
    /// Plain text button; its label is sent back as a message.
    None,
    Location,
    Contact,
    Poll,
}

/// One button of the persistent reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyButton {
    pub label: String,
    pub request: ReplyRequest,
}

impl ReplyButton {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            request: ReplyRequest::None,
        }
    }

    pub fn request(label: impl Into<String>, request: ReplyRequest) -> Self {
        Self {
            label: label.into(),
            request,
        }
    }
}

/// A button layout attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Rows of inline buttons under the message.
    Inline(Vec<Vec<InlineButton>>),
    /// Persistent reply keyboard with an input-field placeholder.
    Reply {
        rows: Vec<Vec<ReplyButton>>,
        placeholder: Option<String>,
    },
    /// Remove the persistent reply keyboard.
    Remove,
}

impl Keyboard {
    /// Callback tokens of all inline buttons, in layout order. Empty for
    /// non-inline keyboards.
    pub fn callback_tokens(&self) -> Vec<&str> {
        match self {
            Keyboard::Inline(rows) => rows
                .iter()
                .flatten()
                .filter_map(|b| match &b.action {
                    ButtonAction::Callback(token) => Some(token.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of button rows.
    pub fn row_count(&self) -> usize {
        match self {
            Keyboard::Inline(rows) => rows.len(),
            Keyboard::Reply { rows, .. } => rows.len(),
            Keyboard::Remove => 0,
        }
    }
}

/// One outbound request to the chat session.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    /// Post a new message.
    SendMessage {
        text: String,
        style: TextStyle,
        keyboard: Option<Keyboard>,
    },
    /// Replace the text and buttons of the message the event came from.
    EditMessage {
        text: String,
        style: TextStyle,
        keyboard: Option<Keyboard>,
    },
    /// Post a photo with a caption.
    SendPhoto { url: String, caption: String },
}

impl OutboundAction {
    pub fn send_plain(text: impl Into<String>) -> Self {
        Self::SendMessage {
            text: text.into(),
            style: TextStyle::Plain,
            keyboard: None,
        }
    }

    /// The message text or caption of this action.
    pub fn text(&self) -> &str {
        match self {
            Self::SendMessage { text, .. } | Self::EditMessage { text, .. } => text,
            Self::SendPhoto { caption, .. } => caption,
        }
    }

    /// The attached keyboard, if any.
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Self::SendMessage { keyboard, .. } | Self::EditMessage { keyboard, .. } => {
                keyboard.as_ref()
            }
            Self::SendPhoto { .. } => None,
        }
    }
}
