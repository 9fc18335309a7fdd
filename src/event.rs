//! Normalized inbound events.
//!
//! Every update delivered by the chat session is classified into exactly one
//! `InboundEvent` variant before routing. Keeping this a closed enum means
//! predicates are exhaustive matches instead of runtime attribute probing.

/// One inbound event from a chat conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A slash command, e.g. `/cities`. `name` excludes the leading `/` and
    /// any `@botname` suffix; `args` is the trimmed remainder of the line.
    Command { name: String, args: String },
    /// Free text that is not a command.
    Text { body: String },
    /// A shared location attachment.
    Location { latitude: f64, longitude: f64 },
    /// A shared contact attachment.
    Contact { name: String, phone: String },
    /// A poll created through the reply keyboard.
    PollCreated,
    /// An inline-button click carrying its opaque callback token.
    ButtonClicked { data: String },
}

impl InboundEvent {
    pub fn command(name: &str) -> Self {
        Self::Command {
            name: name.to_string(),
            args: String::new(),
        }
    }

    pub fn text(body: &str) -> Self {
        Self::Text {
            body: body.to_string(),
        }
    }

    pub fn button(data: &str) -> Self {
        Self::ButtonClicked {
            data: data.to_string(),
        }
    }
}

/// Classify a message text as either a command or free text.
///
/// `/cities@cityguide_bot spb` parses to `Command { name: "cities",
/// args: "spb" }`. A lone `/` is treated as free text.
pub fn classify_text(text: &str) -> InboundEvent {
    let Some(rest) = text.strip_prefix('/') else {
        return InboundEvent::text(text);
    };

    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };

    // Commands in group chats arrive as /name@botname.
    let name = head.split('@').next().unwrap_or(head);

    if name.is_empty() {
        return InboundEvent::text(text);
    }

    InboundEvent::Command {
        name: name.to_string(),
        args: args.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(classify_text("hello"), InboundEvent::text("hello"));
    }

    #[test]
    fn test_bare_command() {
        assert_eq!(classify_text("/start"), InboundEvent::command("start"));
    }

    #[test]
    fn test_command_with_args() {
        assert_eq!(
            classify_text("/cities  spb "),
            InboundEvent::Command {
                name: "cities".to_string(),
                args: "spb".to_string(),
            }
        );
    }

    #[test]
    fn test_command_with_bot_suffix() {
        assert_eq!(
            classify_text("/help@cityguide_bot"),
            InboundEvent::command("help")
        );
    }

    #[test]
    fn test_lone_slash_is_text() {
        assert_eq!(classify_text("/"), InboundEvent::text("/"));
    }
}
