//! Ordered-predicate event router.
//!
//! The router is an explicit value built once at startup: an append-only list
//! of `(predicate, handler)` rules evaluated in registration order, first
//! match wins. Predicates for the same event class are kept disjoint by
//! registration order alone (most specific first); the router itself does not
//! enforce exclusivity.

use tracing::debug;

use crate::catalog::Catalog;
use crate::event::InboundEvent;
use crate::outbound::OutboundAction;
use crate::token;

/// Per-event context shared by all handlers: the read-only catalog and the
/// requester's Telegram language code.
#[derive(Debug, Clone, Copy)]
pub struct RequestCtx<'a> {
    pub catalog: &'a Catalog,
    pub lang: Option<&'a str>,
}

/// A handler computes the outbound actions for one matched event. Handlers
/// are plain function pointers; all state they touch arrives via the context.
pub type Handler = fn(&InboundEvent, &RequestCtx<'_>) -> Vec<OutboundAction>;

/// A pure boolean condition over one inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact command-name match (`/start`).
    Command(String),
    /// Exact free-text match (reply-keyboard button labels).
    TextEquals(String),
    /// A location attachment is present.
    HasLocation,
    /// A contact attachment is present.
    HasContact,
    /// A poll was created.
    HasPoll,
    /// Callback token equals a literal (`show_cities`).
    CallbackExact(String),
    /// Callback token starts with `<action>` followed by the separator.
    CallbackPrefix(String),
}

impl Predicate {
    pub fn command(name: impl Into<String>) -> Self {
        Self::Command(name.into())
    }

    pub fn text_equals(text: impl Into<String>) -> Self {
        Self::TextEquals(text.into())
    }

    pub fn callback_exact(data: impl Into<String>) -> Self {
        Self::CallbackExact(data.into())
    }

    pub fn callback_prefix(action: impl Into<String>) -> Self {
        Self::CallbackPrefix(action.into())
    }

    /// Evaluate the predicate against an event. Pure; no side effects.
    pub fn matches(&self, event: &InboundEvent) -> bool {
        match (self, event) {
            (Self::Command(want), InboundEvent::Command { name, .. }) => want == name,
            (Self::TextEquals(want), InboundEvent::Text { body }) => want == body,
            (Self::HasLocation, InboundEvent::Location { .. }) => true,
            (Self::HasContact, InboundEvent::Contact { .. }) => true,
            (Self::HasPoll, InboundEvent::PollCreated) => true,
            (Self::CallbackExact(want), InboundEvent::ButtonClicked { data }) => want == data,
            (Self::CallbackPrefix(action), InboundEvent::ButtonClicked { data }) => data
                .strip_prefix(action.as_str())
                .and_then(|rest| rest.strip_prefix(token::SEPARATOR))
                .is_some(),
            _ => false,
        }
    }
}

struct Rule {
    name: &'static str,
    predicate: Predicate,
    handler: Handler,
}

/// Ordered rule list. Registration happens only during setup; dispatch never
/// mutates the router, so a built router is shared freely across chat tasks.
#[derive(Default)]
pub struct Router {
    rules: Vec<Rule>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Order is significant: earlier rules win ties, so
    /// callers register from most specific to least specific.
    pub fn register(&mut self, name: &'static str, predicate: Predicate, handler: Handler) {
        self.rules.push(Rule {
            name,
            predicate,
            handler,
        });
    }

    /// Invoke the first rule whose predicate accepts the event and return its
    /// outbound actions. An event no rule matches is dropped: the returned
    /// vector is empty and nothing is logged above debug level.
    pub fn dispatch(&self, event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
        for rule in &self.rules {
            if rule.predicate.matches(event) {
                debug!(rule = rule.name, "Dispatching event");
                return (rule.handler)(event, ctx);
            }
        }
        debug!(?event, "No rule matched, dropping event");
        Vec::new()
    }

    /// Name of the rule that would fire for this event, if any. Used by
    /// tests and tracing; evaluation order is identical to `dispatch`.
    pub fn matched_rule(&self, event: &InboundEvent) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(event))
            .map(|rule| rule.name)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::OutboundAction;

    fn empty_catalog() -> Catalog {
        Catalog::from_json("[]").unwrap()
    }

    fn reply_a(_: &InboundEvent, _: &RequestCtx<'_>) -> Vec<OutboundAction> {
        vec![OutboundAction::send_plain("a")]
    }

    fn reply_b(_: &InboundEvent, _: &RequestCtx<'_>) -> Vec<OutboundAction> {
        vec![OutboundAction::send_plain("b")]
    }

    #[test]
    fn test_first_match_wins_and_scanning_stops() {
        let mut router = Router::new();
        router.register("exact", Predicate::callback_exact("show_cities"), reply_a);
        router.register("prefix", Predicate::callback_prefix("show"), reply_b);

        let catalog = empty_catalog();
        let ctx = RequestCtx {
            catalog: &catalog,
            lang: None,
        };
        let actions = router.dispatch(&InboundEvent::button("show_cities"), &ctx);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].text(), "a");
    }

    #[test]
    fn test_reordering_overlapping_rules_changes_winner() {
        // Regression guard for the tie-break policy: the same two rules in
        // the opposite order fire the other handler.
        let mut router = Router::new();
        router.register("prefix", Predicate::callback_prefix("show"), reply_b);
        router.register("exact", Predicate::callback_exact("show_cities"), reply_a);

        let catalog = empty_catalog();
        let ctx = RequestCtx {
            catalog: &catalog,
            lang: None,
        };
        let actions = router.dispatch(&InboundEvent::button("show_cities"), &ctx);

        assert_eq!(actions[0].text(), "b");
        assert_eq!(
            router.matched_rule(&InboundEvent::button("show_cities")),
            Some("prefix")
        );
    }

    #[test]
    fn test_unmatched_event_is_dropped_silently() {
        let mut router = Router::new();
        router.register("start", Predicate::command("start"), reply_a);

        let catalog = empty_catalog();
        let ctx = RequestCtx {
            catalog: &catalog,
            lang: None,
        };
        assert!(router.dispatch(&InboundEvent::text("hello"), &ctx).is_empty());
        assert_eq!(router.matched_rule(&InboundEvent::text("hello")), None);
    }

    #[test]
    fn test_command_predicate_ignores_args() {
        let predicate = Predicate::command("cities");
        assert!(predicate.matches(&InboundEvent::Command {
            name: "cities".to_string(),
            args: "spb".to_string(),
        }));
        assert!(!predicate.matches(&InboundEvent::command("start")));
        assert!(!predicate.matches(&InboundEvent::text("/cities")));
    }

    #[test]
    fn test_attachment_predicates() {
        assert!(Predicate::HasLocation.matches(&InboundEvent::Location {
            latitude: 55.75,
            longitude: 37.61,
        }));
        assert!(Predicate::HasContact.matches(&InboundEvent::Contact {
            name: "Ada".to_string(),
            phone: "+100".to_string(),
        }));
        assert!(Predicate::HasPoll.matches(&InboundEvent::PollCreated));
        assert!(!Predicate::HasPoll.matches(&InboundEvent::text("poll")));
    }

    #[test]
    fn test_callback_prefix_requires_separator() {
        let predicate = Predicate::callback_prefix("city");
        assert!(predicate.matches(&InboundEvent::button("city_moscow")));
        assert!(!predicate.matches(&InboundEvent::button("city")));
        assert!(!predicate.matches(&InboundEvent::button("cityX")));
        // Prefix must match the action tag up to the first separator only.
        assert!(predicate.matches(&InboundEvent::button("city_nizhny_novgorod")));
    }
}
