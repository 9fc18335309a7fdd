//! Navigation controller: the handler set and the rule table.
//!
//! `build_router` registers every rule in a fixed order, most specific first
//! within each event class. Exact callback literals are registered before the
//! prefix rules; the router's first-match policy makes that ordering
//! load-bearing, so changes here need the dispatch tests re-checked.

use tracing::warn;

use crate::event::InboundEvent;
use crate::localization::{t_args_lang, t_lang, SUPPORTED_LANGUAGES};
use crate::outbound::{Keyboard, OutboundAction, TextStyle};
use crate::render::{format_examples_text, main_menu_keyboard, render, RenderError, Rendered};
use crate::router::{Predicate, RequestCtx, Router};
use crate::screen::{next_screen, Screen};

/// Build the complete rule table. Localization must be initialized first:
/// reply-keyboard predicates match the rendered button labels of every
/// supported language.
pub fn build_router() -> Router {
    let mut router = Router::new();

    // Commands.
    router.register("cmd-start", Predicate::command("start"), on_navigate);
    router.register("cmd-help", Predicate::command("help"), on_help);
    router.register("cmd-cities", Predicate::command("cities"), on_navigate);
    router.register("cmd-hide", Predicate::command("hide"), on_hide);
    router.register("cmd-format", Predicate::command("format"), on_format);

    // Reply-keyboard button texts, one rule per supported language.
    for lang in SUPPORTED_LANGUAGES {
        router.register(
            "text-choose-city",
            Predicate::text_equals(t_lang("btn-choose-city", Some(lang))),
            on_show_city_list,
        );
        router.register(
            "text-about",
            Predicate::text_equals(t_lang("btn-about", Some(lang))),
            on_about,
        );
    }

    // Attachments.
    router.register("location", Predicate::HasLocation, on_location);
    router.register("contact", Predicate::HasContact, on_contact);
    router.register("poll", Predicate::HasPoll, on_poll);

    // Callback tokens: exact literals first, prefix rules after. `show_cities`
    // must never reach a prefix rule as action `show`.
    router.register(
        "cb-show-cities",
        Predicate::callback_exact("show_cities"),
        on_navigate,
    );
    router.register(
        "cb-cancel-review",
        Predicate::callback_exact("cancel_review"),
        on_cancel_review,
    );
    router.register("cb-city", Predicate::callback_prefix("city"), on_navigate);
    router.register(
        "cb-attractions",
        Predicate::callback_prefix("attractions"),
        on_navigate,
    );
    router.register("cb-food", Predicate::callback_prefix("food"), on_navigate);
    router.register("cb-photo", Predicate::callback_prefix("photo"), on_navigate);
    router.register("cb-review", Predicate::callback_prefix("review"), on_navigate);

    router
}

/// The command surface registered with the chat protocol at startup.
pub fn command_menu() -> Vec<(&'static str, String)> {
    vec![
        ("start", t_lang("cmd-start", None)),
        ("help", t_lang("cmd-help", None)),
        ("cities", t_lang("cmd-cities", None)),
        ("hide", t_lang("cmd-hide", None)),
        ("format", t_lang("cmd-format", None)),
    ]
}

/// Shared navigation handler: compute the target screen from the event,
/// render it, and choose between an in-place edit and a new message.
fn on_navigate(event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    match next_screen(event) {
        Some(screen) => respond(&screen, event, ctx),
        None => Vec::new(),
    }
}

/// Reply-keyboard "choose a city" button. Same target as `/cities`; the
/// trigger is locale-dependent text, so it bypasses the transition table.
fn on_show_city_list(event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    respond(&Screen::CityList, event, ctx)
}

fn on_help(_event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::send_plain(t_lang("help-text", ctx.lang))]
}

fn on_hide(_event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::SendMessage {
        text: t_lang("keyboard-hidden", ctx.lang),
        style: TextStyle::Plain,
        keyboard: Some(Keyboard::Remove),
    }]
}

fn on_format(_event: &InboundEvent, _ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::SendMessage {
        text: format_examples_text(),
        style: TextStyle::MarkdownV2,
        keyboard: None,
    }]
}

fn on_about(_event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::SendMessage {
        text: t_lang("about-bot", ctx.lang),
        style: TextStyle::Plain,
        keyboard: Some(main_menu_keyboard(ctx.lang)),
    }]
}

fn on_location(event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    let InboundEvent::Location {
        latitude,
        longitude,
    } = event
    else {
        return Vec::new();
    };
    vec![OutboundAction::send_plain(t_args_lang(
        "location-received",
        &[
            ("latitude", &latitude.to_string()),
            ("longitude", &longitude.to_string()),
        ],
        ctx.lang,
    ))]
}

fn on_contact(event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    let InboundEvent::Contact { name, phone } = event else {
        return Vec::new();
    };
    vec![OutboundAction::send_plain(t_args_lang(
        "contact-received",
        &[("name", name), ("phone", phone)],
        ctx.lang,
    ))]
}

fn on_poll(_event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::send_plain(t_lang("poll-created", ctx.lang))]
}

/// Dismiss the review prompt: the prompt message itself is edited into a
/// confirmation and loses its cancel button.
fn on_cancel_review(_event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    vec![OutboundAction::EditMessage {
        text: t_lang("review-cancelled", ctx.lang),
        style: TextStyle::Plain,
        keyboard: None,
    }]
}

/// Render a screen and wrap it in the right delivery. In-place edits apply
/// only to button clicks; command and text triggers have no message to edit.
/// An unknown city id answers with one visible "not available" message and
/// is logged as a recoverable anomaly.
fn respond(screen: &Screen, event: &InboundEvent, ctx: &RequestCtx<'_>) -> Vec<OutboundAction> {
    match render(screen, ctx.catalog, ctx.lang) {
        Ok(Rendered::Message {
            text,
            style,
            keyboard,
        }) => {
            let in_place = matches!(event, InboundEvent::ButtonClicked { .. })
                && screen.replaces_current();
            if in_place {
                vec![OutboundAction::EditMessage {
                    text,
                    style,
                    keyboard,
                }]
            } else {
                vec![OutboundAction::SendMessage {
                    text,
                    style,
                    keyboard,
                }]
            }
        }
        Ok(Rendered::Photo { url, caption }) => vec![OutboundAction::SendPhoto { url, caption }],
        Err(RenderError::UnknownCity(id)) => {
            warn!(city_id = %id, "Callback token referenced a city missing from the catalog");
            vec![OutboundAction::send_plain(t_lang(
                "error-city-not-found",
                ctx.lang,
            ))]
        }
    }
}
