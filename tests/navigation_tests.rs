use cityguide::catalog::Catalog;
use cityguide::event::InboundEvent;
use cityguide::localization::{init_localization, t_lang};
use cityguide::navigation::{build_router, command_menu};
use cityguide::outbound::{Keyboard, OutboundAction, TextStyle};
use cityguide::router::{RequestCtx, Router};

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Router, Catalog) {
        // Initialize localization if not already done
        init_localization().expect("Failed to initialize localization");
        (build_router(), Catalog::embedded().unwrap())
    }

    fn dispatch(router: &Router, catalog: &Catalog, event: &InboundEvent) -> Vec<OutboundAction> {
        let ctx = RequestCtx {
            catalog,
            lang: None,
        };
        router.dispatch(event, &ctx)
    }

    /// Test /start: exactly one sent message with a greeting and the 4-row
    /// main-menu reply keyboard (choose city, location+contact, poll, about).
    #[test]
    fn test_start_command_sends_main_menu() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::command("start"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::SendMessage { text, keyboard, .. } = &actions[0] else {
            panic!("Expected a sent message, got {:?}", actions[0]);
        };
        assert!(text.contains("guide bot"));

        let Some(Keyboard::Reply { rows, .. }) = keyboard else {
            panic!("Expected a reply keyboard, got {keyboard:?}");
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 2); // location + contact share a row
        assert_eq!(rows[2].len(), 1);
        assert_eq!(rows[3].len(), 1);
    }

    /// Test a known city click: exactly one in-place edit with the city's
    /// name, description and section buttons.
    #[test]
    fn test_city_click_edits_to_detail() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::button("city_moscow"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::EditMessage { text, keyboard, .. } = &actions[0] else {
            panic!("Expected an edit, got {:?}", actions[0]);
        };
        assert!(text.contains("Moscow"));
        assert!(text.contains("capital"));
        assert_eq!(
            keyboard.as_ref().unwrap().callback_tokens(),
            vec![
                "attractions_moscow",
                "food_moscow",
                "photo_moscow",
                "review_moscow",
                "show_cities",
            ]
        );
    }

    /// Test an unknown city click: exactly one visible "not available"
    /// response, no fault, and no edit of the current screen.
    #[test]
    fn test_unknown_city_click_reports_not_found() {
        let (router, catalog) = setup();

        for data in ["city_unknown", "attractions_unknown", "food_unknown"] {
            let actions = dispatch(&router, &catalog, &InboundEvent::button(data));
            assert_eq!(actions.len(), 1, "one outbound action for {data}");
            let OutboundAction::SendMessage { text, keyboard, .. } = &actions[0] else {
                panic!("Expected a sent message for {data}, got {:?}", actions[0]);
            };
            assert_eq!(text, &t_lang("error-city-not-found", None));
            assert!(keyboard.is_none());
        }
    }

    /// Test idempotence: the same back-to-list click twice in a row produces
    /// two structurally identical edits.
    #[test]
    fn test_show_cities_is_idempotent() {
        let (router, catalog) = setup();
        let event = InboundEvent::button("show_cities");

        let first = dispatch(&router, &catalog, &event);
        let second = dispatch(&router, &catalog, &event);

        assert_eq!(first.len(), 1);
        assert!(matches!(first[0], OutboundAction::EditMessage { .. }));
        assert_eq!(first, second);
    }

    /// Test /cities and the reply-keyboard button: both send a new message
    /// with the city list (nothing to edit for a command or text trigger).
    #[test]
    fn test_city_list_triggers_send_not_edit() {
        let (router, catalog) = setup();

        let from_command = dispatch(&router, &catalog, &InboundEvent::command("cities"));
        let choose_label = t_lang("btn-choose-city", Some("en"));
        let from_text = dispatch(&router, &catalog, &InboundEvent::text(&choose_label));

        for actions in [&from_command, &from_text] {
            assert_eq!(actions.len(), 1);
            let OutboundAction::SendMessage { keyboard, .. } = &actions[0] else {
                panic!("Expected a sent message, got {:?}", actions[0]);
            };
            let tokens = keyboard.as_ref().unwrap().callback_tokens();
            assert_eq!(tokens, vec!["city_moscow", "city_spb"]);
        }
    }

    /// Test the Russian reply-keyboard label routes like the English one.
    #[test]
    fn test_russian_button_label_matches() {
        let (router, catalog) = setup();
        let label = t_lang("btn-choose-city", Some("ru"));
        assert_ne!(label, t_lang("btn-choose-city", Some("en")));

        let actions = dispatch(&router, &catalog, &InboundEvent::text(&label));
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], OutboundAction::SendMessage { .. }));
    }

    /// Test photo click: a new photo message, current screen left intact.
    #[test]
    fn test_photo_click_sends_photo() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::button("photo_spb"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::SendPhoto { caption, .. } = &actions[0] else {
            panic!("Expected a photo, got {:?}", actions[0]);
        };
        assert!(caption.contains("Saint Petersburg"));
    }

    /// Test review click: a new message with a cancel button, no edit.
    #[test]
    fn test_review_click_sends_prompt_with_cancel() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::button("review_moscow"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::SendMessage { text, keyboard, .. } = &actions[0] else {
            panic!("Expected a sent message, got {:?}", actions[0]);
        };
        assert!(text.contains("Moscow"));
        assert_eq!(
            keyboard.as_ref().unwrap().callback_tokens(),
            vec!["cancel_review"]
        );
    }

    /// Test cancelling a review: the prompt is edited into a confirmation
    /// and loses its keyboard.
    #[test]
    fn test_cancel_review_edits_prompt() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::button("cancel_review"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::EditMessage { text, keyboard, .. } = &actions[0] else {
            panic!("Expected an edit, got {:?}", actions[0]);
        };
        assert_eq!(text, &t_lang("review-cancelled", None));
        assert!(keyboard.is_none());
    }

    /// Test attachment handlers echo their payload.
    #[test]
    fn test_attachment_events() {
        let (router, catalog) = setup();

        let location = dispatch(
            &router,
            &catalog,
            &InboundEvent::Location {
                latitude: 55.7558,
                longitude: 37.6173,
            },
        );
        assert_eq!(location.len(), 1);
        assert!(location[0].text().contains("55.7558"));
        assert!(location[0].text().contains("37.6173"));

        let contact = dispatch(
            &router,
            &catalog,
            &InboundEvent::Contact {
                name: "Ada".to_string(),
                phone: "+7000".to_string(),
            },
        );
        assert_eq!(contact.len(), 1);
        assert!(contact[0].text().contains("Ada"));
        assert!(contact[0].text().contains("+7000"));

        let poll = dispatch(&router, &catalog, &InboundEvent::PollCreated);
        assert_eq!(poll.len(), 1);
        assert_eq!(poll[0].text(), t_lang("poll-created", None));
    }

    /// Test /hide removes the reply keyboard.
    #[test]
    fn test_hide_command_removes_keyboard() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::command("hide"));

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].keyboard(), Some(&Keyboard::Remove));
    }

    /// Test /help lists the command surface.
    #[test]
    fn test_help_command_lists_commands() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::command("help"));

        assert_eq!(actions.len(), 1);
        for command in ["/start", "/help", "/cities", "/hide", "/format"] {
            assert!(actions[0].text().contains(command));
        }
    }

    /// Test /format is styled and self-escaping.
    #[test]
    fn test_format_command_is_markdown() {
        let (router, catalog) = setup();
        let actions = dispatch(&router, &catalog, &InboundEvent::command("format"));

        assert_eq!(actions.len(), 1);
        let OutboundAction::SendMessage { style, .. } = &actions[0] else {
            panic!("Expected a sent message, got {:?}", actions[0]);
        };
        assert_eq!(*style, TextStyle::MarkdownV2);
    }

    /// Test routing misses: unrecognized text, commands and tokens are
    /// dropped without producing actions.
    #[test]
    fn test_unmatched_events_are_dropped() {
        let (router, catalog) = setup();

        for event in [
            InboundEvent::text("what is the weather"),
            InboundEvent::command("weather"),
            InboundEvent::button("teleport_moscow"),
            InboundEvent::button(""),
        ] {
            assert!(dispatch(&router, &catalog, &event).is_empty());
        }
    }

    /// Test the tie-break policy in the built table: exact literals are
    /// registered ahead of the prefix rules they overlap with.
    #[test]
    fn test_exact_literals_win_over_prefix_rules() {
        let (router, _catalog) = setup();

        assert_eq!(
            router.matched_rule(&InboundEvent::button("show_cities")),
            Some("cb-show-cities")
        );
        assert_eq!(
            router.matched_rule(&InboundEvent::button("cancel_review")),
            Some("cb-cancel-review")
        );
        // A prefixed token still reaches its prefix rule.
        assert_eq!(
            router.matched_rule(&InboundEvent::button("review_moscow")),
            Some("cb-review")
        );
    }

    /// Test the command menu covers the full command surface.
    #[test]
    fn test_command_menu_surface() {
        init_localization().expect("Failed to initialize localization");
        let menu = command_menu();
        let names: Vec<&str> = menu.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["start", "help", "cities", "hide", "format"]);
        assert!(menu.iter().all(|(_, description)| !description.is_empty()));
    }
}
