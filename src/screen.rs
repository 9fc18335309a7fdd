//! Screen model for in-place menu navigation.
//!
//! No screen state is stored server-side: the clicked button's callback token
//! carries the full target, so every transition is computed from the inbound
//! event alone. The effective menu stack is one level deep, with the parent
//! reconstructed from the token rather than remembered.

use crate::event::InboundEvent;
use crate::token::CallbackToken;

/// One navigable screen. Variants carrying a `String` hold a catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Greeting plus the persistent reply keyboard.
    MainMenu,
    /// Inline list of all cities.
    CityList,
    /// One city's name, description and section buttons.
    CityDetail(String),
    /// Attraction list of one city.
    Attractions(String),
    /// Food list of one city.
    Food(String),
    /// Photo of one city, sent alongside the current screen.
    Photo(String),
    /// Review invitation for one city, sent alongside the current screen.
    ReviewPrompt(String),
}

impl Screen {
    /// Whether reaching this screen from a button click replaces the current
    /// message in place. Photo and the review prompt are side-channel
    /// responses and always arrive as a new message, leaving the menu
    /// underneath intact. Command-triggered transitions always send a new
    /// message regardless, since there is nothing to edit.
    pub fn replaces_current(&self) -> bool {
        match self {
            Screen::CityList | Screen::CityDetail(_) | Screen::Attractions(_) | Screen::Food(_) => {
                true
            }
            Screen::MainMenu | Screen::Photo(_) | Screen::ReviewPrompt(_) => false,
        }
    }
}

/// The navigation transition table as a pure function.
///
/// Commands and callback tokens fully determine the target screen. Reply
/// keyboard button texts are locale data and are bound to their target by the
/// router rules instead (see `crate::navigation::build_router`). Events with
/// no navigation meaning return `None`.
pub fn next_screen(event: &InboundEvent) -> Option<Screen> {
    match event {
        InboundEvent::Command { name, .. } => match name.as_str() {
            "start" => Some(Screen::MainMenu),
            "cities" => Some(Screen::CityList),
            _ => None,
        },
        InboundEvent::ButtonClicked { data } => match CallbackToken::parse(data)? {
            CallbackToken::City(id) => Some(Screen::CityDetail(id)),
            CallbackToken::Attractions(id) => Some(Screen::Attractions(id)),
            CallbackToken::Food(id) => Some(Screen::Food(id)),
            CallbackToken::Photo(id) => Some(Screen::Photo(id)),
            CallbackToken::Review(id) => Some(Screen::ReviewPrompt(id)),
            CallbackToken::ShowCities => Some(Screen::CityList),
            // Dismissing the review prompt is not a navigation target.
            CallbackToken::CancelReview => None,
        },
        InboundEvent::Text { .. }
        | InboundEvent::Location { .. }
        | InboundEvent::Contact { .. }
        | InboundEvent::PollCreated => None,
    }
}
