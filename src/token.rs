//! Callback-token codec.
//!
//! Inline buttons carry an opaque ASCII token of the form `<action>_<id>`,
//! plus the standalone literals `show_cities` and `cancel_review`. This module
//! is the only place that builds or splits tokens.
//!
//! The separator is the *first* `_` in the token. Action tags never contain
//! `_`, so ids that do (e.g. `nizhny_novgorod`) survive a round trip without
//! any escaping. Standalone literals are matched exactly before any prefix
//! split, which is also the registration order the router relies on.

/// Separator between the action tag and the entity id.
pub const SEPARATOR: char = '_';

/// A decoded callback token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    /// Open the detail screen of a city.
    City(String),
    /// Open the attractions section of a city.
    Attractions(String),
    /// Open the food section of a city.
    Food(String),
    /// Request a photo of a city.
    Photo(String),
    /// Open the review prompt for a city.
    Review(String),
    /// Return to the city list.
    ShowCities,
    /// Dismiss the review prompt.
    CancelReview,
}

impl CallbackToken {
    /// Encode the token into its wire form.
    pub fn encode(&self) -> String {
        match self {
            Self::City(id) => format!("city{SEPARATOR}{id}"),
            Self::Attractions(id) => format!("attractions{SEPARATOR}{id}"),
            Self::Food(id) => format!("food{SEPARATOR}{id}"),
            Self::Photo(id) => format!("photo{SEPARATOR}{id}"),
            Self::Review(id) => format!("review{SEPARATOR}{id}"),
            Self::ShowCities => "show_cities".to_string(),
            Self::CancelReview => "cancel_review".to_string(),
        }
    }

    /// Decode a wire token. Unknown tokens decode to `None` and fall through
    /// the router as a routing miss.
    pub fn parse(data: &str) -> Option<Self> {
        // Exact literals first: `show_cities` must not split as action `show`.
        match data {
            "show_cities" => return Some(Self::ShowCities),
            "cancel_review" => return Some(Self::CancelReview),
            _ => {}
        }

        let (action, id) = data.split_once(SEPARATOR)?;
        if id.is_empty() {
            return None;
        }

        let id = id.to_string();
        match action {
            "city" => Some(Self::City(id)),
            "attractions" => Some(Self::Attractions(id)),
            "food" => Some(Self::Food(id)),
            "photo" => Some(Self::Photo(id)),
            "review" => Some(Self::Review(id)),
            _ => None,
        }
    }

    /// The embedded city id, if the token carries one.
    pub fn city_id(&self) -> Option<&str> {
        match self {
            Self::City(id)
            | Self::Attractions(id)
            | Self::Food(id)
            | Self::Photo(id)
            | Self::Review(id) => Some(id),
            Self::ShowCities | Self::CancelReview => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_actions() {
        let tokens = [
            CallbackToken::City("moscow".to_string()),
            CallbackToken::Attractions("moscow".to_string()),
            CallbackToken::Food("spb".to_string()),
            CallbackToken::Photo("spb".to_string()),
            CallbackToken::Review("moscow".to_string()),
            CallbackToken::ShowCities,
            CallbackToken::CancelReview,
        ];

        for token in tokens {
            assert_eq!(CallbackToken::parse(&token.encode()), Some(token));
        }
    }

    #[test]
    fn test_id_with_underscore_round_trips() {
        let token = CallbackToken::City("nizhny_novgorod".to_string());
        assert_eq!(token.encode(), "city_nizhny_novgorod");
        assert_eq!(CallbackToken::parse("city_nizhny_novgorod"), Some(token));
    }

    #[test]
    fn test_literals_win_over_prefix_split() {
        // `show_cities` would otherwise split as action `show`, id `cities`.
        assert_eq!(
            CallbackToken::parse("show_cities"),
            Some(CallbackToken::ShowCities)
        );
        assert_eq!(
            CallbackToken::parse("cancel_review"),
            Some(CallbackToken::CancelReview)
        );
    }

    #[test]
    fn test_unknown_action_is_none() {
        assert_eq!(CallbackToken::parse("teleport_moscow"), None);
        assert_eq!(CallbackToken::parse("garbage"), None);
        assert_eq!(CallbackToken::parse(""), None);
    }

    #[test]
    fn test_empty_id_is_none() {
        assert_eq!(CallbackToken::parse("city_"), None);
    }

    #[test]
    fn test_city_id_accessor() {
        assert_eq!(
            CallbackToken::parse("food_spb").unwrap().city_id(),
            Some("spb")
        );
        assert_eq!(CallbackToken::ShowCities.city_id(), None);
    }
}
