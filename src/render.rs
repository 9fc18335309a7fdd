//! Screen renderer: pure functions from a screen and catalog data to message
//! text and button layout.
//!
//! Styled screens use Telegram MarkdownV2, which reserves
//! ``* _ ~ | ` [ ] ( ) . ! # + - = { } >`` and the backslash. Everything
//! user- or catalog-derived that ends up in a MarkdownV2 message goes through
//! `teloxide::utils::markdown::escape`; locale chrome used on those screens
//! stays free of reserved characters by convention (see the `.ftl` headers).

use teloxide::utils::markdown;

use crate::catalog::{Catalog, CatalogEntry};
use crate::localization::{t_args_lang, t_lang};
use crate::outbound::{InlineButton, Keyboard, ReplyButton, ReplyRequest, TextStyle};
use crate::screen::Screen;
use crate::token::CallbackToken;

/// External link offered on the city-list screen.
const CITY_INFO_URL: &str = "https://ru.wikipedia.org/wiki/Города_России";

/// Stand-in photo served for every city.
const PHOTO_PLACEHOLDER_URL: &str = "https://via.placeholder.com/400x300";

/// Rendering failure. The only failure mode is a button token referencing a
/// city that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    UnknownCity(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::UnknownCity(id) => write!(f, "Unknown city id: {id}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Renderer output: either a message body or a photo request.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Message {
        text: String,
        style: TextStyle,
        keyboard: Option<Keyboard>,
    },
    Photo {
        url: String,
        caption: String,
    },
}

/// Render a screen against the catalog. Fully determined by its inputs; no
/// side effects.
pub fn render(screen: &Screen, catalog: &Catalog, lang: Option<&str>) -> Result<Rendered, RenderError> {
    match screen {
        Screen::MainMenu => Ok(Rendered::Message {
            text: t_lang("greeting", lang),
            style: TextStyle::Plain,
            keyboard: Some(main_menu_keyboard(lang)),
        }),
        Screen::CityList => Ok(Rendered::Message {
            text: t_lang("city-list-title", lang),
            style: TextStyle::Plain,
            keyboard: Some(city_list_keyboard(catalog, lang)),
        }),
        Screen::CityDetail(id) => {
            let entry = lookup(catalog, id)?;
            let text = format!(
                "🏰 *{}*\n\n{}\n\n{}",
                markdown::escape(&entry.name),
                markdown::escape(&entry.description),
                t_lang("city-detail-prompt", lang)
            );
            Ok(Rendered::Message {
                text,
                style: TextStyle::MarkdownV2,
                keyboard: Some(city_sections_keyboard(id, lang)),
            })
        }
        Screen::Attractions(id) => {
            let entry = lookup(catalog, id)?;
            Ok(section_message(
                "attractions-title",
                entry,
                &entry.attractions,
                id,
                lang,
            ))
        }
        Screen::Food(id) => {
            let entry = lookup(catalog, id)?;
            Ok(section_message("food-title", entry, &entry.food, id, lang))
        }
        Screen::Photo(id) => {
            let entry = lookup(catalog, id)?;
            Ok(Rendered::Photo {
                url: PHOTO_PLACEHOLDER_URL.to_string(),
                caption: t_args_lang("photo-caption", &[("city", &entry.name)], lang),
            })
        }
        Screen::ReviewPrompt(id) => {
            let entry = lookup(catalog, id)?;
            Ok(Rendered::Message {
                text: t_args_lang("review-prompt", &[("city", &entry.name)], lang),
                style: TextStyle::Plain,
                keyboard: Some(Keyboard::Inline(vec![vec![InlineButton::callback(
                    t_lang("btn-cancel", lang),
                    CallbackToken::CancelReview.encode(),
                )]])),
            })
        }
    }
}

fn lookup<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a CatalogEntry, RenderError> {
    catalog
        .lookup(id)
        .ok_or_else(|| RenderError::UnknownCity(id.to_string()))
}

/// Bulleted section body shared by the attractions and food screens. The
/// section keyboard repeats all city buttons, so switching sections stays a
/// one-click, in-place edit.
fn section_message(
    title_key: &str,
    entry: &CatalogEntry,
    items: &[String],
    id: &str,
    lang: Option<&str>,
) -> Rendered {
    let title = t_args_lang(title_key, &[("city", &markdown::escape(&entry.name))], lang);
    let list = items
        .iter()
        .map(|item| format!("• {}", markdown::escape(item)))
        .collect::<Vec<_>>()
        .join("\n");
    let text = format!("*{}*\n{}\n\n{}", title, list, t_lang("section-prompt", lang));

    Rendered::Message {
        text,
        style: TextStyle::MarkdownV2,
        keyboard: Some(city_sections_keyboard(id, lang)),
    }
}

/// The persistent 4-row reply keyboard behind the main menu.
pub fn main_menu_keyboard(lang: Option<&str>) -> Keyboard {
    Keyboard::Reply {
        rows: vec![
            vec![ReplyButton::text(t_lang("btn-choose-city", lang))],
            vec![
                ReplyButton::request(t_lang("btn-send-location", lang), ReplyRequest::Location),
                ReplyButton::request(t_lang("btn-send-contact", lang), ReplyRequest::Contact),
            ],
            vec![ReplyButton::request(
                t_lang("btn-create-poll", lang),
                ReplyRequest::Poll,
            )],
            vec![ReplyButton::text(t_lang("btn-about", lang))],
        ],
        placeholder: Some(t_lang("placeholder-main", lang)),
    }
}

/// One button row per city in catalog order, then the external link and the
/// share-this-bot row.
fn city_list_keyboard(catalog: &Catalog, lang: Option<&str>) -> Keyboard {
    let mut rows: Vec<Vec<InlineButton>> = catalog
        .all()
        .map(|entry| {
            vec![InlineButton::callback(
                entry.name.clone(),
                CallbackToken::City(entry.id.clone()).encode(),
            )]
        })
        .collect();

    rows.push(vec![InlineButton::url(
        t_lang("btn-city-link", lang),
        CITY_INFO_URL,
    )]);
    rows.push(vec![InlineButton::switch_inline(
        t_lang("btn-share-bot", lang),
        t_lang("share-query", lang),
    )]);

    Keyboard::Inline(rows)
}

/// Section buttons of one city: attractions, food, photo, review, then back
/// to the list. One button per row.
fn city_sections_keyboard(id: &str, lang: Option<&str>) -> Keyboard {
    let id = id.to_string();
    Keyboard::Inline(vec![
        vec![InlineButton::callback(
            t_lang("btn-attractions", lang),
            CallbackToken::Attractions(id.clone()).encode(),
        )],
        vec![InlineButton::callback(
            t_lang("btn-food", lang),
            CallbackToken::Food(id.clone()).encode(),
        )],
        vec![InlineButton::callback(
            t_lang("btn-photo", lang),
            CallbackToken::Photo(id.clone()).encode(),
        )],
        vec![InlineButton::callback(
            t_lang("btn-review", lang),
            CallbackToken::Review(id).encode(),
        )],
        vec![InlineButton::callback(
            t_lang("btn-back-to-cities", lang),
            CallbackToken::ShowCities.encode(),
        )],
    ])
}

/// Body of the `/format` cheat sheet, in MarkdownV2 with its own markers
/// escaped. Kept in code rather than the locale resources: the text is
/// markup-sensitive to the last byte.
pub fn format_examples_text() -> String {
    [
        r"*How to format text in Telegram:*",
        r"",
        r"1\. *Bold text*: `*text*`",
        r"2\. _Italic text_: `_text_`",
        r"3\. __Underlined text__: `__text__`",
        r"4\. ~Strikethrough~: `~text~`",
        r"5\. ||Spoiler||: `||text||`",
        r"6\. `Monospace text`: wrap the text in backticks",
        r"7\. [Link](https://telegram.org): `[link text](url)`",
        r"",
        r"You can *_combine_* different __*styles*__\.",
        r"",
        r"⚠️ Characters reserved by the markup must be escaped with \\ to appear literally: `_ * [ ] ( ) ~ > # + - = | { } . !` and the backtick\.",
    ]
    .join("\n")
}
