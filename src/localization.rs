//! Fluent-backed localization for the bot's UI chrome.
//!
//! Bundles for each supported language are loaded once at startup from
//! `./locales/<lang>/main.ftl`. Catalog content (city names, descriptions,
//! lists) is data, not chrome, and is not localized. Unsupported language
//! codes fall back to English.

use anyhow::{anyhow, Context, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;
use unic_langid::LanguageIdentifier;

/// Languages with a bundle on disk, fallback first.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ru"];

const FALLBACK_LANGUAGE: &str = "en";

/// Localization manager holding one Fluent bundle per supported language.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Load all supported bundles. A missing or malformed resource file is a
    /// startup error, surfaced before the event loop begins.
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for lang in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = lang
                .parse()
                .with_context(|| format!("Invalid locale identifier: {lang}"))?;
            bundles.insert(lang.to_string(), Self::create_bundle(&locale)?);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale.
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Keep output free of Unicode isolation marks around placeables;
        // predicates compare rendered labels byte-for-byte.
        bundle.set_use_isolation(false);

        let resource_path = format!("./locales/{locale}/main.ftl");
        let content = fs::read_to_string(&resource_path)
            .with_context(|| format!("Failed to read locale resource {resource_path}"))?;
        let resource = FluentResource::try_new(content)
            .map_err(|(_, errors)| anyhow!("Failed to parse {resource_path}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Conflicting messages in {resource_path}: {errors:?}"))?;

        Ok(bundle)
    }

    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.bundles.contains_key(lang)
    }

    /// Resolve a message in the given language, falling back to English for
    /// keys missing from that bundle.
    pub fn get_message_in_language(
        &self,
        key: &str,
        lang: &str,
        args: Option<&FluentArgs>,
    ) -> String {
        let lang = if self.bundles.contains_key(lang) {
            lang
        } else {
            FALLBACK_LANGUAGE
        };

        if let Some(value) = self.format(key, lang, args) {
            return value;
        }
        if lang != FALLBACK_LANGUAGE {
            if let Some(value) = self.format(key, FALLBACK_LANGUAGE, args) {
                return value;
            }
        }

        format!("Missing translation: {key}")
    }

    fn format(&self, key: &str, lang: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(lang)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;
        let mut errors = Vec::new();
        Some(
            bundle
                .format_pattern(pattern, args, &mut errors)
                .into_owned(),
        )
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager. Safe to call more than once;
/// later calls are no-ops.
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_some() {
        return Ok(());
    }
    let manager = LocalizationManager::new()?;
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager.
///
/// Panics if `init_localization` has not run; initialization happens in
/// `main` before any event is processed.
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER
        .get()
        .expect("Localization manager not initialized")
}

/// Map a Telegram `language_code` to a supported language, defaulting to
/// English. Regional variants (`ru-RU`) resolve to their primary subtag.
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let Some(code) = language_code else {
        return FALLBACK_LANGUAGE;
    };
    let primary = code
        .split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase();

    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| **lang == primary)
        .copied()
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Localized message for a user's language code.
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Localized message with arguments for a user's language code.
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, FluentValue::from(*value));
    }
    get_localization_manager().get_message_in_language(
        key,
        detect_language(language_code),
        Some(&fluent_args),
    )
}
