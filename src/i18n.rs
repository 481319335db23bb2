//! Internationalization support for Retouch University.
//!
//! This module owns the active-locale state and answers translation lookups
//! against per-locale dictionaries embedded at compile time. Lookup keys are
//! dotted paths (`"courseDetails.buyButton"`); a key that cannot be resolved
//! is echoed back unchanged so a missing translation shows up in the UI as
//! the raw key instead of an error.

use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, EnumString};

use crate::settings::SettingsError;

// Embed dictionary JSON files at compile time, one per supported locale
const EN_JSON: &str = include_str!("../i18n/en.json");
const RU_JSON: &str = include_str!("../i18n/ru.json");
const UA_JSON: &str = include_str!("../i18n/ua.json");

static EN_DICT: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(EN_JSON).expect("embedded en.json is valid JSON"));
static RU_DICT: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(RU_JSON).expect("embedded ru.json is valid JSON"));
static UA_DICT: LazyLock<Value> =
    LazyLock::new(|| serde_json::from_str(UA_JSON).expect("embedded ua.json is valid JSON"));

/// Supported UI locales
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
pub enum Locale {
    #[serde(rename = "ua")]
    #[strum(serialize = "ua")]
    Ukrainian,
    #[serde(rename = "ru")]
    #[strum(serialize = "ru")]
    Russian,
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
}

impl Locale {
    /// Get the short tag used in storage and course data
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Ukrainian => "ua",
            Locale::Russian => "ru",
            Locale::English => "en",
        }
    }

    /// Get the display name for the locale (in its native language),
    /// shown by the host shell's language selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Ukrainian => "Українська",
            Locale::Russian => "Русский",
            Locale::English => "English",
        }
    }

    /// Get all supported locales
    pub fn all() -> &'static [Locale] {
        &[Locale::Ukrainian, Locale::Russian, Locale::English]
    }

    /// Normalize a browser/system language tag (e.g. `"uk-UA"`, `"en-GB"`)
    /// to a supported locale. Any unrecognized prefix maps to English.
    pub fn from_language_tag(raw: &str) -> Locale {
        let lang = raw.trim().to_lowercase();

        if lang.starts_with("uk") {
            Locale::Ukrainian
        } else if lang.starts_with("ru") {
            Locale::Russian
        } else {
            Locale::English
        }
    }

    fn dictionary(&self) -> &'static Value {
        match self {
            Locale::Ukrainian => &UA_DICT,
            Locale::Russian => &RU_DICT,
            Locale::English => &EN_DICT,
        }
    }
}

/// Host-environment capability for locale detection and persistence.
///
/// The defaults model a non-interactive (pre-render/headless) context that
/// has no persisted preference and no language signal.
pub trait Environment {
    /// Previously persisted locale tag, if any
    fn persisted_locale(&self) -> Option<String> {
        None
    }

    /// Preferred language tags, most preferred first
    fn language_tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Persist the chosen locale tag
    fn persist_locale(&self, tag: &str) -> Result<(), SettingsError> {
        let _ = tag;
        Ok(())
    }
}

/// No-op environment for pre-render and test contexts
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Environment for Headless {}

/// Active-locale context threaded through every component that renders text.
///
/// Constructed once at startup via [`I18n::init`]; the only mutator is
/// [`I18n::set_locale`].
#[derive(Clone, Debug)]
pub struct I18n {
    locale: Locale,
}

impl I18n {
    /// Initialize the locale from the environment.
    ///
    /// Resolution order: persisted preference, then the first browser/system
    /// language tag, then `default_locale`. An environment with no signals
    /// at all yields `default_locale`; detection never fails loudly.
    ///
    /// The no-signal fallback deliberately honors `default_locale` instead of
    /// hard-coding English; the two coincide for this site because its
    /// default locale is English.
    pub fn init(default_locale: Locale, env: &dyn Environment) -> Self {
        Self {
            locale: detect_locale(default_locale, env),
        }
    }

    /// The currently active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a dotted key against the active locale's dictionary.
    ///
    /// Returns the key itself when any path segment is missing or the
    /// terminal value is not a string.
    pub fn t(&self, key: &str) -> String {
        translate(self.locale, key)
    }

    /// Switch the active locale and persist it immediately.
    ///
    /// Persist failures are logged, never surfaced: locale choice is a UI
    /// preference and must not error out of an event handler.
    pub fn set_locale(&mut self, next: Locale, env: &dyn Environment) {
        self.locale = next;

        if let Err(e) = env.persist_locale(next.tag()) {
            tracing::warn!("Failed to persist locale '{}': {}", next.tag(), e);
        }
    }
}

/// Resolve a dotted key against one locale's dictionary.
///
/// Pure function of (locale, key); the echo-the-key miss behavior is the
/// designed signal for a missing translation.
pub fn translate(locale: Locale, key: &str) -> String {
    match lookup(locale.dictionary(), key) {
        Some(text) => text.to_string(),
        None => {
            tracing::debug!("Missing '{}' translation for key '{}'", locale.tag(), key);
            key.to_string()
        }
    }
}

/// Descend the nested dictionary one dotted segment at a time
fn lookup<'a>(dict: &'a Value, key: &str) -> Option<&'a str> {
    let mut current = dict;

    for segment in key.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }

    current.as_str()
}

fn detect_locale(default_locale: Locale, env: &dyn Environment) -> Locale {
    // 1) A persisted preference wins if it parses to a supported locale;
    //    a corrupted tag is silently ignored
    if let Some(saved) = env.persisted_locale() {
        if let Ok(locale) = Locale::from_str(saved.trim()) {
            return locale;
        }
        tracing::debug!("Ignoring unsupported persisted locale '{}'", saved);
    }

    // 2) First browser/system language tag, normalized by prefix
    let tags = env.language_tags();
    match tags.first() {
        Some(tag) => Locale::from_language_tag(tag),
        // No signal at all (headless/pre-render context)
        None => default_locale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeEnv {
        saved: Option<String>,
        languages: Vec<String>,
        persisted: RefCell<Vec<String>>,
    }

    impl FakeEnv {
        fn new(saved: Option<&str>, languages: &[&str]) -> Self {
            Self {
                saved: saved.map(str::to_string),
                languages: languages.iter().map(|s| s.to_string()).collect(),
                persisted: RefCell::new(Vec::new()),
            }
        }
    }

    impl Environment for FakeEnv {
        fn persisted_locale(&self) -> Option<String> {
            self.saved.clone()
        }

        fn language_tags(&self) -> Vec<String> {
            self.languages.clone()
        }

        fn persist_locale(&self, tag: &str) -> Result<(), SettingsError> {
            self.persisted.borrow_mut().push(tag.to_string());
            Ok(())
        }
    }

    // ============================================
    // Locale Tests
    // ============================================

    #[test]
    fn test_locale_tags() {
        assert_eq!(Locale::Ukrainian.tag(), "ua");
        assert_eq!(Locale::Russian.tag(), "ru");
        assert_eq!(Locale::English.tag(), "en");
    }

    #[test]
    fn test_locale_from_str_round_trip() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_str(locale.tag()), Ok(*locale));
        }
    }

    #[test]
    fn test_locale_from_str_rejects_unknown() {
        assert!(Locale::from_str("de").is_err());
        assert!(Locale::from_str("").is_err());
        assert!(Locale::from_str("english").is_err());
    }

    #[test]
    fn test_locale_default_is_english() {
        assert_eq!(Locale::default(), Locale::English);
    }

    #[test]
    fn test_from_language_tag_prefixes() {
        assert_eq!(Locale::from_language_tag("uk"), Locale::Ukrainian);
        assert_eq!(Locale::from_language_tag("uk-UA"), Locale::Ukrainian);
        assert_eq!(Locale::from_language_tag("ru-RU"), Locale::Russian);
        assert_eq!(Locale::from_language_tag("en-GB"), Locale::English);
    }

    #[test]
    fn test_from_language_tag_unknown_falls_back_to_english() {
        assert_eq!(Locale::from_language_tag("de-DE"), Locale::English);
        assert_eq!(Locale::from_language_tag("fr"), Locale::English);
        assert_eq!(Locale::from_language_tag(""), Locale::English);
    }

    // ============================================
    // Translation Tests
    // ============================================

    #[test]
    fn test_translate_present_key_every_locale() {
        assert_eq!(translate(Locale::English, "header.courses"), "Courses");
        assert_eq!(translate(Locale::Russian, "header.courses"), "Курсы");
        assert_eq!(translate(Locale::Ukrainian, "header.courses"), "Курси");
    }

    #[test]
    fn test_translate_deep_key() {
        assert_eq!(
            translate(Locale::English, "coursesPage.filters.retouchArchitecture"),
            "Retouch architecture"
        );
    }

    #[test]
    fn test_translate_missing_key_echoes_key() {
        let key = "courseDetails.nope";
        assert_eq!(translate(Locale::English, key), key);
    }

    #[test]
    fn test_translate_missing_at_any_depth_echoes_key() {
        assert_eq!(translate(Locale::English, "nope"), "nope");
        assert_eq!(translate(Locale::English, "nope.deeper"), "nope.deeper");
        assert_eq!(
            translate(Locale::English, "header.courses.deeper"),
            "header.courses.deeper"
        );
    }

    #[test]
    fn test_translate_non_string_terminal_echoes_key() {
        // "header" resolves to an object, not a string
        assert_eq!(translate(Locale::English, "header"), "header");
        assert_eq!(
            translate(Locale::Ukrainian, "courseDetails.features"),
            "courseDetails.features"
        );
    }

    // ============================================
    // Detection Tests
    // ============================================

    #[test]
    fn test_init_headless_returns_default() {
        let i18n = I18n::init(Locale::Ukrainian, &Headless);
        assert_eq!(i18n.locale(), Locale::Ukrainian);
    }

    #[test]
    fn test_init_prefers_persisted_locale() {
        let env = FakeEnv::new(Some("ru"), &["en-US"]);
        let i18n = I18n::init(Locale::English, &env);
        assert_eq!(i18n.locale(), Locale::Russian);
    }

    #[test]
    fn test_init_ignores_corrupted_persisted_locale() {
        let env = FakeEnv::new(Some("klingon"), &["uk-UA", "en-US"]);
        let i18n = I18n::init(Locale::English, &env);
        assert_eq!(i18n.locale(), Locale::Ukrainian);
    }

    #[test]
    fn test_init_uses_first_language_tag() {
        let env = FakeEnv::new(None, &["ru-RU", "uk-UA"]);
        let i18n = I18n::init(Locale::English, &env);
        assert_eq!(i18n.locale(), Locale::Russian);
    }

    #[test]
    fn test_init_unknown_language_tag_falls_back_to_english() {
        let env = FakeEnv::new(None, &["ja-JP"]);
        let i18n = I18n::init(Locale::Ukrainian, &env);
        assert_eq!(i18n.locale(), Locale::English);
    }

    #[test]
    fn test_init_no_signals_returns_default() {
        let env = FakeEnv::new(None, &[]);
        let i18n = I18n::init(Locale::Russian, &env);
        assert_eq!(i18n.locale(), Locale::Russian);
    }

    // ============================================
    // set_locale Tests
    // ============================================

    #[test]
    fn test_set_locale_updates_and_persists() {
        let env = FakeEnv::new(None, &[]);
        let mut i18n = I18n::init(Locale::English, &env);

        i18n.set_locale(Locale::Ukrainian, &env);

        assert_eq!(i18n.locale(), Locale::Ukrainian);
        assert_eq!(*env.persisted.borrow(), vec!["ua".to_string()]);
    }

    #[test]
    fn test_set_locale_only_persists_valid_tags() {
        // The closed enum makes every persisted tag a supported one
        let env = FakeEnv::new(None, &[]);
        let mut i18n = I18n::init(Locale::English, &env);

        for locale in Locale::all() {
            i18n.set_locale(*locale, &env);
        }

        for tag in env.persisted.borrow().iter() {
            assert!(Locale::from_str(tag).is_ok());
        }
    }

    #[test]
    fn test_context_translation_follows_active_locale() {
        let env = FakeEnv::new(None, &[]);
        let mut i18n = I18n::init(Locale::English, &env);
        assert_eq!(i18n.t("courseDetails.buyButton"), "Buy course");

        i18n.set_locale(Locale::Ukrainian, &env);
        assert_eq!(i18n.t("courseDetails.buyButton"), "Купити курс");
    }
}
