//! Message translation
//!
//! Built-in rules carry an English default message and a code. When a rule
//! fails, its message is resolved in this order:
//!
//! 1. a custom message set on the rule with `.error(..)`,
//! 2. the translation of the code in the requested language,
//! 3. the translation of the code in [`DEFAULT_LANGUAGE`],
//! 4. the rule's default message,
//! 5. the empty string.
//!
//! The process-wide table starts empty and only grows through
//! [`register_translation`] and [`register_language`]. Callers that prefer
//! explicit wiring can build their own [`Translations`] and resolve through it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::foundation::{TranslationError, Translator, ValidationError};

/// The language used when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

// ============================================================================
// TRANSLATION TABLE
// ============================================================================

/// Translations grouped by language, then by message key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    languages: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one translation.
    pub fn register(
        &mut self,
        lang: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.languages
            .entry(lang.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Merges a set of translations into a language.
    pub fn register_language<K, V>(
        &mut self,
        lang: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.languages.entry(lang.into()).or_default();
        for (key, text) in entries {
            table.insert(key.into(), text.into());
        }
    }

    /// Whether any translation exists for `lang`.
    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Looks up a non-empty translation.
    #[must_use]
    pub fn get(&self, lang: &str, key: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Resolves a message following the documented fallback order.
    #[must_use]
    pub fn resolve(&self, lang: &str, key: &str, fallback: &str, custom: Option<&str>) -> String {
        if let Some(custom) = custom.filter(|c| !c.is_empty()) {
            return custom.to_owned();
        }
        self.get(lang, key)
            .or_else(|| self.get(DEFAULT_LANGUAGE, key))
            .unwrap_or(fallback)
            .to_owned()
    }
}

// ============================================================================
// PROCESS-WIDE STATE
// ============================================================================

static TRANSLATIONS: LazyLock<RwLock<Translations>> =
    LazyLock::new(|| RwLock::new(Translations::new()));

static LANGUAGE: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(DEFAULT_LANGUAGE.to_owned()));

/// Sets the language rule messages resolve in.
pub fn set_language(lang: impl Into<String>) {
    let lang = lang.into();
    tracing::trace!(%lang, "validation language changed");
    *LANGUAGE.write() = lang;
}

/// The language rule messages currently resolve in.
#[must_use]
pub fn language() -> String {
    LANGUAGE.read().clone()
}

/// Adds or replaces one translation in the process-wide table.
pub fn register_translation(
    lang: impl Into<String>,
    key: impl Into<String>,
    text: impl Into<String>,
) {
    let (lang, key) = (lang.into(), key.into());
    tracing::trace!(%lang, %key, "translation registered");
    TRANSLATIONS.write().register(lang, key, text);
}

/// Merges a set of translations into the process-wide table.
pub fn register_language<K, V>(lang: impl Into<String>, entries: impl IntoIterator<Item = (K, V)>)
where
    K: Into<String>,
    V: Into<String>,
{
    let lang = lang.into();
    tracing::trace!(%lang, "translations registered");
    TRANSLATIONS.write().register_language(lang, entries);
}

/// A snapshot of the process-wide table.
#[must_use]
pub fn translations() -> Translations {
    TRANSLATIONS.read().clone()
}

/// Resolves a message in `lang` against the process-wide table.
#[must_use]
pub fn resolve_message(lang: &str, key: &str, fallback: &str, custom: Option<&str>) -> String {
    TRANSLATIONS.read().resolve(lang, key, fallback, custom)
}

/// Resolves a message in the current language.
#[must_use]
pub fn message(key: &str, fallback: &str, custom: Option<&str>) -> String {
    let lang = language();
    resolve_message(&lang, key, fallback, custom)
}

// ============================================================================
// TRANSLATOR
// ============================================================================

/// Translates errors through the process-wide table, using each error's code
/// as the message key.
///
/// Translating into a language with no registered entries fails, except for
/// [`DEFAULT_LANGUAGE`] whose messages fall back to the rule defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTranslator {
    lang: Cow<'static, str>,
}

impl LanguageTranslator {
    /// Creates a translator into `lang`.
    pub fn new(lang: impl Into<Cow<'static, str>>) -> Self {
        Self { lang: lang.into() }
    }

    /// The target language.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn translate(&self, error: &ValidationError) -> Result<String, TranslationError> {
        let table = TRANSLATIONS.read();
        if self.lang != DEFAULT_LANGUAGE && !table.has_language(&self.lang) {
            return Err(TranslationError::new(format!(
                "language {:?} is not registered",
                self.lang
            )));
        }
        let text = table.resolve(&self.lang, error.code(), error.message(), None);
        Ok(error.clone().with_message(text).render())
    }
}

impl Translator for LanguageTranslator {
    fn translate_field(
        &self,
        _field: &str,
        error: &ValidationError,
    ) -> Result<String, TranslationError> {
        self.translate(error)
    }

    fn translate_single(&self, error: &ValidationError) -> Result<String, TranslationError> {
        self.translate(error)
    }
}
