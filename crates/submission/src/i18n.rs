//! Translation lookup shared by the handler and the client.

use crate::Language;

/// Pure `(language, key) -> text` lookup.
///
/// Implementations must not panic on unknown keys; returning the key itself
/// is the expected fallback.
pub trait Translate: Send + Sync {
    fn translate(&self, language: Language, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(Language, &str) -> String + Send + Sync,
{
    fn translate(&self, language: Language, key: &str) -> String {
        self(language, key)
    }
}

/// Locale tables bundled with this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Locales;

impl Translate for Locales {
    fn translate(&self, language: Language, key: &str) -> String {
        rust_i18n::t!(key, locale = language.code()).to_string()
    }
}
