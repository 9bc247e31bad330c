use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};
use axum_extra::extract::CookieJar;
use sajadwa_submission::Language;

use crate::routes::AppState;

pub const LANG_COOKIE: &str = "lang";

/// Language of the visitor: the `lang` cookie set by the toggle, then
/// `Accept-Language`, then the site default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserLanguage(pub Language);

impl FromRequestParts<AppState> for UserLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        if let Some(language) = jar
            .get(LANG_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
        {
            return Ok(Self(language));
        }

        let language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(preferred_language)
            .unwrap_or(state.config.site.default_language);

        Ok(Self(language))
    }
}

/// Highest weighted supported language of an `Accept-Language` header.
pub fn preferred_language(header: &str) -> Option<Language> {
    let mut candidates = header
        .split(',')
        .enumerate()
        .filter_map(|(position, entry)| {
            let mut parts = entry.split(';');
            let language = parts.next()?.parse::<Language>().ok()?;
            let quality = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            (quality > 0.0).then_some((language, quality, position))
        })
        .collect::<Vec<_>>();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));
    candidates.first().map(|(language, _, _)| *language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_language_first_supported() {
        assert_eq!(preferred_language("fr-FR, en-US;q=0.8"), Some(Language::En));
        assert_eq!(preferred_language("ar-SA,ar;q=0.9,en;q=0.8"), Some(Language::Ar));
    }

    #[test]
    fn test_preferred_language_respects_quality() {
        assert_eq!(preferred_language("en;q=0.5, ar;q=0.9"), Some(Language::Ar));
        assert_eq!(preferred_language("ar;q=0, en;q=0.1"), Some(Language::En));
    }

    #[test]
    fn test_preferred_language_none_supported() {
        assert_eq!(preferred_language("fr, de;q=0.5"), None);
        assert_eq!(preferred_language(""), None);
        assert_eq!(preferred_language("*"), None);
    }
}
