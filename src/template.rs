use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use sajadwa_submission::Language;
use std::{collections::HashMap, convert::Infallible};

use crate::{config::SiteConfig, language::UserLanguage};

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .map(String::as_str)
            .unwrap_or("en");

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }
}

/// Renders askama pages in the visitor's language.
pub struct Template {
    pub language: Language,
    pub site: SiteConfig,
}

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.language.code().to_owned()),
        );

        template.render_with_values(&values)
    }

    /// Page text outside of templates.
    pub fn t(&self, key: &str) -> String {
        rust_i18n::t!(key, locale = self.language.code()).to_string()
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_with_status(StatusCode::OK, template)
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        match self.render_with_values(template) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render template",
                )
                    .into_response()
            }
        }
    }

    pub fn not_found(&self) -> Response {
        self.render_with_status(
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                language: self.language,
                site: self.site.clone(),
            },
        )
    }
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let UserLanguage(language) = parts.extract_with_state::<UserLanguage, _>(state).await?;

        Ok(Template {
            language,
            site: state.config.site.clone(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub language: Language,
    pub site: SiteConfig,
}
