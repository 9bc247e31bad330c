use axum::{
    extract::Path,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use sajadwa_submission::Language;
use time::Duration;

use crate::{language::LANG_COOKIE, template::Template};

/// GET /lang/{code}: remember the choice and go back to the landing page.
pub async fn switch(template: Template, jar: CookieJar, Path(code): Path<String>) -> impl IntoResponse {
    let Ok(language) = code.parse::<Language>() else {
        return template.not_found();
    };

    let cookie = Cookie::build((LANG_COOKIE, language.code()))
        .path("/")
        .max_age(Duration::days(365))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build();

    (jar.add(cookie), Redirect::to("/")).into_response()
}
