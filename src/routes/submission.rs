use axum::{Json, body::Bytes, extract::State, response::IntoResponse};

use crate::{language::UserLanguage, routes::AppState};

/// POST /submission
///
/// JSON body in, `{status, message}` out; 200, 400 or 500.
pub async fn action(
    UserLanguage(language): UserLanguage,
    State(app_state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let reply = app_state.handler.handle(language, &body).await;

    (reply.status, Json(reply.body))
}
