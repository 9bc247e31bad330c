pub mod cli;
pub mod config;
pub mod language;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

use std::sync::Arc;

use sajadwa_submission::{Locales, Mailer, SubmissionHandler};

pub use config::Config;
pub use routes::AppState;

rust_i18n::i18n!("locales", fallback = "en");

/// Create the application router around the given mail transport.
///
/// The server passes the SMTP transport; tests pass a recording one.
pub fn create_app(config: Config, mailer: Arc<dyn Mailer>) -> anyhow::Result<axum::Router> {
    let policy = config.submission.policy()?;

    let handler = SubmissionHandler::new(&config.mail, policy, mailer, Arc::new(Locales));

    let state = AppState {
        config,
        handler: Arc::new(handler),
    };

    Ok(routes::router(state))
}
