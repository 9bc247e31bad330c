mod config;
mod handler;
pub mod i18n;
mod language;
mod mailer;
mod policy;
mod request;
pub(crate) mod template;

pub use config::*;
pub use handler::*;
pub use i18n::{Locales, Translate};
pub use language::*;
pub use mailer::*;
pub use policy::*;
pub use request::*;
pub use template::subject;

rust_i18n::i18n!("locales", fallback = "en");
