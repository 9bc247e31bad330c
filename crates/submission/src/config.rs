use std::fmt;

use lettre::{Address, message::Mailbox};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::Language;

#[derive(
    EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Implicit TLS, usually port 465.
    #[default]
    Wrapper,
    /// STARTTLS upgrade, usually port 587.
    Starttls,
    /// Unencrypted connection, only for a local catcher such as MailDev.
    Plain,
}

/// Outbound mail settings.
///
/// `username`, `password` and `destination` are secrets provided by the
/// environment; they are checked by [`MailConfig::route`].
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub tls: TlsMode,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default)]
    pub locale: Language,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            tls: TlsMode::default(),
            username: String::new(),
            password: String::new(),
            destination: String::new(),
            from_name: default_from_name(),
            locale: Language::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("tls", &self.tls)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("destination", &self.destination)
            .field("from_name", &self.from_name)
            .field("locale", &self.locale)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_from_name() -> String {
    "SA Jadwa Contact".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "********" }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing mail configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid mail address in `{key}`: {reason}")]
    InvalidAddress { key: &'static str, reason: String },
}

/// Validated sender and recipient.
#[derive(Clone, Debug)]
pub struct MailRoute {
    pub from: Mailbox,
    pub to: Mailbox,
}

impl MailConfig {
    /// Same settings with the credential masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            password: redact(&self.password).to_owned(),
            ..self.clone()
        }
    }

    pub fn route(&self) -> Result<MailRoute, ConfigurationError> {
        let missing = [
            ("mail.username", &self.username),
            ("mail.password", &self.password),
            ("mail.destination", &self.destination),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ConfigurationError::Missing(missing));
        }

        let sender = self
            .username
            .trim()
            .parse::<Address>()
            .map_err(|e| ConfigurationError::InvalidAddress {
                key: "mail.username",
                reason: e.to_string(),
            })?;
        let name = Some(self.from_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        let from = Mailbox::new(name, sender);

        let to = self
            .destination
            .trim()
            .parse::<Mailbox>()
            .map_err(|e| ConfigurationError::InvalidAddress {
                key: "mail.destination",
                reason: e.to_string(),
            })?;

        Ok(MailRoute { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> MailConfig {
        MailConfig {
            username: "sender@example.com".to_string(),
            password: "app-password".to_string(),
            destination: "info@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_route_complete_config() {
        let route = complete().route().expect("complete config should validate");
        assert_eq!(route.to.email.to_string(), "info@example.com");
        assert_eq!(route.from.email.to_string(), "sender@example.com");
        assert_eq!(route.from.name.as_deref(), Some("SA Jadwa Contact"));
    }

    #[test]
    fn test_route_sender_name_with_punctuation() {
        let config = MailConfig {
            from_name: r#"SA Jadwa, "Contact" Desk"#.to_string(),
            ..complete()
        };
        let route = config.route().expect("display name should not affect parsing");
        assert_eq!(route.from.name.as_deref(), Some(r#"SA Jadwa, "Contact" Desk"#));
        assert_eq!(route.from.email.to_string(), "sender@example.com");
    }

    #[test]
    fn test_route_lists_every_missing_key() {
        let err = MailConfig::default().route().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Missing(vec!["mail.username", "mail.password", "mail.destination"])
        );
    }

    #[test]
    fn test_route_missing_destination() {
        let config = MailConfig {
            destination: "  ".to_string(),
            ..complete()
        };
        assert_eq!(
            config.route().unwrap_err(),
            ConfigurationError::Missing(vec!["mail.destination"])
        );
    }

    #[test]
    fn test_route_invalid_destination() {
        let config = MailConfig {
            destination: "not an address".to_string(),
            ..complete()
        };
        assert!(matches!(
            config.route(),
            Err(ConfigurationError::InvalidAddress {
                key: "mail.destination",
                ..
            })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", complete());
        assert!(!debug.contains("app-password"));
        assert_eq!(complete().redacted().password, "********");
    }
}
