use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use sajadwa_submission::{
    DEFAULT_REQUIRED_FIELDS, Language, MailConfig, RequiredFieldPolicy, UnknownField,
};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteConfig {
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "default_phone")]
    pub phone: String,
    #[serde(default = "default_whatsapp")]
    pub whatsapp: String,
    #[serde(default = "default_contact_email")]
    pub email: String,
    #[serde(default = "default_social")]
    pub social: Vec<SocialLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            phone: default_phone(),
            whatsapp: default_whatsapp(),
            email: default_contact_email(),
            social: default_social(),
        }
    }
}

impl SiteConfig {
    /// Digits of the phone number, for `tel:` links.
    pub fn phone_dial(&self) -> String {
        digits(&self.phone)
    }

    /// Digits of the WhatsApp number, for `wa.me` links.
    pub fn whatsapp_dial(&self) -> String {
        digits(&self.whatsapp)
    }
}

fn digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

fn default_phone() -> String {
    "+966 55 5594051".to_string()
}

fn default_whatsapp() -> String {
    "+966 58 3936145".to_string()
}

fn default_contact_email() -> String {
    "info@SA-Jadwa.com".to_string()
}

fn default_social() -> Vec<SocialLink> {
    [
        ("Facebook", "https://www.facebook.com/SnAJadwa"),
        ("Instagram", "https://www.instagram.com/snajadwa/"),
        ("X", "https://x.com/SnAJadwa"),
        ("LinkedIn", "https://www.linkedin.com/company/13996382/"),
        ("TikTok", "https://www.tiktok.com/@snajadwa"),
    ]
    .into_iter()
    .map(|(name, url)| SocialLink {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SubmissionConfig {
    /// Field names as sent by the form (`fullName`, `phone`, ...).
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
        }
    }
}

impl SubmissionConfig {
    pub fn policy(&self) -> Result<RequiredFieldPolicy, UnknownField> {
        RequiredFieldPolicy::from_names(&self.required_fields)
    }
}

fn default_required_fields() -> Vec<String> {
    DEFAULT_REQUIRED_FIELDS
        .iter()
        .map(|field| field.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy mail variables (GMAIL_USER, GMAIL_APP_PASSWORD, COMPANY_RECEIVING_EMAIL)
    /// 2. Environment variables (SAJADWA__MAIL__USERNAME, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        Self::load_from(&config_file_path, env::vars().collect())
    }

    /// Same as [`Config::load`] with an explicit file and variable set.
    ///
    /// Values stay strings until deserialized, so secrets such as
    /// `SAJADWA__MAIL__PASSWORD=0123456` are kept verbatim.
    pub fn load_from(
        config_file_path: &str,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        // Config file is optional
        if std::path::Path::new(config_file_path).exists() {
            builder = builder.add_source(File::with_name(config_file_path));
        }

        // Legacy deployment variables
        let legacy = [
            ("GMAIL_USER", "mail.username"),
            ("GMAIL_APP_PASSWORD", "mail.password"),
            ("COMPANY_RECEIVING_EMAIL", "mail.destination"),
        ]
        .into_iter()
        .filter_map(|(var, key)| Some((key, vars.get(var)?.clone())))
        .collect::<Vec<_>>();

        builder = builder.add_source(
            Environment::with_prefix("SAJADWA")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("submission.required_fields")
                .source(Some(vars)),
        );

        for (key, value) in legacy {
            builder = builder.set_override(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing mail credentials are not an error here: the site still serves
    /// pages and the submission handler refuses requests until they are set.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.mail.timeout_secs == 0 {
            return Err("Mail timeout must be at least 1 second".to_string());
        }
        self.submission.policy().map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Copy safe to print.
    pub fn redacted(&self) -> Self {
        Self {
            mail: self.mail.redacted(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sajadwa_submission::Field;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            site: SiteConfig::default(),
            mail: MailConfig::default(),
            submission: SubmissionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_required_field() {
        let mut config = config();
        config.submission.required_fields = vec!["fullName".to_string(), "name".to_string()];
        assert_eq!(
            config.validate(),
            Err("unknown form field `name`".to_string())
        );
    }

    #[test]
    fn test_empty_required_fields_is_allowed() {
        let mut config = config();
        config.submission.required_fields = vec![];
        assert_eq!(config.submission.policy(), Ok(RequiredFieldPolicy::none()));
    }

    #[test]
    fn test_default_policy() {
        let policy = config().submission.policy().unwrap();
        assert!(policy.contains(Field::FullName));
        assert!(policy.contains(Field::Phone));
        assert!(policy.contains(Field::ProjectName));
        assert!(!policy.contains(Field::Email));
    }

    #[test]
    fn test_redacted_hides_password() {
        let mut config = config();
        config.mail.password = "app-password".to_string();
        let printed = serde_json::to_string(&config.redacted()).unwrap();
        assert!(!printed.contains("app-password"));
    }

    #[test]
    fn test_dial_keeps_digits() {
        let site = SiteConfig::default();
        assert_eq!(site.whatsapp_dial(), "966583936145");
        assert_eq!(site.phone_dial(), "966555594051");
    }

    fn load_env(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::load_from("does-not-exist.toml", vars).unwrap()
    }

    #[test]
    fn test_env_secrets_are_kept_verbatim() {
        let config = load_env(&[
            ("SAJADWA__MAIL__PASSWORD", "0123456"),
            ("SAJADWA__MAIL__USERNAME", "00123"),
            ("SAJADWA__MAIL__SMTP_PORT", "587"),
            ("SAJADWA__MAIL__TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.mail.password, "0123456");
        assert_eq!(config.mail.username, "00123");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.timeout_secs, 5);
    }

    #[test]
    fn test_env_empty_required_fields_disables_policy() {
        let config = load_env(&[("SAJADWA__SUBMISSION__REQUIRED_FIELDS", "")]);
        assert!(config.validate().is_ok());
        assert_eq!(config.submission.policy(), Ok(RequiredFieldPolicy::none()));
    }

    #[test]
    fn test_env_required_fields_list() {
        let config = load_env(&[("SAJADWA__SUBMISSION__REQUIRED_FIELDS", "email,phone")]);
        let policy = config.submission.policy().unwrap();
        assert!(policy.contains(Field::Email));
        assert!(policy.contains(Field::Phone));
        assert!(!policy.contains(Field::FullName));
    }

    #[test]
    fn test_legacy_variables_override_prefixed_ones() {
        let config = load_env(&[
            ("SAJADWA__MAIL__PASSWORD", "from-prefixed"),
            ("GMAIL_APP_PASSWORD", "0987"),
            ("COMPANY_RECEIVING_EMAIL", "info@example.com"),
        ]);
        assert_eq!(config.mail.password, "0987");
        assert_eq!(config.mail.destination, "info@example.com");
    }
}
