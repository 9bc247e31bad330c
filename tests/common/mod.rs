#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sajadwa::config::{
    Config, ObservabilityConfig, ServerConfig, SiteConfig, SubmissionConfig,
};
use sajadwa_submission::{MailConfig, Mailer, OutgoingMail, TransportError};
use tower::ServiceExt;

/// Stands in for the SMTP transport.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<OutgoingMail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(mail);

        if self.fail {
            return Err(TransportError::Other("connection refused".to_owned()));
        }

        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        site: SiteConfig::default(),
        mail: MailConfig {
            username: "sender@example.com".to_string(),
            password: "app-password".to_string(),
            destination: "info@example.com".to_string(),
            ..Default::default()
        },
        submission: SubmissionConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(config: Config) -> TestApp {
    create_test_app_with_mailer(config, RecordingMailer::default())
}

pub fn create_test_app_with_mailer(config: Config, mailer: RecordingMailer) -> TestApp {
    let mailer = Arc::new(mailer);
    let router = sajadwa::create_app(config, mailer.clone()).unwrap();

    TestApp { router, mailer }
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
