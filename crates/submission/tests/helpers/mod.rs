#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use sajadwa_submission::{
    Locales, MailConfig, Mailer, OutgoingMail, RequiredFieldPolicy, SubmissionHandler,
    SubmissionRequest, TransportError,
};

/// Records every dispatch; fails on demand.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

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
            return Err(TransportError::Other(
                "535 5.7.8 Username and Password not accepted".to_owned(),
            ));
        }

        Ok(())
    }
}

pub fn mail_config() -> MailConfig {
    MailConfig {
        username: "sender@example.com".to_owned(),
        password: "app-password".to_owned(),
        destination: "info@example.com".to_owned(),
        ..Default::default()
    }
}

pub fn handler(
    config: &MailConfig,
    policy: RequiredFieldPolicy,
    mailer: Arc<RecordingMailer>,
) -> SubmissionHandler {
    SubmissionHandler::new(config, policy, mailer, Arc::new(Locales))
}

pub fn valid_request() -> SubmissionRequest {
    SubmissionRequest {
        full_name: "Ali".to_owned(),
        email: "ali@example.com".to_owned(),
        phone: "0550000000".to_owned(),
        project_name: "Cafe".to_owned(),
        ..Default::default()
    }
}

pub fn body(request: &SubmissionRequest) -> Vec<u8> {
    serde_json::to_vec(request).unwrap()
}
