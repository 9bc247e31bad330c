use std::sync::Arc;

use http::StatusCode;

use crate::{
    ConfigurationError, Field, Language, MailConfig, MailRoute, Mailer, OutgoingMail,
    RequiredFieldPolicy, SubmissionRequest, SubmissionResult, Translate, TransportError,
    template::{SubmissionEmail, Template, subject},
};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing required fields: {}", join_names(.0))]
    Validation(Vec<Field>),

    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("mail dispatch failed: {0}")]
    Transport(#[from] TransportError),
}

fn join_names(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Malformed(_) | SubmissionError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            SubmissionError::Configuration(_)
            | SubmissionError::Render(_)
            | SubmissionError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Status code and body for `POST /submission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: SubmissionResult,
}

/// Validates a submission and relays it to the firm by email.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct SubmissionHandler {
    route: Result<MailRoute, ConfigurationError>,
    mail_locale: Language,
    policy: RequiredFieldPolicy,
    mailer: Arc<dyn Mailer>,
    translate: Arc<dyn Translate>,
}

impl SubmissionHandler {
    /// Mail configuration is validated here, once; a bad configuration does
    /// not prevent construction but every submission is then refused.
    pub fn new(
        config: &MailConfig,
        policy: RequiredFieldPolicy,
        mailer: Arc<dyn Mailer>,
        translate: Arc<dyn Translate>,
    ) -> Self {
        let route = config.route();

        if let Err(e) = &route {
            tracing::error!(error = %e, "Mail configuration invalid, submissions will be refused");
        }

        Self {
            route,
            mail_locale: config.locale,
            policy,
            mailer,
            translate,
        }
    }

    pub fn policy(&self) -> &RequiredFieldPolicy {
        &self.policy
    }

    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        self.route.as_ref().err()
    }

    #[tracing::instrument(skip_all, fields(language = %language))]
    pub async fn handle(&self, language: Language, body: &[u8]) -> Reply {
        match self.process(body).await {
            Ok(()) => Reply {
                status: StatusCode::OK,
                body: SubmissionResult::success(
                    self.translate.translate(language, "submission.success"),
                ),
            },
            Err(err) => {
                match &err {
                    SubmissionError::Validation(_) | SubmissionError::Malformed(_) => {
                        tracing::info!(error = %err, "Submission rejected");
                    }
                    _ => tracing::error!(error = ?err, "Submission failed"),
                }

                Reply {
                    status: err.status_code(),
                    body: SubmissionResult::error(self.error_message(language, &err)),
                }
            }
        }
    }

    async fn process(&self, body: &[u8]) -> Result<(), SubmissionError> {
        let route = self.route.as_ref().map_err(Clone::clone)?;
        let request = SubmissionRequest::from_json(body)?;

        self.policy
            .check(&request)
            .map_err(SubmissionError::Validation)?;

        let email = SubmissionEmail::new(self.mail_locale, &request, self.translate.as_ref());
        let html = Template::new(self.mail_locale, self.translate.clone()).render(email)?;

        let mail = OutgoingMail {
            from: route.from.clone(),
            to: route.to.clone(),
            reply_to: request.email.clone(),
            subject: subject(self.mail_locale, &request, self.translate.as_ref()),
            html,
        };

        self.mailer.send(mail).await?;

        tracing::info!(
            project_name = %request.project_name,
            "Submission relayed"
        );

        Ok(())
    }

    /// Short user-facing sentence; never includes error internals.
    fn error_message(&self, language: Language, err: &SubmissionError) -> String {
        let t = |key: &str| self.translate.translate(language, key);

        match err {
            SubmissionError::Validation(fields) => {
                let labels = fields
                    .iter()
                    .map(|field| t(&field.label_key()))
                    .collect::<Vec<_>>()
                    .join(", ");

                format!("{} {labels}", t("submission.error.required"))
            }
            SubmissionError::Malformed(_) => t("submission.error.malformed"),
            SubmissionError::Configuration(_) => t("submission.error.configuration"),
            SubmissionError::Render(_) | SubmissionError::Transport(_) => {
                t("submission.error.transport")
            }
        }
    }
}
