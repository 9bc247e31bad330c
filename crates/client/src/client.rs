use std::sync::Arc;

use sajadwa_submission::{Field, Language, RequiredFieldPolicy, SubmissionRequest, Translate};

use crate::{Status, Transport};

/// Form state for one form instance.
///
/// `submit` borrows the client mutably, so a second submission cannot start
/// while one is in flight on the same instance. UIs that share the client
/// across tasks should disable their trigger while [`is_pending`] is true.
///
/// [`is_pending`]: SubmissionClient::is_pending
pub struct SubmissionClient<T: Transport> {
    transport: T,
    translate: Arc<dyn Translate>,
    language: Language,
    policy: RequiredFieldPolicy,
    draft: SubmissionRequest,
    status: Status,
}

impl<T: Transport> SubmissionClient<T> {
    pub fn new(
        transport: T,
        policy: RequiredFieldPolicy,
        language: Language,
        translate: Arc<dyn Translate>,
    ) -> Self {
        Self {
            transport,
            translate,
            language,
            policy,
            draft: SubmissionRequest::default(),
            status: Status::Idle,
        }
    }

    pub fn draft(&self) -> &SubmissionRequest {
        &self.draft
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Merges one field into the draft and clears the status message.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.status = Status::Idle;
    }

    /// Required fields that are still blank. Has no side effects.
    pub fn validate(&self) -> Result<(), Vec<Field>> {
        self.policy.check(&self.draft)
    }

    pub async fn submit(&mut self) -> &Status {
        if let Err(missing) = self.validate() {
            tracing::debug!(?missing, "Submission blocked by required fields");
            self.status = Status::Failed(self.t("submission.client.required"));
            return &self.status;
        }

        self.status = Status::Pending;
        let outcome = self.transport.post(&self.draft).await;

        self.status = match outcome {
            Ok(response) if response.is_success() => {
                self.draft = SubmissionRequest::default();
                Status::Succeeded(self.t("submission.client.success"))
            }
            Ok(response) => {
                let message = response
                    .body
                    .map(|body| body.message)
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| self.t("submission.client.failed"));

                tracing::warn!(status = response.status, "Submission refused by server");
                Status::Failed(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Submission did not reach the server");
                Status::Failed(self.t("submission.client.network"))
            }
        };

        &self.status
    }

    fn t(&self, key: &str) -> String {
        self.translate.translate(self.language, key)
    }
}
