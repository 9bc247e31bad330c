use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use sajadwa_submission::{SubmissionRequest, SubmissionResult};
use url::Url;

/// The request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error("could not reach the server: {0}")]
pub struct NetworkError(#[from] pub reqwest::Error);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` when the body was not a submission result.
    pub body: Option<SubmissionResult>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &SubmissionRequest) -> Result<TransportResponse, NetworkError>;
}

/// Posts JSON to `<base_url>/submission`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `<base_url>/submission`, keeping any path prefix of the base.
fn endpoint(base_url: &Url) -> Url {
    let mut endpoint = base_url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);

    if let Ok(mut segments) = endpoint.path_segments_mut() {
        segments.pop_if_empty().push("submission");
    }

    endpoint
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &SubmissionRequest) -> Result<TransportResponse, NetworkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();

        // The server answered; an unreadable body only loses its message.
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<SubmissionResult>(&bytes).ok(),
            Err(e) => {
                tracing::warn!(status, error = %e, "Failed to read submission response body");
                None
            }
        };

        tracing::debug!(status, decoded = body.is_some(), "Submission response received");

        Ok(TransportResponse { status, body })
    }
}
