//! Outbound mail transport.

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::{MailConfig, TlsMode};

/// A composed notification, ready for dispatch.
#[derive(Clone, Debug)]
pub struct OutgoingMail {
    pub from: Mailbox,
    pub to: Mailbox,
    /// Address typed by the requester, unvalidated and possibly empty.
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("smtp server did not answer within {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError>;
}

/// SMTP transport using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Bounds the whole dispatch, greeting and handshake included.
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, TransportError> {
        let builder = match config.tls {
            TlsMode::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            }
            TlsMode::Plain => {
                tracing::warn!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    "Using unencrypted SMTP connection (e.g., MailDev)"
                );
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            }
        };

        let timeout = Duration::from_secs(config.timeout_secs);
        let builder = builder.port(config.smtp_port).timeout(Some(timeout));

        let builder = if config.username.is_empty() || config.password.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            tls = %config.tls,
            "Mail transport initialized"
        );

        Ok(Self {
            transport: builder.build(),
            timeout,
        })
    }
}

/// Builds the lettre message, dropping the reply-to header when the
/// requester's address cannot be parsed.
pub fn build_message(mail: OutgoingMail) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(mail.from)
        .to(mail.to)
        .subject(mail.subject);

    match mail.reply_to.trim().parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => {
            tracing::warn!(
                reply_to = %mail.reply_to,
                error = %e,
                "Omitting reply-to header"
            );
        }
    }

    Ok(builder.header(ContentType::TEXT_HTML).body(mail.html)?)
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        let message = build_message(mail)?;
        let response = tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        tracing::info!(code = %response.code(), "Email sent");

        Ok(())
    }
}
