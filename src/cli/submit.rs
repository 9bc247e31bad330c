use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Args;
use sajadwa_client::{HttpTransport, Status, SubmissionClient};
use sajadwa_submission::{Field, Language, Locales};
use url::Url;

/// Send one service request to a running server, as the web form would.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub url: Url,

    /// Language of the status messages
    #[arg(long, default_value = "ar")]
    pub lang: Language,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub project_name: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub capital: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl SubmitArgs {
    fn values(&self) -> [(Field, &Option<String>); 8] {
        [
            (Field::FullName, &self.full_name),
            (Field::Email, &self.email),
            (Field::Company, &self.company),
            (Field::Phone, &self.phone),
            (Field::ProjectName, &self.project_name),
            (Field::Location, &self.location),
            (Field::Capital, &self.capital),
            (Field::Description, &self.description),
        ]
    }
}

pub async fn submit(config: crate::config::Config, args: SubmitArgs) -> Result<()> {
    let policy = config
        .submission
        .policy()
        .context("Invalid submission.required_fields")?;

    let transport = HttpTransport::new(&args.url, Duration::from_secs(args.timeout))?;
    tracing::info!(endpoint = %transport.endpoint(), "Submitting service request");

    let mut client = SubmissionClient::new(transport, policy, args.lang, Arc::new(Locales));

    for (field, value) in args.values() {
        if let Some(value) = value {
            client.update_field(field, value.as_str());
        }
    }

    match client.submit().await {
        Status::Succeeded(message) => {
            println!("{message}");
            Ok(())
        }
        Status::Failed(message) => bail!("{message}"),
        status => bail!("Unexpected submission status: {status:?}"),
    }
}
