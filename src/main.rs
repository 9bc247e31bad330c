use anyhow::Result;
use clap::{Parser, Subcommand};
use sajadwa::cli::SubmitArgs;

/// sajadwa - SA Jadwa consulting site
#[derive(Parser)]
#[command(name = "sajadwa")]
#[command(about = "Bilingual consulting site and service-request relay", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a service request to a running server
    Submit(SubmitArgs),
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = sajadwa::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    sajadwa::observability::init_observability(
        "sajadwa",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => sajadwa::cli::serve(config, host, port).await,
        Commands::Submit(args) => sajadwa::cli::submit(config, args).await,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            Ok(())
        }
    }
}
