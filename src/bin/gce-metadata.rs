//! CLI binary for the gce-metadata crate.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gce_metadata::{GceMetadata, MetadataClient, MetadataError, DEFAULT_BASE_URL};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gce-metadata")]
#[command(
    author,
    version,
    about = "Read facts about the current instance from the GCE metadata server"
)]
struct Cli {
    /// Metadata server base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an arbitrary URL with the metadata header
    Get {
        /// Absolute URL of the metadata endpoint
        url: String,
    },

    /// Print the instance name
    Instance,

    /// Print the project id
    Project,

    /// Print the zone
    Zone,

    /// Print the cluster name
    Cluster,

    /// Print the internal IPv4 address
    PrivateIpv4,

    /// Print the external IPv4 address
    PublicIpv4,

    /// Print every fact at once
    Facts {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that the metadata server is reachable
    Probe,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = MetadataClient::new(Duration::from_millis(cli.timeout_ms), &cli.base_url)
        .map_err(MetadataError::from)?;
    let metadata = GceMetadata::with_client(client);

    let value = match cli.command {
        Commands::Get { url } => metadata.get(&url).await?,
        Commands::Instance => metadata.instance().await?,
        Commands::Project => metadata.project().await?,
        Commands::Zone => metadata.zone().await?,
        Commands::Cluster => metadata.cluster().await?,
        Commands::PrivateIpv4 => metadata.private_ipv4().await?,
        Commands::PublicIpv4 => metadata.public_ipv4().await?,
        Commands::Facts { format } => {
            let facts = metadata.facts().await?;
            match format {
                OutputFormat::Text => facts.to_string(),
                OutputFormat::Json => serde_json::to_string_pretty(&facts)?,
            }
        }
        Commands::Probe => {
            metadata.probe().await?;
            "ok".to_string()
        }
    };

    println!("{}", value);
    Ok(())
}
