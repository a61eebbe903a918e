mod interactive;
mod query;

use clap::{Parser, Subcommand};
use deso_arcgis::ArcgisClient;
use deso_core::Environment;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "deso-cli")]
#[command(about = "Resolve Swedish addresses to DeSO statistical areas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List ranked address suggestions for partial input
    Suggest {
        /// Partial address text
        text: String,
    },
    /// Geocode an address to WGS84 coordinates
    Geocode {
        /// Free-text address
        address: String,
        /// Disambiguation key from a previous `suggest`
        #[arg(long)]
        magic_key: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Geocode an address and resolve the DeSO area containing it
    Lookup {
        /// Free-text address
        address: String,
        /// Disambiguation key from a previous `suggest`
        #[arg(long)]
        magic_key: Option<String>,
        /// Print JSON instead of the result card
        #[arg(long)]
        json: bool,
    },
    /// Line-driven lookup session reading commands from stdin
    Interactive,
}

/// Decoration applied to stderr log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogStyle {
    ansi: bool,
    target: bool,
}

fn log_style(env: &Environment) -> LogStyle {
    let decorated = !env.is_production();
    LogStyle {
        ansi: decorated,
        target: decorated,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = deso_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let style = log_style(&config.env);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(style.ansi)
        .with_target(style.target)
        .init();

    let cli = Cli::parse();
    let client = ArcgisClient::from_app_config(&config)?;
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Suggest { text } => {
            query::run_suggest(&client, &text).await;
            Ok(())
        }
        Commands::Geocode {
            address,
            magic_key,
            json,
        } => query::run_geocode(&client, &address, magic_key.as_deref(), json).await,
        Commands::Lookup {
            address,
            magic_key,
            json,
        } => query::run_lookup(&client, &address, magic_key.as_deref(), json).await,
        Commands::Interactive => interactive::run_interactive(&config, client).await,
    }
}
