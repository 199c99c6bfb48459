mod origin;
mod output;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "chargenear")]
#[command(about = "Find EV chargers near an address or coordinate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for chargers around an origin and apply filters
    Search(SearchArgs),
    /// Show address autocomplete suggestions
    Suggest {
        /// Partial address (at least 3 characters)
        query: String,
    },
    /// Resolve an address to coordinates
    Geocode {
        /// Free-text address
        address: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = chargenear_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await,
        Commands::Suggest { query } => origin::run_suggest(&config, &query).await,
        Commands::Geocode { address } => origin::run_geocode(&config, &address).await,
    }
}

#[cfg(test)]
mod tests;
