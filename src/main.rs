//! Pulsechat - Chat assistant engine for the Pulseboard demo dashboard
//!
#![doc = "Pulsechat - Chat assistant engine for the Pulseboard demo dashboard"]
#![doc = "Main entry point for the Pulsechat CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulsechat::cli::{Cli, Commands};
use pulsechat::commands;
use pulsechat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat mode");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Routes => {
            commands::routes::print_routes();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pulsechat=debug"
    } else {
        "pulsechat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
