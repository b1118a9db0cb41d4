//! storage-relay CLI - Load-balanced access to redundant EVM storage nodes

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use eth_storage_relay::Relay;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    if let Commands::Config { action } = &cli.command {
        return cli::config::handle(action, &cli);
    }

    let config = cli.load_config()?;
    let relay = Relay::from_config(&config)?;

    match &cli.command {
        Commands::Endpoints { action } => cli::endpoints::handle(action, &relay).await,
        Commands::Broadcast { data } => cli::submit::handle_broadcast(&relay, data, cli.quiet).await,
        Commands::Submit { data, key_env } => {
            cli::submit::handle_submit(&relay, data, key_env.as_deref(), cli.quiet).await
        }
        Commands::Config { .. } => Ok(()),
    }
}
