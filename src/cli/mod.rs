//! CLI command modules
//!
//! Each subcommand has its own module with argument definitions and handlers.

pub mod config;
pub mod endpoints;
pub mod submit;

use clap::{Parser, Subcommand};
use eth_storage_relay::ConfigFile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "storage-relay")]
#[command(
    version,
    about = "Load-balanced access and all-node broadcast for redundant EVM storage endpoints"
)]
#[command(after_help = r#"EXAMPLES:
    # Show storage endpoints and their current load
    storage-relay endpoints list

    # Store a payload on every storage node
    storage-relay broadcast 0x6057361d000000000000000000000000000000000000000000000000000000000000002a

    # Submit a proof to the public verification contract
    storage-relay submit 0x... --key-env ETH_VERIFICATION_KEY

    # Read configuration from ETH_STORAGE_* / ETH_VERIFICATION_* variables
    storage-relay --env endpoints list

CONFIG FILE:
    Default: ~/.config/eth-storage-relay/config.toml
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read configuration from environment variables instead of a file
    #[arg(long, global = true, conflicts_with = "config")]
    pub env: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect storage and public endpoints
    Endpoints {
        #[command(subcommand)]
        action: endpoints::EndpointCommands,
    },

    /// Send a payload to every storage endpoint
    Broadcast {
        /// Transaction data (hex encoded)
        data: String,
    },

    /// Send a payload to the public verification endpoint
    Submit {
        /// Transaction data (hex encoded)
        data: String,

        /// Environment variable holding the signing key
        /// (defaults to the public endpoint's configured key)
        #[arg(long)]
        key_env: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

impl Cli {
    /// Resolve the configuration source selected on the command line
    pub fn load_config(&self) -> anyhow::Result<ConfigFile> {
        if self.env {
            return Ok(ConfigFile::from_env()?);
        }

        let path = self.config.clone().unwrap_or_else(ConfigFile::default_path);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "No config file found at {}. Use --config or --env",
                path.display()
            ));
        }
        Ok(ConfigFile::load(&path)?)
    }
}

/// Decode hex transaction data, with or without `0x`
pub fn parse_payload(data: &str) -> anyhow::Result<alloy::primitives::Bytes> {
    let data_hex = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(data_hex).map_err(|e| anyhow::anyhow!("Invalid data: {}", e))?;
    if bytes.is_empty() {
        return Err(anyhow::anyhow!("Transaction data is empty"));
    }
    Ok(bytes.into())
}
