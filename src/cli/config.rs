//! Configuration management commands

use clap::Subcommand;
use eth_storage_relay::ConfigFile;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config file path
    Path,

    /// Show current config (inline keys redacted)
    Show,
}

pub fn handle(action: &ConfigCommands, cli: &super::Cli) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Path => {
            let path = cli.config.clone().unwrap_or_else(ConfigFile::default_path);
            println!("{}", path.display());
        }

        ConfigCommands::Show => {
            let config = cli.load_config()?;
            println!("{}", toml::to_string_pretty(&config.redacted())?);
        }
    }

    Ok(())
}
