//! Endpoint inspection commands

use clap::Subcommand;
use eth_storage_relay::Relay;

#[derive(Subcommand)]
pub enum EndpointCommands {
    /// List all configured endpoints with their current load
    List,

    /// Reserve the least-loaded storage endpoint and show it
    Best,
}

pub async fn handle(action: &EndpointCommands, relay: &Relay) -> anyhow::Result<()> {
    match action {
        EndpointCommands::List => {
            let registry = relay.registry();

            println!("STORAGE ENDPOINTS ({})\n", registry.len());
            for endpoint in registry.redundant() {
                println!("  [{}] {}", endpoint.position(), endpoint.url());
                println!(
                    "      Contract: {} | Load: {}",
                    endpoint.contract().address,
                    endpoint.load()
                );
            }

            let public = registry.public();
            println!("\nPUBLIC ENDPOINT\n");
            println!("  {}", public.url());
            println!("      Contract: {}", public.contract().address);
        }

        EndpointCommands::Best => {
            let reservation = relay.get_best_redundant();
            let sender = reservation.sender_address()?;

            println!("Position: {}", reservation.id() + 1);
            println!("URL:      {}", reservation.url());
            println!("Contract: {}", reservation.contract().address);
            println!("Sender:   {}", sender);

            reservation.release();
        }
    }

    Ok(())
}
