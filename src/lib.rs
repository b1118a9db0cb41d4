//! eth-storage-relay - Load-balanced access to redundant EVM storage nodes
//!
//! A library and CLI that tracks in-flight work per storage endpoint, hands out
//! the least-loaded one, and broadcasts a transaction payload to every storage
//! endpoint with independent gas pricing and signing.
//!
//! # Example
//!
//! ```rust,no_run
//! use eth_storage_relay::{ConfigFile, Relay};
//! use alloy::primitives::Bytes;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigFile::from_env()?;
//!     let relay = Relay::from_config(&config)?;
//!
//!     // Single destination for a read
//!     let node = relay.get_best_redundant();
//!     println!("Using storage node {}", node.url());
//!     node.release();
//!
//!     // Every storage node, all-or-nothing
//!     let payload = Bytes::from_static(b"\x12\x34");
//!     let hashes = relay.broadcast_to_redundant(&payload).await?;
//!     println!("Stored in {} transactions", hashes.len());
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod config;
pub mod credential;
pub mod error;
pub mod relay;
pub mod rpc;

// Re-exports for convenience
pub use abi::{load_artifact, parse_artifact};
pub use config::{
    BroadcastMode, ConfigFile, EndpointConfig, PublicConfig, Settings, StorageConfig,
};
pub use credential::Credential;
pub use error::{ConfigError, Error, Result, RpcError};
pub use relay::Relay;
pub use rpc::{
    AlloyChainClient, BroadcastCoordinator, BroadcastOutcome, BroadcastSettings, ChainClient,
    ContractRef, Endpoint, EndpointRegistry, EndpointResult, LoadBalancer, Reservation,
    SingleEndpointSubmitter,
};
