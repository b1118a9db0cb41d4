//! Error types for eth-storage-relay

use alloy::primitives::TxHash;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// RPC-related errors
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// RPC-specific errors
///
/// Everything in here is scoped to a single endpoint except
/// `BroadcastIncomplete`, which is the aggregate failure of a broadcast.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Gas estimation failed: {0}")]
    GasEstimation(String),

    #[error("Failed to fetch gas price: {0}")]
    GasPrice(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Failed to submit transaction: {0}")]
    Submission(String),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Invalid signing credential: {0}")]
    InvalidCredential(String),

    #[error("Broadcast incomplete: {failed} of {total} endpoints failed")]
    BroadcastIncomplete { failed: usize, total: usize },

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    #[error("Endpoint {0} has no signing credential")]
    MissingCredential(String),

    #[error("At least one redundant storage endpoint is required")]
    NoRedundantEndpoints,

    #[error("Failed to load contract artifact: {0}")]
    Artifact(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from a per-call timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Rpc(RpcError::Timeout(_)))
    }
}
