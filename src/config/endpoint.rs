//! RPC endpoint configuration

use crate::credential::Credential;
use crate::error::{ConfigError, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration for a single RPC endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// RPC URL
    pub url: String,
    /// Address of the contract this endpoint talks to
    pub contract_address: String,
    /// Inline private key (prefer `private_key_env`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Name of the environment variable holding the private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_env: Option<String>,
}

impl EndpointConfig {
    /// Create a new endpoint config without a credential
    pub fn new(url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            contract_address: contract_address.into(),
            private_key: None,
            private_key_env: None,
        }
    }

    /// Builder-style setter for an inline private key
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Builder-style setter for the private key variable name
    pub fn with_private_key_env(mut self, var: impl Into<String>) -> Self {
        self.private_key_env = Some(var.into());
        self
    }

    /// Parse the contract address
    pub fn address(&self) -> Result<Address> {
        parse_address(&self.contract_address)
    }

    /// Resolve the signing credential, if one is configured
    ///
    /// An inline key wins over the environment variable.
    pub fn credential(&self) -> Result<Option<Credential>> {
        if let Some(key) = &self.private_key {
            return Credential::new(key.clone()).map(Some);
        }
        match &self.private_key_env {
            Some(var) => Credential::from_env(var).map(Some),
            None => Ok(None),
        }
    }

    /// Copy of this config with secrets masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            private_key: self.private_key.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}

/// Parse a hex contract address
pub fn parse_address(s: &str) -> Result<Address> {
    Address::from_str(s.trim()).map_err(|e| ConfigError::InvalidAddress(format!("{}: {}", s, e)).into())
}
