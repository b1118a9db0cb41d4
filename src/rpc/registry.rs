//! Fixed set of redundant storage endpoints plus the public endpoint

use crate::abi::load_artifact;
use crate::config::ConfigFile;
use crate::error::{ConfigError, Result};
use crate::rpc::{AlloyChainClient, ContractRef, Endpoint};
use std::sync::Arc;

/// Endpoint membership, fixed at startup
///
/// Only the per-endpoint load counters change after construction.
#[derive(Debug)]
pub struct EndpointRegistry {
    redundant: Vec<Arc<Endpoint>>,
    public: Arc<Endpoint>,
}

impl EndpointRegistry {
    /// Create a registry
    ///
    /// Fails if there are no redundant endpoints or one lacks a credential.
    pub fn new(redundant: Vec<Endpoint>, public: Endpoint) -> Result<Self> {
        if redundant.is_empty() {
            return Err(ConfigError::NoRedundantEndpoints.into());
        }

        if let Some(endpoint) = redundant.iter().find(|e| e.credential().is_none()) {
            return Err(ConfigError::MissingCredential(endpoint.url().to_string()).into());
        }

        Ok(Self {
            redundant: redundant.into_iter().map(Arc::new).collect(),
            public: Arc::new(public),
        })
    }

    /// Build every endpoint described by a config file
    ///
    /// Contract artifacts are read and credentials resolved here. Nodes are
    /// not contacted.
    pub fn from_config(config: &ConfigFile) -> Result<Self> {
        let storage_abi = load_artifact(&config.storage.abi_path)?;

        let mut redundant = Vec::with_capacity(config.storage.endpoints.len());
        for (id, cfg) in config.storage.endpoints.iter().enumerate() {
            let client = AlloyChainClient::from_config(cfg)?;
            let contract = ContractRef::new(cfg.address()?, storage_abi.clone());
            let credential = cfg
                .credential()?
                .ok_or_else(|| ConfigError::MissingCredential(cfg.url.clone()))?;

            redundant.push(Endpoint::new(
                id,
                cfg.url.clone(),
                Arc::new(client),
                contract,
                Some(credential),
            ));
        }

        // Numbered after the storage endpoints so ids stay unique
        let public_cfg = &config.public.endpoint;
        let public = Endpoint::new(
            redundant.len(),
            public_cfg.url.clone(),
            Arc::new(AlloyChainClient::from_config(public_cfg)?),
            ContractRef::new(public_cfg.address()?, load_artifact(&config.public.abi_path)?),
            public_cfg.credential()?,
        );

        let registry = Self::new(redundant, public)?;
        tracing::info!(
            "Registered {} storage endpoints and public endpoint {}",
            registry.redundant.len(),
            registry.public.url()
        );
        Ok(registry)
    }

    /// Redundant endpoints in registration order
    pub fn redundant(&self) -> &[Arc<Endpoint>] {
        &self.redundant
    }

    pub fn public(&self) -> &Arc<Endpoint> {
        &self.public
    }

    /// Get number of redundant endpoints
    pub fn len(&self) -> usize {
        self.redundant.len()
    }

    /// Always false; construction rejects an empty set
    pub fn is_empty(&self) -> bool {
        self.redundant.is_empty()
    }

    /// Load of every redundant endpoint, in registration order
    pub fn loads(&self) -> Vec<usize> {
        self.redundant.iter().map(|e| e.load()).collect()
    }
}
