//! Entry point bundling selection, broadcast and public submission

use crate::config::{ConfigFile, Settings};
use crate::credential::Credential;
use crate::error::Result;
use crate::rpc::{
    BroadcastCoordinator, BroadcastOutcome, BroadcastSettings, Endpoint, EndpointRegistry,
    LoadBalancer, Reservation, SingleEndpointSubmitter,
};
use alloy::primitives::{Bytes, TxHash};
use std::sync::Arc;

/// Storage relay over one registry
///
/// The balancer and the coordinator share the registry's load counters.
pub struct Relay {
    registry: Arc<EndpointRegistry>,
    balancer: LoadBalancer,
    coordinator: BroadcastCoordinator,
    submitter: SingleEndpointSubmitter,
}

impl Relay {
    pub fn new(registry: EndpointRegistry, settings: &Settings) -> Self {
        let registry = Arc::new(registry);
        Self {
            balancer: LoadBalancer::new(registry.clone()),
            coordinator: BroadcastCoordinator::new(
                registry.clone(),
                BroadcastSettings::from(settings),
            ),
            submitter: SingleEndpointSubmitter::new(settings.timeout()),
            registry,
        }
    }

    /// Build the registry and relay from a config file
    pub fn from_config(config: &ConfigFile) -> Result<Self> {
        let registry = EndpointRegistry::from_config(config)?;
        Ok(Self::new(registry, &config.settings))
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }

    pub fn balancer(&self) -> &LoadBalancer {
        &self.balancer
    }

    pub fn coordinator(&self) -> &BroadcastCoordinator {
        &self.coordinator
    }

    /// Reserve the least-loaded storage endpoint
    pub fn get_best_redundant(&self) -> Reservation {
        self.balancer.select_best()
    }

    pub fn get_public(&self) -> Arc<Endpoint> {
        self.balancer.select_public()
    }

    /// Per-endpoint outcome of a broadcast
    pub async fn broadcast(&self, payload: &Bytes) -> BroadcastOutcome {
        self.coordinator.broadcast(payload).await
    }

    /// Hashes from all storage endpoints, or one failure if any rejected it
    pub async fn broadcast_to_redundant(&self, payload: &Bytes) -> Result<Vec<TxHash>> {
        self.coordinator.broadcast_to_redundant(payload).await
    }

    pub async fn submit_to_public(
        &self,
        endpoint: &Endpoint,
        credential: &Credential,
        payload: &Bytes,
    ) -> bool {
        self.submitter.submit(endpoint, credential, payload).await
    }
}
