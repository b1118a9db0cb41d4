//! Least-loaded selection over the redundant endpoints

use crate::credential::Credential;
use crate::error::Result;
use crate::rpc::{ChainClient, ContractRef, Endpoint, EndpointRegistry};
use alloy::primitives::Address;
use std::sync::{Arc, Mutex};

/// Picks the redundant endpoint with the fewest in-flight requests
pub struct LoadBalancer {
    registry: Arc<EndpointRegistry>,
    /// Serializes scan-and-reserve so concurrent selections see each other
    selection: Mutex<()>,
}

impl LoadBalancer {
    pub fn new(registry: Arc<EndpointRegistry>) -> Self {
        Self {
            registry,
            selection: Mutex::new(()),
        }
    }

    /// Reserve the least-loaded redundant endpoint
    ///
    /// Ties go to the lowest registration index.
    pub fn select_best(&self) -> Reservation {
        let _guard = self
            .selection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Strict comparison keeps the first of equal minima
        let Some((first, rest)) = self.registry.redundant().split_first() else {
            unreachable!("registry construction rejects an empty endpoint set");
        };
        let best = rest
            .iter()
            .fold(first, |best, e| if e.load() < best.load() { e } else { best });

        let load = best.reserve();
        tracing::debug!(
            endpoint = %best.url(),
            position = best.position(),
            load,
            "Selected storage endpoint"
        );

        Reservation {
            endpoint: best.clone(),
        }
    }

    /// The public endpoint; it is not load tracked
    pub fn select_public(&self) -> Arc<Endpoint> {
        self.registry.public().clone()
    }

    /// Load of every redundant endpoint, in registration order
    pub fn loads(&self) -> Vec<usize> {
        self.registry.loads()
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }
}

/// One unit of load held on a selected endpoint
///
/// Call [`Reservation::release`] when the work finishes, whatever its outcome.
/// Dropping the reservation releases it as well.
#[must_use = "dropping a reservation releases it immediately"]
pub struct Reservation {
    endpoint: Arc<Endpoint>,
}

impl Reservation {
    pub fn id(&self) -> usize {
        self.endpoint.id()
    }

    pub fn url(&self) -> &str {
        self.endpoint.url()
    }

    pub fn connection(&self) -> &Arc<dyn ChainClient> {
        self.endpoint.connection()
    }

    pub fn contract(&self) -> &ContractRef {
        self.endpoint.contract()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.endpoint.credential()
    }

    pub fn endpoint(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    /// Address that signs for the reserved endpoint
    pub fn sender_address(&self) -> Result<Address> {
        self.endpoint.sender_address()
    }

    /// The endpoint's load, including this reservation
    pub fn load(&self) -> usize {
        self.endpoint.load()
    }

    /// Give the reserved unit of load back
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        let load = self.endpoint.release();
        tracing::debug!(
            endpoint = %self.endpoint.url(),
            position = self.endpoint.position(),
            load,
            "Released storage endpoint"
        );
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
