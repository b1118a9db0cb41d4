//! A configured endpoint and its in-flight load counter

use crate::credential::Credential;
use crate::error::{ConfigError, Result};
use crate::rpc::ChainClient;
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Contract an endpoint writes to
#[derive(Debug, Clone)]
pub struct ContractRef {
    pub address: Address,
    pub abi: JsonAbi,
}

impl ContractRef {
    pub fn new(address: Address, abi: JsonAbi) -> Self {
        Self { address, abi }
    }
}

/// A single endpoint: connection, contract, credential and load
pub struct Endpoint {
    id: usize,
    url: String,
    connection: Arc<dyn ChainClient>,
    contract: ContractRef,
    credential: Option<Credential>,
    load: AtomicUsize,
}

impl Endpoint {
    pub fn new(
        id: usize,
        url: impl Into<String>,
        connection: Arc<dyn ChainClient>,
        contract: ContractRef,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            id,
            url: url.into(),
            connection,
            contract,
            credential,
            load: AtomicUsize::new(0),
        }
    }

    /// Registration index
    pub fn id(&self) -> usize {
        self.id
    }

    /// 1-based position, as operators number their nodes
    pub fn position(&self) -> usize {
        self.id + 1
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connection(&self) -> &Arc<dyn ChainClient> {
        &self.connection
    }

    pub fn contract(&self) -> &ContractRef {
        &self.contract
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Address that signs for this endpoint
    pub fn sender_address(&self) -> Result<Address> {
        let credential = self
            .credential()
            .ok_or_else(|| ConfigError::MissingCredential(self.url.clone()))?;
        self.connection.derive_address(credential)
    }

    /// Current number of in-flight units of work
    pub fn load(&self) -> usize {
        self.load.load(Ordering::SeqCst)
    }

    /// Increment load, returning the new value
    pub(crate) fn reserve(&self) -> usize {
        self.load.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Decrement load, clamped at zero, returning the new value
    ///
    /// A release with nothing reserved is a caller bug; it is logged and
    /// leaves the counter at zero.
    pub fn release(&self) -> usize {
        match self
            .load
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(previous) => previous - 1,
            Err(_) => {
                tracing::warn!(
                    endpoint = %self.url,
                    position = self.position(),
                    "Release without matching reservation; load stays at 0"
                );
                0
            }
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("contract", &self.contract.address)
            .field("has_credential", &self.credential.is_some())
            .field("load", &self.load())
            .finish()
    }
}

/// Holds one unit of load on an endpoint until dropped
pub(crate) struct LoadGuard<'a> {
    endpoint: &'a Endpoint,
}

impl<'a> LoadGuard<'a> {
    pub(crate) fn new(endpoint: &'a Endpoint) -> Self {
        endpoint.reserve();
        Self { endpoint }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.endpoint.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::test_support::{endpoint, StaticClient};

    #[test]
    fn test_reserve_and_release() {
        let ep = endpoint(0, Arc::new(StaticClient));
        assert_eq!(ep.load(), 0);
        assert_eq!(ep.reserve(), 1);
        assert_eq!(ep.reserve(), 2);
        assert_eq!(ep.release(), 1);
        assert_eq!(ep.load(), 1);
    }

    #[test]
    fn test_release_clamps_at_zero() {
        let ep = endpoint(0, Arc::new(StaticClient));
        ep.reserve();
        assert_eq!(ep.release(), 0);
        assert_eq!(ep.release(), 0);
        assert_eq!(ep.release(), 0);
        assert_eq!(ep.load(), 0);
    }

    #[test]
    fn test_load_guard_releases_on_drop() {
        let ep = endpoint(0, Arc::new(StaticClient));
        {
            let _first = LoadGuard::new(&ep);
            let _second = LoadGuard::new(&ep);
            assert_eq!(ep.load(), 2);
        }
        assert_eq!(ep.load(), 0);
    }

    #[test]
    fn test_position_and_debug() {
        let ep = endpoint(2, Arc::new(StaticClient));
        assert_eq!(ep.position(), 3);
        let printed = format!("{:?}", ep);
        assert!(printed.contains("has_credential: true"));
        assert!(!printed.contains("Credential("));
    }

    #[test]
    fn test_sender_address_requires_credential() {
        let ep = Endpoint::new(
            0,
            "http://public",
            Arc::new(StaticClient),
            ContractRef::new(Address::ZERO, JsonAbi::default()),
            None,
        );
        assert!(ep.sender_address().is_err());
    }
}
