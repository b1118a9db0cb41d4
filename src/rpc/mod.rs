//! Endpoint registry, load balancing and multi-endpoint broadcast

mod alloy_client;
mod balancer;
mod broadcast;
mod client;
mod endpoint;
pub mod gas;
mod registry;
mod submit;

pub use alloy_client::AlloyChainClient;
pub use balancer::{LoadBalancer, Reservation};
pub use broadcast::{BroadcastCoordinator, BroadcastOutcome, BroadcastSettings, EndpointResult};
pub use client::{with_timeout, ChainClient};
pub use endpoint::{ContractRef, Endpoint};
pub use registry::EndpointRegistry;
pub use submit::SingleEndpointSubmitter;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::credential::Credential;
    use crate::error::Result;
    use alloy::json_abi::JsonAbi;
    use alloy::primitives::{Address, Bytes, TxHash};
    use alloy::rpc::types::TransactionRequest;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Client that answers every call with a fixed value
    pub(crate) struct StaticClient;

    #[async_trait]
    impl ChainClient for StaticClient {
        fn derive_address(&self, _credential: &Credential) -> Result<Address> {
            Ok(Address::repeat_byte(0xee))
        }

        async fn estimate_gas(&self, _payload: &Bytes, _from: Address) -> Result<u64> {
            Ok(100_000)
        }

        async fn gas_price(&self) -> Result<u128> {
            Ok(10)
        }

        async fn sign_transaction(
            &self,
            _request: TransactionRequest,
            _credential: &Credential,
        ) -> Result<Bytes> {
            Ok(Bytes::from_static(b"signed"))
        }

        async fn send_signed_transaction(&self, _signed: Bytes) -> Result<TxHash> {
            Ok(TxHash::repeat_byte(0xaa))
        }
    }

    pub(crate) fn endpoint(id: usize, client: Arc<dyn ChainClient>) -> Endpoint {
        Endpoint::new(
            id,
            format!("http://node-{}", id),
            client,
            ContractRef::new(Address::repeat_byte(id as u8 + 1), JsonAbi::default()),
            Some(Credential::new(format!("{:064x}", id + 1)).unwrap()),
        )
    }

    pub(crate) fn registry(n: usize) -> EndpointRegistry {
        let public = Endpoint::new(
            n,
            "http://public",
            Arc::new(StaticClient),
            ContractRef::new(Address::ZERO, JsonAbi::default()),
            None,
        );
        EndpointRegistry::new(
            (0..n).map(|i| endpoint(i, Arc::new(StaticClient))).collect(),
            public,
        )
        .unwrap()
    }
}
