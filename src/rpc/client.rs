//! Chain client capability used by the balancer and broadcaster

use crate::credential::Credential;
use crate::error::{Result, RpcError};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Operations a single endpoint connection must provide
///
/// Implementations own nonce and chain-id handling for their endpoint; the
/// callers never coordinate ordering across endpoints.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Sender address for a credential
    fn derive_address(&self, credential: &Credential) -> Result<Address>;

    /// Gas needed to execute `payload` as a deployment from `from`
    async fn estimate_gas(&self, payload: &Bytes, from: Address) -> Result<u64>;

    /// Current network gas price in wei
    async fn gas_price(&self) -> Result<u128>;

    /// Sign a request, filling any fields the endpoint is responsible for
    async fn sign_transaction(
        &self,
        request: TransactionRequest,
        credential: &Credential,
    ) -> Result<Bytes>;

    /// Submit signed bytes and wait for the receipt
    async fn send_signed_transaction(&self, signed: Bytes) -> Result<TxHash>;
}

/// Bound a chain client call; elapsed time becomes `RpcError::Timeout`
pub async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(RpcError::Timeout(timeout.as_millis() as u64).into()),
    }
}
