//! Single-destination submission to the public verification endpoint

use crate::credential::Credential;
use crate::error::Result;
use crate::rpc::client::with_timeout;
use crate::rpc::Endpoint;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;

/// Submits a payload to exactly one endpoint
///
/// The network gas price is used as quoted and the gas limit is left to the
/// chain client's own estimation.
pub struct SingleEndpointSubmitter {
    timeout: Duration,
}

impl SingleEndpointSubmitter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns true once a successful receipt comes back
    pub async fn submit(&self, endpoint: &Endpoint, credential: &Credential, payload: &Bytes) -> bool {
        match self.try_submit(endpoint, credential, payload).await {
            Ok(hash) => {
                tracing::info!(endpoint = %endpoint.url(), "Submitted {}", hash);
                true
            }
            Err(e) => {
                tracing::error!(endpoint = %endpoint.url(), "Submission failed: {}", e);
                false
            }
        }
    }

    async fn try_submit(
        &self,
        endpoint: &Endpoint,
        credential: &Credential,
        payload: &Bytes,
    ) -> Result<TxHash> {
        let client = endpoint.connection();
        let from = client.derive_address(credential)?;
        let gas_price = with_timeout(self.timeout, client.gas_price()).await?;

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(endpoint.contract().address)
            .with_gas_price(gas_price)
            .with_input(payload.clone());

        let signed = with_timeout(self.timeout, client.sign_transaction(request, credential)).await?;
        with_timeout(self.timeout, client.send_signed_transaction(signed)).await
    }
}

impl Default for SingleEndpointSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
