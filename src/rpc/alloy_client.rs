//! `ChainClient` backed by an alloy HTTP provider

use crate::config::EndpointConfig;
use crate::credential::Credential;
use crate::error::{ConfigError, Result, RpcError};
use crate::rpc::ChainClient;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{Ethereum, EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;

/// JSON-RPC connection to one endpoint
#[derive(Clone)]
pub struct AlloyChainClient {
    url: String,
    provider: RootProvider,
}

impl AlloyChainClient {
    /// Create a client for a URL
    ///
    /// No request is made here; an unreachable node surfaces on first use.
    pub fn connect(url: &str) -> Result<Self> {
        let parsed: Url = url
            .parse()
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", url, e)))?;

        Ok(Self {
            url: url.to_string(),
            provider: RootProvider::new_http(parsed),
        })
    }

    /// Create a client from endpoint config
    pub fn from_config(config: &EndpointConfig) -> Result<Self> {
        Self::connect(&config.url)
    }

    /// Get the endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    fn derive_address(&self, credential: &Credential) -> Result<Address> {
        Ok(credential.signer()?.address())
    }

    async fn estimate_gas(&self, payload: &Bytes, from: Address) -> Result<u64> {
        // No `to`: estimated as a contract creation carrying the payload
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_input(payload.clone());

        self.provider
            .estimate_gas(tx)
            .await
            .map_err(|e| RpcError::GasEstimation(e.to_string()).into())
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| RpcError::GasPrice(e.to_string()).into())
    }

    async fn sign_transaction(
        &self,
        mut request: TransactionRequest,
        credential: &Credential,
    ) -> Result<Bytes> {
        let signer = credential.signer()?;
        let from = signer.address();

        if request.nonce.is_none() {
            let nonce = self
                .provider
                .get_transaction_count(from)
                .pending()
                .await
                .map_err(|e| RpcError::Provider(format!("nonce lookup: {}", e)))?;
            request.nonce = Some(nonce);
        }

        if request.chain_id.is_none() {
            let chain_id = self
                .provider
                .get_chain_id()
                .await
                .map_err(|e| RpcError::Provider(format!("chain id lookup: {}", e)))?;
            request.chain_id = Some(chain_id);
        }

        if request.gas.is_none() {
            let gas = self
                .provider
                .estimate_gas(request.clone())
                .await
                .map_err(|e| RpcError::GasEstimation(e.to_string()))?;
            request.gas = Some(gas);
        }

        let wallet = EthereumWallet::from(signer);
        let envelope = <TransactionRequest as TransactionBuilder<Ethereum>>::build(request, &wallet)
            .await
            .map_err(|e| RpcError::Signing(e.to_string()))?;

        Ok(envelope.encoded_2718().into())
    }

    async fn send_signed_transaction(&self, signed: Bytes) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(&signed)
            .await
            .map_err(|e| RpcError::Submission(e.to_string()))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| RpcError::Submission(e.to_string()))?;

        if !receipt.status() {
            return Err(RpcError::Reverted(receipt.transaction_hash).into());
        }

        tracing::debug!(
            "Receipt for {} in block {:?} from {}",
            receipt.transaction_hash,
            receipt.block_number,
            self.url
        );

        Ok(receipt.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_rejects_bad_url() {
        assert!(AlloyChainClient::connect("not a url").is_err());
    }

    #[test]
    fn test_connect_is_lazy() {
        let client = AlloyChainClient::connect("http://127.0.0.1:1").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:1");
    }

    #[test]
    fn test_derive_address() {
        let client = AlloyChainClient::connect("http://127.0.0.1:8545").unwrap();
        let credential = Credential::new(ANVIL_KEY).unwrap();
        assert_eq!(
            client.derive_address(&credential).unwrap().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[tokio::test]
    async fn test_sign_with_prefilled_fields_stays_offline() {
        let client = AlloyChainClient::connect("http://127.0.0.1:1").unwrap();
        let credential = Credential::new(ANVIL_KEY).unwrap();
        let from = client.derive_address(&credential).unwrap();

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(Address::ZERO)
            .with_gas_limit(21_000)
            .with_gas_price(1_000_000_000)
            .with_input(Bytes::from_static(&[0xca, 0xfe]))
            .with_nonce(0)
            .with_chain_id(31337);

        let signed = client.sign_transaction(request, &credential).await.unwrap();
        assert!(!signed.is_empty());
    }

    // Integration test (requires a local node)
    #[tokio::test]
    #[ignore]
    async fn test_gas_price_against_anvil() {
        let client = AlloyChainClient::connect("http://127.0.0.1:8545").unwrap();
        let price = client.gas_price().await.unwrap();
        assert!(price > 0);
    }
}
