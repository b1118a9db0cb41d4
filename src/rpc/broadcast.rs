//! Submit one payload to every redundant endpoint

use crate::config::{BroadcastMode, Settings};
use crate::error::{ConfigError, Result, RpcError};
use crate::rpc::client::with_timeout;
use crate::rpc::endpoint::LoadGuard;
use crate::rpc::gas::{gas_limit_with_margin, gas_price_with_margin};
use crate::rpc::{Endpoint, EndpointRegistry};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Result of submitting to one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResult {
    pub endpoint_id: usize,
    pub url: String,
    /// Transaction hash, or the failure message
    pub result: std::result::Result<TxHash, String>,
}

impl EndpointResult {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-endpoint results of a broadcast, in registration order
#[derive(Debug, Clone)]
pub struct BroadcastOutcome {
    results: Vec<EndpointResult>,
}

impl BroadcastOutcome {
    pub fn new(results: Vec<EndpointResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[EndpointResult] {
        &self.results
    }

    /// True only if every endpoint accepted the transaction
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(EndpointResult::is_success)
    }

    /// Hashes from the endpoints that succeeded
    pub fn tx_hashes(&self) -> Vec<TxHash> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok().copied())
            .collect()
    }

    /// Endpoints that failed
    pub fn failures(&self) -> Vec<&EndpointResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    /// Collapse to all-or-nothing
    ///
    /// Endpoints that succeeded keep their submitted transaction even when
    /// this returns an error.
    pub fn into_result(self) -> Result<Vec<TxHash>> {
        let failed = self.failures().len();
        if failed > 0 {
            return Err(RpcError::BroadcastIncomplete {
                failed,
                total: self.results.len(),
            }
            .into());
        }
        Ok(self.tx_hashes())
    }
}

/// Fan-out tuning, taken from [`Settings`]
#[derive(Debug, Clone)]
pub struct BroadcastSettings {
    pub timeout: Duration,
    pub gas_limit_margin_percent: u32,
    pub gas_price_margin_percent: u32,
    pub mode: BroadcastMode,
}

impl From<&Settings> for BroadcastSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            timeout: settings.timeout(),
            gas_limit_margin_percent: settings.gas_limit_margin_percent,
            gas_price_margin_percent: settings.gas_price_margin_percent,
            mode: settings.broadcast_mode,
        }
    }
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Sends the same payload to each redundant endpoint with its own gas
/// pricing, nonce and signature
pub struct BroadcastCoordinator {
    registry: Arc<EndpointRegistry>,
    settings: BroadcastSettings,
}

impl BroadcastCoordinator {
    pub fn new(registry: Arc<EndpointRegistry>, settings: BroadcastSettings) -> Self {
        Self { registry, settings }
    }

    pub fn settings(&self) -> &BroadcastSettings {
        &self.settings
    }

    /// Submit `payload` to every redundant endpoint
    ///
    /// A failing endpoint never stops the others. Each endpoint carries one
    /// extra unit of load while its submission is in flight.
    pub async fn broadcast(&self, payload: &Bytes) -> BroadcastOutcome {
        let endpoints = self.registry.redundant();
        tracing::debug!(
            "Broadcasting {} bytes to {} endpoints ({})",
            payload.len(),
            endpoints.len(),
            self.settings.mode
        );

        let results = match self.settings.mode {
            BroadcastMode::Concurrent => {
                join_all(endpoints.iter().map(|e| self.submit_one(e, payload))).await
            }
            BroadcastMode::Sequential => {
                let mut results = Vec::with_capacity(endpoints.len());
                for endpoint in endpoints {
                    results.push(self.submit_one(endpoint, payload).await);
                }
                results
            }
        };

        BroadcastOutcome::new(results)
    }

    /// Broadcast and collapse to all hashes or a single failure
    pub async fn broadcast_to_redundant(&self, payload: &Bytes) -> Result<Vec<TxHash>> {
        self.broadcast(payload).await.into_result()
    }

    async fn submit_one(&self, endpoint: &Endpoint, payload: &Bytes) -> EndpointResult {
        let _load = LoadGuard::new(endpoint);

        let result = match self.try_submit(endpoint, payload).await {
            Ok(hash) => {
                tracing::info!(
                    endpoint = %endpoint.url(),
                    position = endpoint.position(),
                    "Stored payload in {}",
                    hash
                );
                Ok(hash)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %endpoint.url(),
                    position = endpoint.position(),
                    "Submission failed: {}",
                    e
                );
                Err(e.to_string())
            }
        };

        EndpointResult {
            endpoint_id: endpoint.id(),
            url: endpoint.url().to_string(),
            result,
        }
    }

    async fn try_submit(&self, endpoint: &Endpoint, payload: &Bytes) -> Result<TxHash> {
        let timeout = self.settings.timeout;
        let client = endpoint.connection();
        let credential = endpoint
            .credential()
            .ok_or_else(|| ConfigError::MissingCredential(endpoint.url().to_string()))?;

        let from = client.derive_address(credential)?;

        let estimated = with_timeout(timeout, client.estimate_gas(payload, from)).await?;
        let gas_limit = gas_limit_with_margin(estimated, self.settings.gas_limit_margin_percent);

        let quoted = with_timeout(timeout, client.gas_price()).await?;
        let gas_price = gas_price_with_margin(quoted, self.settings.gas_price_margin_percent);

        tracing::debug!(
            endpoint = %endpoint.url(),
            "Gas limit {} (estimated {}), gas price {} (quoted {})",
            gas_limit,
            estimated,
            gas_price,
            quoted
        );

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(endpoint.contract().address)
            .with_gas_limit(gas_limit)
            .with_gas_price(gas_price)
            .with_input(payload.clone())
            .with_value(U256::ZERO);

        let signed = with_timeout(timeout, client.sign_transaction(request, credential)).await?;
        with_timeout(timeout, client.send_signed_transaction(signed)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: usize, hash: Option<u8>) -> EndpointResult {
        EndpointResult {
            endpoint_id: id,
            url: format!("http://node-{}", id),
            result: match hash {
                Some(b) => Ok(TxHash::repeat_byte(b)),
                None => Err("rejected".to_string()),
            },
        }
    }

    #[test]
    fn test_outcome_all_success() {
        let outcome = BroadcastOutcome::new(vec![result(0, Some(1)), result(1, Some(2))]);
        assert!(outcome.is_valid());
        assert!(outcome.failures().is_empty());
        assert_eq!(
            outcome.into_result().unwrap(),
            vec![TxHash::repeat_byte(1), TxHash::repeat_byte(2)]
        );
    }

    #[test]
    fn test_outcome_partial_failure() {
        let outcome = BroadcastOutcome::new(vec![
            result(0, Some(1)),
            result(1, None),
            result(2, Some(3)),
        ]);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.tx_hashes().len(), 2);
        assert_eq!(outcome.failures()[0].endpoint_id, 1);

        let err = outcome.into_result().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Rpc(RpcError::BroadcastIncomplete {
                failed: 1,
                total: 3
            })
        ));
    }

    #[test]
    fn test_settings_from_config() {
        let settings = Settings {
            timeout_seconds: 5,
            gas_limit_margin_percent: 50,
            gas_price_margin_percent: 10,
            broadcast_mode: BroadcastMode::Sequential,
        };
        let broadcast = BroadcastSettings::from(&settings);
        assert_eq!(broadcast.timeout, Duration::from_secs(5));
        assert_eq!(broadcast.gas_limit_margin_percent, 50);
        assert_eq!(broadcast.gas_price_margin_percent, 10);
        assert_eq!(broadcast.mode, BroadcastMode::Sequential);
    }
}
