//! Scripted chain client shared by the integration tests

#![allow(dead_code)]

use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use eth_storage_relay::{
    ChainClient, ContractRef, Credential, Endpoint, EndpointRegistry, Result, RpcError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Chain client step, used to script failures and record call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Derive,
    Estimate,
    GasPrice,
    Sign,
    Send,
}

/// Shared, ordered log of `(endpoint id, step)` across every client
pub type CallLog = Arc<Mutex<Vec<(usize, Step)>>>;

pub struct ScriptedClient {
    pub id: usize,
    pub gas_estimate: u64,
    pub gas_price: u128,
    pub fail_at: Option<Step>,
    pub hang_at: Option<Step>,
    pub delay: Duration,
    pub log: CallLog,
    pub signed_requests: Mutex<Vec<TransactionRequest>>,
}

impl ScriptedClient {
    pub fn new(id: usize, log: CallLog) -> Self {
        Self {
            id,
            gas_estimate: 100_000,
            gas_price: 10,
            fail_at: None,
            hang_at: None,
            delay: Duration::ZERO,
            log,
            signed_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, step: Step) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn hanging_at(mut self, step: Step) -> Self {
        self.hang_at = Some(step);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sender(id: usize) -> Address {
        Address::repeat_byte(0x10 + id as u8)
    }

    pub fn hash(id: usize) -> TxHash {
        TxHash::repeat_byte(id as u8 + 1)
    }

    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.signed_requests.lock().unwrap().clone()
    }

    fn record(&self, step: Step) -> Result<()> {
        self.log.lock().unwrap().push((self.id, step));
        if self.fail_at == Some(step) {
            return Err(RpcError::Provider(format!("node {} rejected {:?}", self.id, step)).into());
        }
        Ok(())
    }

    async fn pace(&self, step: Step) {
        if self.hang_at == Some(step) {
            futures::future::pending::<()>().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ChainClient for ScriptedClient {
    fn derive_address(&self, _credential: &Credential) -> Result<Address> {
        self.record(Step::Derive)?;
        Ok(Self::sender(self.id))
    }

    async fn estimate_gas(&self, _payload: &Bytes, _from: Address) -> Result<u64> {
        self.pace(Step::Estimate).await;
        self.record(Step::Estimate)?;
        Ok(self.gas_estimate)
    }

    async fn gas_price(&self) -> Result<u128> {
        self.pace(Step::GasPrice).await;
        self.record(Step::GasPrice)?;
        Ok(self.gas_price)
    }

    async fn sign_transaction(
        &self,
        request: TransactionRequest,
        _credential: &Credential,
    ) -> Result<Bytes> {
        self.pace(Step::Sign).await;
        self.record(Step::Sign)?;
        self.signed_requests.lock().unwrap().push(request);
        Ok(Bytes::from(vec![self.id as u8; 4]))
    }

    async fn send_signed_transaction(&self, _signed: Bytes) -> Result<TxHash> {
        self.pace(Step::Send).await;
        self.record(Step::Send)?;
        Ok(Self::hash(self.id))
    }
}

pub fn credential(id: usize) -> Credential {
    Credential::new(format!("{:064x}", id + 1)).unwrap()
}

pub fn contract_address(id: usize) -> Address {
    Address::repeat_byte(0xc0 + id as u8)
}

pub fn endpoint(client: Arc<ScriptedClient>) -> Endpoint {
    let id = client.id;
    Endpoint::new(
        id,
        format!("http://storage-{}:8545", id),
        client,
        ContractRef::new(contract_address(id), JsonAbi::default()),
        Some(credential(id)),
    )
}

pub fn public_endpoint(client: Arc<ScriptedClient>) -> Endpoint {
    Endpoint::new(
        client.id,
        "https://verification.example",
        client,
        ContractRef::new(Address::repeat_byte(0xf0), JsonAbi::default()),
        None,
    )
}

/// Registry over the given storage clients with a well-behaved public client
pub fn registry(clients: &[Arc<ScriptedClient>], log: &CallLog) -> EndpointRegistry {
    EndpointRegistry::new(
        clients.iter().cloned().map(endpoint).collect(),
        public_endpoint(Arc::new(ScriptedClient::new(99, log.clone()))),
    )
    .unwrap()
}

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}
