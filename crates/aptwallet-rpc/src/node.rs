//! Full-node REST client.
//!
//! Typed async methods for the node endpoints the wallet needs: accounts,
//! resources, event streams, transactions, submission, simulation and tables.

use crate::client::{RestClient, RpcConfig};
use crate::error::RpcError;
use crate::types::{
    AccountData, GasEstimate, LedgerInfo, MoveResource, SubmitTransactionRequest,
    TableItemRequest, Transaction, TransactionRequest,
};
use aptwallet_types::{AccountAddress, Event};
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;

/// Default time to wait for a submitted transaction to commit.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Largest page the node serves from an event stream.
pub const EVENT_PAGE_SIZE: u64 = 100;

/// Interval between polls while waiting for a transaction.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Async client for a full node's REST API.
#[derive(Debug, Clone)]
pub struct NodeRpc {
    client: RestClient,
}

impl NodeRpc {
    /// Create a client for `url` (including the `/v1` prefix).
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Ok(Self {
            client: RestClient::new(url)?,
        })
    }

    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self {
            client: RestClient::with_config(config)?,
        })
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    pub async fn get_ledger_info(&self) -> Result<LedgerInfo, RpcError> {
        self.client.get("/", &[]).await
    }

    pub async fn estimate_gas_price(&self) -> Result<GasEstimate, RpcError> {
        self.client.get("/estimate_gas_price", &[]).await
    }

    // ── Accounts ────────────────────────────────────────────────────────

    pub async fn get_account(&self, address: &AccountAddress) -> Result<AccountData, RpcError> {
        self.client
            .get(&format!("/accounts/{}", address), &[])
            .await
    }

    /// Like [`get_account`](Self::get_account), but `None` when the account
    /// does not exist on chain yet.
    pub async fn find_account(
        &self,
        address: &AccountAddress,
    ) -> Result<Option<AccountData>, RpcError> {
        self.client
            .get_optional(&format!("/accounts/{}", address), &[])
            .await
    }

    pub async fn get_account_resources(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<MoveResource>, RpcError> {
        self.client
            .get(&format!("/accounts/{}/resources", address), &[])
            .await
    }

    pub async fn get_account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> Result<MoveResource, RpcError> {
        self.client
            .get(
                &format!("/accounts/{}/resource/{}", address, resource_type),
                &[],
            )
            .await
    }

    /// Transactions sent by `address`, oldest first.
    pub async fn get_account_transactions(
        &self,
        address: &AccountAddress,
        start: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<Transaction>, RpcError> {
        let query = paging(start, limit);
        self.client
            .get(&format!("/accounts/{}/transactions", address), &query)
            .await
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Event log `field_name` of the resource `event_handle` under `address`.
    ///
    /// A stream that does not exist yet (HTTP 404) is an empty log. Any other
    /// failure is returned as an error, never as an empty list.
    pub async fn get_event_stream(
        &self,
        address: &AccountAddress,
        event_handle: &str,
        field_name: &str,
        limit: Option<u64>,
        start: Option<u64>,
    ) -> Result<Vec<Event>, RpcError> {
        let path = format!("/accounts/{}/events/{}/{}", address, event_handle, field_name);
        let query = paging(start, limit);
        let events: Option<Vec<Event>> = self.client.get_optional(&path, &query).await?;
        let events = events.unwrap_or_default();
        debug!("{}: {} events", path, events.len());
        Ok(events)
    }

    pub async fn get_events_by_event_handle(
        &self,
        address: &AccountAddress,
        event_handle: &str,
        field_name: &str,
    ) -> Result<Vec<Event>, RpcError> {
        self.get_event_stream(address, event_handle, field_name, None, None)
            .await
    }

    /// Whole event log, fetched page by page from sequence 0 until the node
    /// returns a short page.
    pub async fn get_all_events(
        &self,
        address: &AccountAddress,
        event_handle: &str,
        field_name: &str,
    ) -> Result<Vec<Event>, RpcError> {
        let mut events = Vec::new();
        loop {
            let start = events.len() as u64;
            let page = self
                .get_event_stream(
                    address,
                    event_handle,
                    field_name,
                    Some(EVENT_PAGE_SIZE),
                    Some(start),
                )
                .await?;
            let done = (page.len() as u64) < EVENT_PAGE_SIZE;
            events.extend(page);
            if done {
                return Ok(events);
            }
        }
    }

    // ── Transactions ────────────────────────────────────────────────────

    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<Transaction, RpcError> {
        self.client
            .get(&format!("/transactions/by_hash/{}", hash), &[])
            .await
    }

    pub async fn get_transaction_by_version(&self, version: u64) -> Result<Transaction, RpcError> {
        self.client
            .get(&format!("/transactions/by_version/{}", version), &[])
            .await
    }

    /// BCS signing message for `request`, as produced by the node.
    pub async fn encode_submission(
        &self,
        request: &TransactionRequest,
    ) -> Result<Vec<u8>, RpcError> {
        let encoded: String = self
            .client
            .post("/transactions/encode_submission", &[], request)
            .await?;
        let digits = encoded.strip_prefix("0x").unwrap_or(&encoded);
        hex::decode(digits)
            .map_err(|e| RpcError::Other(format!("encode_submission returned bad hex: {}", e)))
    }

    pub async fn submit_transaction(
        &self,
        signed: &SubmitTransactionRequest,
    ) -> Result<Transaction, RpcError> {
        let pending: Transaction = self.client.post("/transactions", &[], signed).await?;
        info!("submitted transaction {}", pending.hash);
        Ok(pending)
    }

    pub async fn simulate_transaction(
        &self,
        signed: &SubmitTransactionRequest,
    ) -> Result<Vec<Transaction>, RpcError> {
        self.client
            .post("/transactions/simulate", &[], signed)
            .await
    }

    /// Poll until `hash` leaves the mempool and return the committed
    /// transaction (successful or not).
    pub async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
    ) -> Result<Transaction, RpcError> {
        let path = format!("/transactions/by_hash/{}", hash);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let txn: Option<Transaction> = self.client.get_optional(&path, &[]).await?;
            if let Some(txn) = txn {
                if !txn.is_pending() {
                    info!(
                        "transaction {} committed at version {} (success: {:?})",
                        hash,
                        txn.version.as_deref().unwrap_or("?"),
                        txn.success
                    );
                    return Ok(txn);
                }
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(RpcError::Timeout {
                    hash: hash.to_string(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    // ── Tables ──────────────────────────────────────────────────────────

    pub async fn get_table_item(
        &self,
        handle: &str,
        request: &TableItemRequest,
    ) -> Result<Value, RpcError> {
        self.client
            .post(&format!("/tables/{}/item", handle), &[], request)
            .await
    }

    /// Connectivity check.
    pub async fn is_connected(&self) -> bool {
        self.get_ledger_info().await.is_ok()
    }
}

fn paging(start: Option<u64>, limit: Option<u64>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    if let Some(start) = start {
        query.push(("start", start.to_string()));
    }
    query
}
