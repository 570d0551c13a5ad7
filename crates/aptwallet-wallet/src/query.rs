//! Projections over node responses: balances, coin registration, transaction
//! summaries and event ordering.

use aptwallet_rpc::types::{MoveResource, Transaction};
use aptwallet_types::constants::types::COIN_STORE;
use aptwallet_types::{AccountAddress, AddressError, Event};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Coins ──────────────────────────────────────────────────────────────────

/// Balance held in one coin store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    /// Full coin store type, e.g. `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>`.
    pub coin: String,
    /// Octas as a decimal string; `None` if the resource had no value.
    pub value: Option<String>,
}

/// `0x1::coin::CoinInfo<T>` resource data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub supply: Value,
}

fn coin_stores(resources: &[MoveResource]) -> impl Iterator<Item = &MoveResource> {
    resources
        .iter()
        .filter(|r| r.resource_type.starts_with(COIN_STORE))
}

/// Every coin store among `resources`, with its balance.
pub fn coin_balances(resources: &[MoveResource]) -> Vec<CoinBalance> {
    coin_stores(resources)
        .map(|r| CoinBalance {
            coin: r.resource_type.clone(),
            value: r
                .data
                .pointer("/coin/value")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect()
}

/// Coin store types among `resources` (the event handles of coin activity).
pub fn coin_store_types(resources: &[MoveResource]) -> Vec<String> {
    coin_stores(resources)
        .map(|r| r.resource_type.clone())
        .collect()
}

/// Whether any coin store type mentions `coin`.
pub fn is_registered(resources: &[MoveResource], coin: &str) -> bool {
    coin_stores(resources).any(|r| r.resource_type.contains(coin))
}

/// Address that published `coin_type` (the part before the first `::`).
pub fn coin_publisher(coin_type: &str) -> Result<AccountAddress, AddressError> {
    coin_type
        .split("::")
        .next()
        .unwrap_or_default()
        .parse()
}

// ─── Transactions ───────────────────────────────────────────────────────────

/// Flattened view of a transaction for history listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub data: Option<Value>,
    pub from: Option<String>,
    pub gas: Option<String>,
    pub gas_price: Option<String>,
    pub hash: String,
    pub success: Option<bool>,
    pub timestamp: Option<String>,
    /// First payload argument (the recipient for transfers).
    pub to_address: Option<Value>,
    /// Second payload argument (the amount for transfers).
    pub price: Option<Value>,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: Option<String>,
    pub vm_status: Option<String>,
}

impl From<&Transaction> for TransactionSummary {
    fn from(txn: &Transaction) -> Self {
        let arg = |i: usize| {
            txn.payload
                .as_ref()
                .and_then(|p| p.get("arguments"))
                .and_then(|a| a.get(i))
                .cloned()
        };
        Self {
            data: txn.payload.clone(),
            from: txn.sender.clone(),
            gas: txn.gas_used.clone(),
            gas_price: txn.gas_unit_price.clone(),
            hash: txn.hash.clone(),
            success: txn.success,
            timestamp: txn.timestamp.clone(),
            to_address: arg(0),
            price: arg(1),
            kind: txn.kind.clone(),
            version: txn.version.clone(),
            vm_status: txn.vm_status.clone(),
        }
    }
}

/// Order events newest first by ledger version. Events without a version sort last.
pub fn sort_newest_first(events: &mut [Event]) {
    events.sort_by(|a, b| b.version_number().cmp(&a.version_number()));
}
