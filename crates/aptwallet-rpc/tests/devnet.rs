//! Devnet integration tests for the REST client.
//!
//! Run with: cargo test -p aptwallet-rpc --test devnet -- --ignored
//!
//! Uses APTOS_NODE_URL / APTOS_FAUCET_URL when set, devnet otherwise.

use aptwallet_rpc::{FaucetClient, NodeRpc};
use aptwallet_types::constants::types;
use aptwallet_types::{AccountAddress, Network};

fn node() -> NodeRpc {
    let _ = env_logger::builder().is_test(true).try_init();
    let url = std::env::var("APTOS_NODE_URL")
        .unwrap_or_else(|_| Network::Devnet.node_url().to_string());
    NodeRpc::new(&url).expect("client")
}

fn faucet(node: NodeRpc) -> FaucetClient {
    let url = std::env::var("APTOS_FAUCET_URL")
        .ok()
        .or_else(|| Network::Devnet.faucet_url().map(str::to_string))
        .expect("faucet url");
    FaucetClient::new(&url, node).expect("faucet")
}

fn framework() -> AccountAddress {
    "0x1".parse().unwrap()
}

// ─── 1. Connectivity ────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn test_get_ledger_info() {
    let n = node();
    let info = n.get_ledger_info().await.expect("ledger info");
    assert!(info.ledger_version.parse::<u64>().unwrap() > 0);
    println!("chain_id={} version={}", info.chain_id, info.ledger_version);
}

#[tokio::test]
#[ignore]
async fn test_estimate_gas_price() {
    let n = node();
    let est = n.estimate_gas_price().await.expect("gas estimate");
    assert!(est.gas_estimate > 0);
}

// ─── 2. Accounts ────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn test_framework_account_resources() {
    let n = node();
    let resources = n.get_account_resources(&framework()).await.expect("resources");
    assert!(!resources.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_unknown_account_is_none() {
    let n = node();
    let addr: AccountAddress = "0xdeadbeef00000000000000000000000000000000000000000000000000000001"
        .parse()
        .unwrap();
    assert!(n.find_account(&addr).await.expect("request").is_none());
}

// ─── 3. Events ──────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn test_missing_event_stream_is_empty() {
    let n = node();
    let addr: AccountAddress = "0xdeadbeef00000000000000000000000000000000000000000000000000000002"
        .parse()
        .unwrap();
    let events = n
        .get_event_stream(&addr, types::TOKEN_STORE, types::DEPOSIT_EVENTS, Some(10), None)
        .await
        .expect("404 should map to empty");
    assert!(events.is_empty());
}

// ─── 4. Faucet ──────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn test_fund_fresh_account() {
    let n = node();
    let f = faucet(n.clone());
    let addr = AccountAddress::from_ed25519_public_key(&rand_key());
    let hashes = f.fund_account(&addr, 1_000).await.expect("fund");
    assert!(!hashes.is_empty());

    let account = n.get_account(&addr).await.expect("account exists");
    assert_eq!(account.sequence_number(), Some(0));

    let txn = n.get_transaction_by_hash(&hashes[0]).await.expect("by hash");
    let version: u64 = txn.version.as_deref().unwrap().parse().unwrap();
    let by_version = n.get_transaction_by_version(version).await.expect("by version");
    assert_eq!(by_version.hash, txn.hash);
}

fn rand_key() -> [u8; 32] {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&nanos.to_le_bytes());
    key
}
