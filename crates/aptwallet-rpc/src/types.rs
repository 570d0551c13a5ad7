//! Request and response types for the node REST API.
//!
//! u64 quantities are carried as decimal strings on the wire, matching the
//! node's JSON encoding.

use aptwallet_types::AccountAddress;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Response Types
// =============================================================================

/// `GET /` ledger information.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    pub epoch: String,
    pub ledger_version: String,
    #[serde(default)]
    pub oldest_ledger_version: String,
    #[serde(default)]
    pub ledger_timestamp: String,
    #[serde(default)]
    pub node_role: String,
    #[serde(default)]
    pub block_height: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `GET /accounts/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    pub sequence_number: String,
    pub authentication_key: String,
}

impl AccountData {
    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence_number.parse().ok()
    }
}

/// A Move resource stored under an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub data: Value,
}

/// A transaction as returned by the node (pending, user, genesis, ...).
///
/// Only the fields the wallet reads are typed; the rest is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_unit_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gas_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Transaction {
    pub const PENDING: &'static str = "pending_transaction";

    pub fn is_pending(&self) -> bool {
        self.kind == Self::PENDING
    }

    pub fn gas_used_number(&self) -> Option<u64> {
        self.gas_used.as_deref().and_then(|g| g.parse().ok())
    }
}

/// `GET /estimate_gas_price`.
#[derive(Debug, Clone, Deserialize)]
pub struct GasEstimate {
    pub gas_estimate: u64,
    #[serde(default)]
    pub deprioritized_gas_estimate: Option<u64>,
    #[serde(default)]
    pub prioritized_gas_estimate: Option<u64>,
}

// =============================================================================
// Request Types
// =============================================================================

/// Entry function call payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    /// Fully qualified function, e.g. `0x1::coin::transfer`.
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    pub const KIND: &'static str = "entry_function_payload";

    pub fn new(function: &str, type_arguments: Vec<String>, arguments: Vec<Value>) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        }
    }
}

/// Unsigned transaction in JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub sender: AccountAddress,
    pub sequence_number: String,
    pub max_gas_amount: String,
    pub gas_unit_price: String,
    pub expiration_timestamp_secs: String,
    pub payload: EntryFunctionPayload,
}

/// Signature attached to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSignature {
    #[serde(rename = "type")]
    pub kind: String,
    /// `0x`-prefixed hex.
    pub public_key: String,
    /// `0x`-prefixed hex.
    pub signature: String,
}

impl TransactionSignature {
    pub const ED25519: &'static str = "ed25519_signature";

    pub fn ed25519(public_key: &[u8], signature: &[u8]) -> Self {
        Self {
            kind: Self::ED25519.to_string(),
            public_key: format!("0x{}", hex::encode(public_key)),
            signature: format!("0x{}", hex::encode(signature)),
        }
    }
}

/// Body for `POST /transactions` and `POST /transactions/simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    #[serde(flatten)]
    pub request: TransactionRequest,
    pub signature: TransactionSignature,
}

/// Body for `POST /tables/{handle}/item`.
#[derive(Debug, Clone, Serialize)]
pub struct TableItemRequest {
    pub key_type: String,
    pub value_type: String,
    pub key: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_decode_user_txn() {
        let json = r#"{
            "type": "user_transaction",
            "version": "100",
            "hash": "0xabc",
            "sender": "0x1",
            "sequence_number": "4",
            "success": true,
            "vm_status": "Executed successfully",
            "gas_used": "9",
            "gas_unit_price": "100",
            "timestamp": "1666000000000000",
            "payload": {"function": "0x1::coin::transfer", "arguments": ["0x2", "10"]},
            "state_change_hash": "0xdef"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(!txn.is_pending());
        assert_eq!(txn.gas_used_number(), Some(9));
        assert_eq!(txn.success, Some(true));
        assert!(txn.extra.contains_key("state_change_hash"));
    }

    #[test]
    fn test_pending_transaction() {
        let txn: Transaction =
            serde_json::from_str(r#"{"type":"pending_transaction","hash":"0x1"}"#).unwrap();
        assert!(txn.is_pending());
        assert_eq!(txn.success, None);
    }

    #[test]
    fn test_submit_request_is_flat() {
        let req = SubmitTransactionRequest {
            request: TransactionRequest {
                sender: "0x1".parse().unwrap(),
                sequence_number: "0".to_string(),
                max_gas_amount: "50000".to_string(),
                gas_unit_price: "100".to_string(),
                expiration_timestamp_secs: "1700000000".to_string(),
                payload: EntryFunctionPayload::new(
                    "0x1::aptos_account::transfer",
                    vec![],
                    vec![Value::from("0x2"), Value::from("5")],
                ),
            },
            signature: TransactionSignature::ed25519(&[0xab; 32], &[0u8; 64]),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["sequence_number"], "0");
        assert_eq!(v["payload"]["type"], "entry_function_payload");
        assert_eq!(v["signature"]["type"], "ed25519_signature");
        assert_eq!(v["signature"]["public_key"], format!("0x{}", "ab".repeat(32)));
        assert!(v.get("request").is_none());
    }
}
