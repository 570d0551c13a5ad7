//! Wallet error types.

use crate::reconcile::ReconcileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] aptwallet_types::AddressError),

    #[error("cannot transfer coins to self")]
    SelfTransfer,

    #[error("no unused account among the first {0} derivation indices")]
    MaxAccountsReached(u32),

    #[error("resource {resource} not found under {address}")]
    ResourceNotFound { address: String, resource: String },

    #[error("transaction {hash} failed: {vm_status}")]
    TransactionFailed { hash: String, vm_status: String },

    #[error("system clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),

    #[error("unexpected node response: {0}")]
    UnexpectedResponse(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] aptwallet_rpc::RpcError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
