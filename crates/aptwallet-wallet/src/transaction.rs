//! Transaction generation, signing and simulation.
//!
//! The node encodes the signing message (`/transactions/encode_submission`);
//! only the ed25519 signature is computed locally.

use crate::account::Account;
use crate::config::GasConfig;
use crate::error::WalletError;
use aptwallet_rpc::types::{
    EntryFunctionPayload, SubmitTransactionRequest, Transaction, TransactionRequest,
    TransactionSignature,
};
use aptwallet_rpc::NodeRpc;
use aptwallet_types::AccountAddress;
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};

/// Assemble an unsigned request. `now_secs` is the current unix time.
pub fn build_request(
    sender: AccountAddress,
    sequence_number: u64,
    payload: EntryFunctionPayload,
    gas: &GasConfig,
    now_secs: u64,
) -> TransactionRequest {
    TransactionRequest {
        sender,
        sequence_number: sequence_number.to_string(),
        max_gas_amount: gas.max_gas_amount.to_string(),
        gas_unit_price: gas.gas_unit_price.to_string(),
        expiration_timestamp_secs: (now_secs + gas.expiration_secs).to_string(),
        payload,
    }
}

/// Seconds since the unix epoch at `now`. A clock set before 1970 is an error.
fn unix_secs(now: SystemTime) -> Result<u64, WalletError> {
    Ok(now.duration_since(UNIX_EPOCH)?.as_secs())
}

/// Build a request for `sender` using its current on-chain sequence number.
pub async fn generate_transaction(
    node: &NodeRpc,
    sender: &AccountAddress,
    payload: EntryFunctionPayload,
    gas: &GasConfig,
) -> Result<TransactionRequest, WalletError> {
    let account = node.get_account(sender).await?;
    let sequence_number = account.sequence_number().ok_or_else(|| {
        WalletError::UnexpectedResponse(format!(
            "sequence number {:?} is not a u64",
            account.sequence_number
        ))
    })?;
    debug!(
        "generating {} for {} at sequence {}",
        payload.function,
        sender.to_short_string(),
        sequence_number
    );
    let now = unix_secs(SystemTime::now())?;
    Ok(build_request(*sender, sequence_number, payload, gas, now))
}

/// Sign `request` with `account`.
pub async fn sign_transaction(
    node: &NodeRpc,
    account: &Account,
    request: TransactionRequest,
) -> Result<SubmitTransactionRequest, WalletError> {
    let message = node.encode_submission(&request).await?;
    let signature = account.sign(&message);
    Ok(SubmitTransactionRequest {
        request,
        signature: TransactionSignature::ed25519(&account.public_key(), &signature),
    })
}

/// Request carrying an all-zero signature, as the simulate endpoint expects.
pub fn simulation_request(account: &Account, request: TransactionRequest) -> SubmitTransactionRequest {
    SubmitTransactionRequest {
        request,
        signature: TransactionSignature::ed25519(&account.public_key(), &[0u8; 64]),
    }
}

/// Fail on a committed transaction whose execution was unsuccessful.
pub fn ensure_success(txn: Transaction) -> Result<Transaction, WalletError> {
    match txn.success {
        Some(false) => Err(WalletError::TransactionFailed {
            hash: txn.hash,
            vm_status: txn.vm_status.unwrap_or_default(),
        }),
        _ => Ok(txn),
    }
}
