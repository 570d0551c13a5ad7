//! High-level wallet client.
//!
//! Ties together key derivation, the node and faucet clients, transaction
//! signing, and token event reconciliation into a single API.

use crate::account::Account;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keys;
use crate::payload::{self, NewToken};
use crate::query::{self, CoinBalance, CoinInfo, TransactionSummary};
use crate::reconcile::{self, ReconciliationResult};
use crate::transaction;
use aptwallet_rpc::types::{
    EntryFunctionPayload, SubmitTransactionRequest, TableItemRequest, Transaction,
    TransactionRequest,
};
use aptwallet_rpc::{FaucetClient, NodeRpc, RpcError};
use aptwallet_types::constants::{types, AIRDROP_AMOUNT, MAX_ACCOUNTS};
use aptwallet_types::{AccountAddress, Event, Network, TokenId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A freshly created account and the phrase that recovers it.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account: Account,
    pub mnemonic: String,
}

/// Token definition looked up from the creator's collections table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    #[serde(default)]
    pub collection: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub supply: String,
    #[serde(default)]
    pub maximum: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Wallet operations against one network.
#[derive(Debug, Clone)]
pub struct WalletClient {
    node: NodeRpc,
    faucet: Option<FaucetClient>,
    config: WalletConfig,
}

impl WalletClient {
    /// Client for `node_url`, with an optional faucet.
    pub fn new(node_url: &str, faucet_url: Option<&str>) -> Result<Self, WalletError> {
        Self::with_config(WalletConfig::new(node_url, faucet_url))
    }

    pub fn for_network(network: Network) -> Result<Self, WalletError> {
        Self::with_config(WalletConfig::for_network(network))
    }

    pub fn with_config(config: WalletConfig) -> Result<Self, WalletError> {
        let node = NodeRpc::with_config(config.node.clone())?;
        let faucet = match &config.faucet_url {
            Some(url) => Some(
                FaucetClient::new(url, node.clone())?.with_wait_timeout(config.wait_timeout),
            ),
            None => None,
        };
        Ok(Self {
            node,
            faucet,
            config,
        })
    }

    pub fn node(&self) -> &NodeRpc {
        &self.node
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    fn faucet(&self) -> Result<&FaucetClient, WalletError> {
        self.faucet.as_ref().ok_or(WalletError::Rpc(RpcError::NoFaucet))
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    /// New mnemonic and the account at derivation index 0. No network access.
    pub fn create_new_account(&self) -> Result<NewAccount, WalletError> {
        let mnemonic = keys::generate_mnemonic()?;
        let account = Account::from_mnemonic(&mnemonic, 0)?;
        Ok(NewAccount { account, mnemonic })
    }

    /// Account at derivation `index` of a validated mnemonic.
    pub fn get_account_from_mnemonic(
        &self,
        mnemonic: &str,
        index: u32,
    ) -> Result<Account, WalletError> {
        if !keys::validate_mnemonic(mnemonic) {
            return Err(WalletError::InvalidMnemonic("Invalid Seed Phrase".to_string()));
        }
        Account::from_mnemonic(mnemonic, index)
    }

    /// First of the leading derivation indices with no on-chain account.
    ///
    /// The account is created through the faucet (funded with 0).
    pub async fn find_unused_account(&self, mnemonic: &str) -> Result<Account, WalletError> {
        for index in 0..MAX_ACCOUNTS {
            let account = self.get_account_from_mnemonic(mnemonic, index)?;
            if self.node.find_account(&account.address()).await?.is_none() {
                self.faucet()?.fund_account(&account.address(), 0).await?;
                info!(
                    "created account {} at index {}",
                    account.address().to_short_string(),
                    index
                );
                return Ok(account);
            }
        }
        Err(WalletError::MaxAccountsReached(MAX_ACCOUNTS))
    }

    /// Fund `address` from the faucet; returns the faucet transaction hashes.
    pub async fn airdrop(&self, address: &AccountAddress) -> Result<Vec<String>, WalletError> {
        Ok(self.faucet()?.fund_account(address, AIRDROP_AMOUNT).await?)
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// Every coin store of `address` with its balance.
    pub async fn balance(&self, address: &AccountAddress) -> Result<Vec<CoinBalance>, WalletError> {
        let resources = self.node.get_account_resources(address).await?;
        Ok(query::coin_balances(&resources))
    }

    /// Metadata of `coin_type` from its publisher's `CoinInfo` resource.
    pub async fn get_coin_info(&self, coin_type: &str) -> Result<CoinInfo, WalletError> {
        let publisher = query::coin_publisher(coin_type)?;
        let resource = self
            .node
            .get_account_resource(&publisher, &types::coin_info(coin_type))
            .await?;
        Ok(serde_json::from_value(resource.data)?)
    }

    /// Whether `address` has a coin store for `coin`.
    pub async fn verify_resource(
        &self,
        address: &AccountAddress,
        coin: &str,
    ) -> Result<bool, WalletError> {
        let resources = self.node.get_account_resources(address).await?;
        Ok(query::is_registered(&resources, coin))
    }

    /// Transfer native coins; returns the committed transaction hash.
    pub async fn aptos_transfer(
        &self,
        account: &Account,
        recipient: &AccountAddress,
        amount: u64,
    ) -> Result<String, WalletError> {
        reject_self_transfer(account, recipient)?;
        self.execute(account, payload::aptos_transfer(recipient, amount))
            .await
    }

    /// Transfer `amount` of `coin_type`; returns the committed transaction hash.
    pub async fn transfer(
        &self,
        account: &Account,
        coin_type: &str,
        recipient: &AccountAddress,
        amount: u64,
    ) -> Result<String, WalletError> {
        reject_self_transfer(account, recipient)?;
        self.execute(account, payload::coin_transfer(coin_type, recipient, amount))
            .await
    }

    /// Gas a coin transfer would use, from a simulation.
    pub async fn estimate_gas_usage(
        &self,
        account: &Account,
        coin_type: &str,
        recipient: &AccountAddress,
        amount: u64,
    ) -> Result<u64, WalletError> {
        reject_self_transfer(account, recipient)?;
        let request = self
            .generate_transaction(
                &account.address(),
                payload::coin_transfer(coin_type, recipient, amount),
            )
            .await?;
        let simulated = self
            .node
            .simulate_transaction(&transaction::simulation_request(account, request))
            .await?;
        simulated
            .first()
            .and_then(Transaction::gas_used_number)
            .ok_or_else(|| WalletError::UnexpectedResponse("simulation returned no gas_used".to_string()))
    }

    pub async fn register_coin(
        &self,
        account: &Account,
        coin_type: &str,
    ) -> Result<String, WalletError> {
        self.execute(account, payload::register_coin(coin_type)).await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    /// Unsigned request for `sender` with the configured gas settings.
    pub async fn generate_transaction(
        &self,
        sender: &AccountAddress,
        payload: EntryFunctionPayload,
    ) -> Result<TransactionRequest, WalletError> {
        transaction::generate_transaction(&self.node, sender, payload, &self.config.gas).await
    }

    pub async fn sign_transaction(
        &self,
        account: &Account,
        request: TransactionRequest,
    ) -> Result<SubmitTransactionRequest, WalletError> {
        transaction::sign_transaction(&self.node, account, request).await
    }

    /// Submit a signed transaction; returns the pending transaction.
    pub async fn submit_transaction(
        &self,
        signed: &SubmitTransactionRequest,
    ) -> Result<Transaction, WalletError> {
        Ok(self.node.submit_transaction(signed).await?)
    }

    /// Generate, sign, submit and wait for `payload` sent by `account`.
    pub async fn sign_and_submit_transaction(
        &self,
        account: &Account,
        payload: EntryFunctionPayload,
    ) -> Result<String, WalletError> {
        self.execute(account, payload).await
    }

    /// Run payloads one after another. Stops at the first failure.
    pub async fn sign_and_submit_transactions(
        &self,
        account: &Account,
        payloads: Vec<EntryFunctionPayload>,
    ) -> Result<Vec<String>, WalletError> {
        let mut hashes = Vec::with_capacity(payloads.len());
        for payload in payloads {
            hashes.push(self.execute(account, payload).await?);
        }
        Ok(hashes)
    }

    pub fn sign_message(&self, account: &Account, message: &str) -> String {
        account.sign_message(message)
    }

    /// Wait for `hash` to commit and return it.
    pub async fn wait_for_txn_result(&self, hash: &str) -> Result<Transaction, WalletError> {
        Ok(self
            .node
            .wait_for_transaction(hash, self.config.wait_timeout)
            .await?)
    }

    pub async fn account_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransactionSummary>, WalletError> {
        let txns = self
            .node
            .get_account_transactions(address, None, None)
            .await?;
        Ok(txns.iter().map(TransactionSummary::from).collect())
    }

    pub async fn get_transaction_details_by_version(
        &self,
        version: u64,
    ) -> Result<Transaction, WalletError> {
        Ok(self.node.get_transaction_by_version(version).await?)
    }

    pub async fn get_transaction_details_by_hash(
        &self,
        hash: &str,
    ) -> Result<Transaction, WalletError> {
        Ok(self.node.get_transaction_by_hash(hash).await?)
    }

    async fn execute(
        &self,
        account: &Account,
        payload: EntryFunctionPayload,
    ) -> Result<String, WalletError> {
        let request = self.generate_transaction(&account.address(), payload).await?;
        let signed = self.sign_transaction(account, request).await?;
        let pending = self.node.submit_transaction(&signed).await?;
        let committed = self.wait_for_txn_result(&pending.hash).await?;
        Ok(transaction::ensure_success(committed)?.hash)
    }

    // ── Events ───────────────────────────────────────────────────────────

    pub async fn get_events(
        &self,
        address: &AccountAddress,
        event_handle: &str,
        field_name: &str,
    ) -> Result<Vec<Event>, WalletError> {
        Ok(self
            .node
            .get_events_by_event_handle(address, event_handle, field_name)
            .await?)
    }

    /// Paged event log; a stream that does not exist yet is empty.
    pub async fn get_event_stream(
        &self,
        address: &AccountAddress,
        event_handle: &str,
        field_name: &str,
        limit: Option<u64>,
        start: Option<u64>,
    ) -> Result<Vec<Event>, WalletError> {
        Ok(self
            .node
            .get_event_stream(address, event_handle, field_name, limit, start)
            .await?)
    }

    /// Deposit and withdraw events of every coin store, newest first.
    pub async fn get_all_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<Event>, WalletError> {
        let resources = self.node.get_account_resources(address).await?;
        let mut events = Vec::new();
        for coin_store in query::coin_store_types(&resources) {
            let (withdrawals, deposits) = tokio::try_join!(
                self.node.get_all_events(address, &coin_store, types::WITHDRAW_EVENTS),
                self.node.get_all_events(address, &coin_store, types::DEPOSIT_EVENTS),
            )?;
            events.extend(withdrawals);
            events.extend(deposits);
        }
        query::sort_newest_first(&mut events);
        Ok(events)
    }

    // ── Tokens ───────────────────────────────────────────────────────────

    /// Create a collection; `maximum` of `u64::MAX` means unlimited.
    pub async fn create_collection(
        &self,
        account: &Account,
        name: &str,
        description: &str,
        uri: &str,
        maximum: u64,
    ) -> Result<String, WalletError> {
        self.execute(account, payload::create_collection(name, description, uri, maximum))
            .await
    }

    pub async fn create_token(&self, account: &Account, token: &NewToken) -> Result<String, WalletError> {
        self.execute(account, payload::create_token(token)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn offer_token(
        &self,
        account: &Account,
        receiver: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
        amount: u64,
        property_version: u64,
    ) -> Result<String, WalletError> {
        self.execute(
            account,
            payload::offer_token(receiver, creator, collection, name, property_version, amount),
        )
        .await
    }

    pub async fn claim_token(
        &self,
        account: &Account,
        sender: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
        property_version: u64,
    ) -> Result<String, WalletError> {
        self.execute(
            account,
            payload::claim_token(sender, creator, collection, name, property_version),
        )
        .await
    }

    pub async fn opt_in_direct_transfer(
        &self,
        account: &Account,
        opt_in: bool,
    ) -> Result<String, WalletError> {
        self.execute(account, payload::opt_in_direct_transfer(opt_in))
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn transfer_with_opt_in(
        &self,
        sender: &Account,
        receiver: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
        amount: u64,
        property_version: u64,
    ) -> Result<String, WalletError> {
        self.execute(
            sender,
            payload::transfer_with_opt_in(creator, collection, name, property_version, receiver, amount),
        )
        .await
    }

    /// Tokens the account has held, with net counts from its token store events.
    ///
    /// Both logs are read in full (paged) and fetched concurrently. If either
    /// fetch fails nothing is reconciled and the error is returned.
    pub async fn get_token_ids(
        &self,
        address: &AccountAddress,
    ) -> Result<ReconciliationResult, WalletError> {
        let (deposits, withdrawals) = tokio::try_join!(
            self.node.get_all_events(address, types::TOKEN_STORE, types::DEPOSIT_EVENTS),
            self.node.get_all_events(address, types::TOKEN_STORE, types::WITHDRAW_EVENTS),
        )?;
        debug!(
            "{}: {} deposit / {} withdraw token events",
            address.to_short_string(),
            deposits.len(),
            withdrawals.len()
        );
        Ok(reconcile::reconcile(&deposits, &withdrawals)?)
    }

    /// Token definition for `token_id`.
    ///
    /// `resource_handle` is the creator's token data table handle; when absent
    /// it is read from the creator's `Collections` resource.
    pub async fn get_token_details(
        &self,
        token_id: &TokenId,
        resource_handle: Option<&str>,
    ) -> Result<TokenData, WalletError> {
        let handle = match resource_handle {
            Some(h) => h.to_string(),
            None => self.token_data_handle(&token_id.token_data_id.creator).await?,
        };
        let request = TableItemRequest {
            key_type: types::TOKEN_DATA_ID.to_string(),
            value_type: types::TOKEN_DATA.to_string(),
            key: serde_json::to_value(&token_id.token_data_id)?,
        };
        let value = self.node.get_table_item(&handle, &request).await?;
        let mut token: TokenData = serde_json::from_value(value)?;
        token.collection = token_id.token_data_id.collection.clone();
        Ok(token)
    }

    async fn token_data_handle(&self, creator: &str) -> Result<String, WalletError> {
        let creator: AccountAddress = creator.parse()?;
        let resources = self.node.get_account_resources(&creator).await?;
        let collections = resources
            .iter()
            .find(|r| r.resource_type == types::TOKEN_COLLECTIONS)
            .ok_or_else(|| WalletError::ResourceNotFound {
                address: creator.to_short_string(),
                resource: types::TOKEN_COLLECTIONS.to_string(),
            })?;
        collections
            .data
            .pointer("/token_data/handle")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                WalletError::UnexpectedResponse(format!(
                    "{} has no token_data handle",
                    types::TOKEN_COLLECTIONS
                ))
            })
    }
}

fn reject_self_transfer(account: &Account, recipient: &AccountAddress) -> Result<(), WalletError> {
    if account.address() == *recipient {
        return Err(WalletError::SelfTransfer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn client() -> WalletClient {
        WalletClient::for_network(Network::Local).unwrap()
    }

    #[test]
    fn test_create_new_account_roundtrips_mnemonic() {
        let c = client();
        let created = c.create_new_account().unwrap();
        let restored = c.get_account_from_mnemonic(&created.mnemonic, 0).unwrap();
        assert_eq!(created.account.address(), restored.address());
    }

    #[test]
    fn test_invalid_mnemonic() {
        let err = client().get_account_from_mnemonic("one two three", 0).unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
    }

    #[test]
    fn test_reject_self_transfer() {
        let account = client().get_account_from_mnemonic(PHRASE, 0).unwrap();
        assert!(matches!(
            reject_self_transfer(&account, &account.address()),
            Err(WalletError::SelfTransfer)
        ));
        let other = client().get_account_from_mnemonic(PHRASE, 1).unwrap();
        assert!(reject_self_transfer(&account, &other.address()).is_ok());
    }

    #[tokio::test]
    async fn test_self_transfer_fails_before_network() {
        // Local node is not running; the check must short-circuit.
        let c = client();
        let account = c.get_account_from_mnemonic(PHRASE, 0).unwrap();
        let err = c
            .transfer(&account, types::APTOS_COIN, &account.address(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::SelfTransfer));
    }

    #[tokio::test]
    async fn test_airdrop_without_faucet() {
        let c = WalletClient::for_network(Network::Mainnet).unwrap();
        let err = c.airdrop(&AccountAddress::ZERO).await.unwrap_err();
        assert!(matches!(err, WalletError::Rpc(RpcError::NoFaucet)));
    }

    #[test]
    fn test_faucet_uses_configured_wait_timeout() {
        let mut config = WalletConfig::for_network(Network::Local);
        config.wait_timeout = std::time::Duration::from_secs(45);
        let c = WalletClient::with_config(config).unwrap();
        assert_eq!(
            c.faucet().unwrap().wait_timeout(),
            std::time::Duration::from_secs(45)
        );
    }

    #[test]
    fn test_sign_message_matches_account() {
        let c = client();
        let account = c.get_account_from_mnemonic(PHRASE, 0).unwrap();
        assert_eq!(c.sign_message(&account, "hi"), account.sign_message("hi"));
    }

    #[test]
    fn test_token_data_decode() {
        let token: TokenData = serde_json::from_value(serde_json::json!({
            "name": "Dog",
            "description": "good dog",
            "uri": "https://dog",
            "supply": "1",
            "maximum": "18446744073709551615",
            "largest_property_version": "0"
        }))
        .unwrap();
        assert_eq!(token.collection, "");
        assert!(token.extra.contains_key("largest_property_version"));
    }
}
