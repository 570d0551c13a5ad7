//! Network presets, derivation constants, and on-chain type strings.

use serde::{Deserialize, Serialize};

// =============================================================================
// Network Types
// =============================================================================

/// Network a wallet talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
}

impl Network {
    /// Default full-node REST endpoint (including the `/v1` prefix).
    pub fn node_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
            Network::Local => "http://127.0.0.1:8080/v1",
        }
    }

    /// Default faucet endpoint. Mainnet has none.
    pub fn faucet_url(self) -> Option<&'static str> {
        match self {
            Network::Mainnet => None,
            Network::Testnet => Some("https://faucet.testnet.aptoslabs.com"),
            Network::Devnet => Some("https://faucet.devnet.aptoslabs.com"),
            Network::Local => Some("http://127.0.0.1:8081"),
        }
    }

    /// Parse a network name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            "devnet" => Some(Network::Devnet),
            "local" | "localnet" => Some(Network::Local),
            _ => None,
        }
    }
}

// =============================================================================
// Key Derivation
// =============================================================================

/// SLIP-0044 coin type registered for Aptos.
pub const COIN_TYPE: u32 = 637;

/// Accounts probed when looking for an unused derivation index.
pub const MAX_ACCOUNTS: u32 = 5;

/// Signature scheme byte appended to a public key before hashing it into an
/// authentication key.
pub const ED25519_SCHEME: u8 = 0x00;

// =============================================================================
// Transactions
// =============================================================================

/// Default gas limit per transaction.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 50_000;

/// Default gas unit price (octas).
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100;

/// Seconds a generated transaction stays valid.
pub const DEFAULT_TXN_EXPIRATION_SECS: u64 = 20;

/// Octas requested from the faucet by an airdrop.
pub const AIRDROP_AMOUNT: u64 = 100_000_000;

/// Collection/token maximum meaning "unlimited".
pub const MAX_U64: u64 = u64::MAX;

// =============================================================================
// On-chain Type Strings
// =============================================================================

pub mod types {
    pub const COIN_STORE: &str = "0x1::coin::CoinStore";
    pub const COIN_INFO: &str = "0x1::coin::CoinInfo";
    pub const APTOS_COIN: &str = "0x1::aptos_coin::AptosCoin";
    pub const TOKEN_STORE: &str = "0x3::token::TokenStore";
    pub const TOKEN_COLLECTIONS: &str = "0x3::token::Collections";
    pub const TOKEN_DATA_ID: &str = "0x3::token::TokenDataId";
    pub const TOKEN_DATA: &str = "0x3::token::TokenData";

    pub const DEPOSIT_EVENTS: &str = "deposit_events";
    pub const WITHDRAW_EVENTS: &str = "withdraw_events";

    /// Type string of the coin store holding `coin_type`.
    pub fn coin_store(coin_type: &str) -> String {
        format!("{}<{}>", COIN_STORE, coin_type)
    }

    /// Type string of the coin info resource for `coin_type`.
    pub fn coin_info(coin_type: &str) -> String {
        format!("{}<{}>", COIN_INFO, coin_type)
    }
}

/// Entry functions invoked by the wallet.
pub mod functions {
    pub const APTOS_ACCOUNT_TRANSFER: &str = "0x1::aptos_account::transfer";
    pub const COIN_TRANSFER: &str = "0x1::coin::transfer";
    pub const MANAGED_COIN_REGISTER: &str = "0x1::managed_coin::register";
    pub const CREATE_COLLECTION: &str = "0x3::token::create_collection_script";
    pub const CREATE_TOKEN: &str = "0x3::token::create_token_script";
    pub const OFFER_TOKEN: &str = "0x3::token_transfers::offer_script";
    pub const CLAIM_TOKEN: &str = "0x3::token_transfers::claim_script";
    pub const OPT_IN_DIRECT_TRANSFER: &str = "0x3::token::opt_in_direct_transfer";
    pub const TRANSFER_WITH_OPT_IN: &str = "0x3::token::transfer_with_opt_in";
}
