//! aptwallet wallet core.
//!
//! Mnemonic-based accounts, transaction signing, coin transfers, token (NFT)
//! operations and token ownership reconciliation from event history.
//!
//! # Example
//!
//! ```ignore
//! use aptwallet_wallet::WalletClient;
//! use aptwallet_types::Network;
//!
//! #[tokio::main]
//! async fn main() {
//!     let wallet = WalletClient::for_network(Network::Devnet).unwrap();
//!     let created = wallet.create_new_account().unwrap();
//!     wallet.airdrop(&created.account.address()).await.unwrap();
//!     for coin in wallet.balance(&created.account.address()).await.unwrap() {
//!         println!("{}: {:?}", coin.coin, coin.value);
//!     }
//! }
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod keys;
pub mod payload;
pub mod query;
pub mod reconcile;
pub mod transaction;
pub mod wallet;

pub use account::Account;
pub use config::{GasConfig, WalletConfig};
pub use error::WalletError;
pub use payload::NewToken;
pub use query::{CoinBalance, CoinInfo, TransactionSummary};
pub use reconcile::{reconcile, LogSide, ReconcileError, ReconciliationResult, TokenOwnership};
pub use wallet::{NewAccount, TokenData, WalletClient};
