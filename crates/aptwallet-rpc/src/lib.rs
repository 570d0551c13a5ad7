//! aptwallet RPC client library.
//!
//! Provides async HTTP clients for a full node's REST API and for the test
//! network faucet.
//!
//! # Example
//!
//! ```ignore
//! use aptwallet_rpc::NodeRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let node = NodeRpc::new("https://fullnode.devnet.aptoslabs.com/v1").unwrap();
//!     let info = node.get_ledger_info().await.unwrap();
//!     println!("Ledger version: {}", info.ledger_version);
//! }
//! ```

pub mod error;
pub mod client;
pub mod types;
pub mod node;
pub mod faucet;

pub use client::{RestClient, RpcConfig};
pub use error::RpcError;
pub use faucet::FaucetClient;
pub use node::NodeRpc;
