//! Client configuration.

use aptwallet_rpc::node::DEFAULT_WAIT_TIMEOUT;
use aptwallet_rpc::RpcConfig;
use aptwallet_types::constants::{
    DEFAULT_GAS_UNIT_PRICE, DEFAULT_MAX_GAS_AMOUNT, DEFAULT_TXN_EXPIRATION_SECS,
};
use aptwallet_types::Network;
use std::time::Duration;

/// Gas and expiry applied to every generated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasConfig {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Seconds from generation until the transaction expires.
    pub expiration_secs: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            expiration_secs: DEFAULT_TXN_EXPIRATION_SECS,
        }
    }
}

/// Everything a [`WalletClient`](crate::WalletClient) needs to reach a network.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub node: RpcConfig,
    /// Faucet endpoint; airdrops fail without one.
    pub faucet_url: Option<String>,
    pub gas: GasConfig,
    /// How long to wait for a submitted transaction to commit.
    pub wait_timeout: Duration,
}

impl WalletConfig {
    pub fn new(node_url: &str, faucet_url: Option<&str>) -> Self {
        Self {
            node: RpcConfig {
                url: node_url.to_string(),
                ..Default::default()
            },
            faucet_url: faucet_url.map(str::to_string),
            gas: GasConfig::default(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.node_url(), network.faucet_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_defaults() {
        let gas = GasConfig::default();
        assert_eq!(gas.max_gas_amount, 50_000);
        assert_eq!(gas.gas_unit_price, 100);
        assert_eq!(gas.expiration_secs, 20);
    }

    #[test]
    fn test_for_network() {
        let cfg = WalletConfig::for_network(Network::Devnet);
        assert_eq!(cfg.node.url, "https://fullnode.devnet.aptoslabs.com/v1");
        assert_eq!(cfg.faucet_url.as_deref(), Some("https://faucet.devnet.aptoslabs.com"));
        assert!(WalletConfig::for_network(Network::Mainnet).faucet_url.is_none());
    }
}
