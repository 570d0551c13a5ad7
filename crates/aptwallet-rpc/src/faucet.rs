//! Faucet client for test networks.

use crate::client::{RestClient, RpcConfig};
use crate::error::RpcError;
use crate::node::{NodeRpc, DEFAULT_WAIT_TIMEOUT};
use aptwallet_types::AccountAddress;
use log::info;
use std::time::Duration;

/// Mints test coins through a faucet and waits for them to land.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    client: RestClient,
    node: NodeRpc,
    wait_timeout: Duration,
}

impl FaucetClient {
    pub fn new(faucet_url: &str, node: NodeRpc) -> Result<Self, RpcError> {
        Self::with_config(
            RpcConfig {
                url: faucet_url.to_string(),
                ..Default::default()
            },
            node,
        )
    }

    pub fn with_config(config: RpcConfig, node: NodeRpc) -> Result<Self, RpcError> {
        Ok(Self {
            client: RestClient::with_config(config)?,
            node,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        })
    }

    /// How long `fund_account` waits for each mint transaction to commit.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    /// Fund `address` with `amount` octas, creating the account if needed.
    ///
    /// Returns the faucet's transaction hashes once they have all committed.
    pub async fn fund_account(
        &self,
        address: &AccountAddress,
        amount: u64,
    ) -> Result<Vec<String>, RpcError> {
        let query = [
            ("amount", amount.to_string()),
            ("address", address.to_string()),
        ];
        let hashes: Vec<String> = self.client.post_empty("/mint", &query).await?;
        for hash in &hashes {
            self.node.wait_for_transaction(hash, self.wait_timeout).await?;
        }
        info!("funded {} with {} octas", address.to_short_string(), amount);
        Ok(hashes)
    }
}
