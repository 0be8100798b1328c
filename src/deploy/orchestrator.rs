// Orchestrator - Deploys FundMe with per-network feed resolution
//
// Development chains get a freshly deployed mock aggregator; public
// chains use the configured live feed address. Verification runs only
// on public chains when an API credential is present, and a failed
// verification never fails the deployment.

use crate::account::Address;
use crate::chain::{ChainError, LocalChain};
use crate::config::{self, ConfigError, HarnessConfig, NetworkConfig};
use crate::deploy::ExplorerApi;
use crate::oracle::{DEFAULT_ANSWER, DEFAULT_DECIMALS};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("No price feed configured for network '{0}'")]
    MissingPriceFeed(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything worth remembering about one deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract: Address,
    pub price_feed: Address,
    pub chain_id: u64,
    pub network: String,
    pub deployer: Address,
    /// Unix timestamp of the deployment
    pub deployed_at: i64,
    /// Whether explorer verification succeeded
    pub verified: bool,
}

/// Drives a single FundMe deployment end to end
pub struct Orchestrator {
    config: HarnessConfig,
    network: NetworkConfig,
}

impl Orchestrator {
    pub fn new(config: HarnessConfig) -> Result<Self, DeployError> {
        let network = config.resolve_network()?;
        Ok(Self { config, network })
    }

    /// Target a network outside the built-in table
    pub fn for_network(config: HarnessConfig, network: NetworkConfig) -> Self {
        Self { config, network }
    }

    /// The resolved target network
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Deploy FundMe on `chain` from `deployer`
    pub async fn deploy(
        &self,
        chain: &mut LocalChain,
        deployer: Address,
        explorer: &dyn ExplorerApi,
    ) -> Result<DeploymentRecord, DeployError> {
        let development = config::is_development(self.network.chain_id);

        let price_feed = if development {
            let address = chain.deploy_price_feed(deployer, DEFAULT_DECIMALS, DEFAULT_ANSWER);
            info!(%address, network = %self.network.name, "deployed mock price feed");
            address
        } else {
            self.network
                .price_feed
                .ok_or_else(|| DeployError::MissingPriceFeed(self.network.name.clone()))?
        };

        let contract = chain.deploy_fund_me(deployer, price_feed, self.config.minimum_usd)?;
        info!(
            %contract,
            %price_feed,
            network = %self.network.name,
            confirmations = self.network.block_confirmations,
            "FundMe deployed"
        );

        let mut verified = false;
        if !development && self.config.etherscan_api_key.is_some() {
            let args = vec![price_feed.to_string()];
            match explorer.verify_contract(contract, &args).await {
                Ok(outcome) => {
                    verified = true;
                    info!(?outcome, %contract, "contract verified");
                }
                Err(e) => {
                    // Verification is best-effort; the deployment stands
                    warn!(error = %e, %contract, "verification failed");
                }
            }
        }

        Ok(DeploymentRecord {
            contract,
            price_feed,
            chain_id: self.network.chain_id,
            network: self.network.name.clone(),
            deployer,
            deployed_at: Utc::now().timestamp(),
            verified,
        })
    }
}
