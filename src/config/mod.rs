// Config module - Network table and harness configuration
//
// The network table mirrors the original deployment setup: development
// chains get a locally-deployed mock feed, public chains carry the
// address of a live aggregator.

use crate::account::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Chain id of the in-process development network
pub const HARDHAT_CHAIN_ID: u64 = 31337;

/// Chain id of the Sepolia test network
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// ETH/USD aggregator on Sepolia
const SEPOLIA_ETH_USD_FEED: &str = "0x694AA1769357215DE4FAC081bf1f309aDC325306";

/// Environment variable overriding the explorer API key
pub const ENV_EXPLORER_API_KEY: &str = "FUNDME_ETHERSCAN_API_KEY";

/// Environment variable overriding the selected network
pub const ENV_NETWORK: &str = "FUNDME_NETWORK";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown network: '{0}'")]
    UnknownNetwork(String),
}

/// Static per-network deployment parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    /// Live price-feed address; None on development chains
    pub price_feed: Option<Address>,
    pub block_confirmations: u32,
}

/// True for chains where the harness deploys its own mock feed
pub fn is_development(chain_id: u64) -> bool {
    chain_id == HARDHAT_CHAIN_ID
}

/// Built-in network table
pub fn builtin_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig {
            name: "hardhat".to_string(),
            chain_id: HARDHAT_CHAIN_ID,
            price_feed: None,
            block_confirmations: 1,
        },
        NetworkConfig {
            name: "localhost".to_string(),
            chain_id: HARDHAT_CHAIN_ID,
            price_feed: None,
            block_confirmations: 1,
        },
        NetworkConfig {
            name: "sepolia".to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            price_feed: Address::parse(SEPOLIA_ETH_USD_FEED).ok(),
            block_confirmations: 6,
        },
    ]
}

/// Look up a network by name
pub fn network_by_name(name: &str) -> Result<NetworkConfig, ConfigError> {
    builtin_networks()
        .into_iter()
        .find(|n| n.name == name)
        .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
}

/// Top-level harness configuration, loaded from TOML with environment
/// overrides on top.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Selected network name (see `builtin_networks`)
    pub network: String,
    /// Funding minimum in whole dollars
    pub minimum_usd: u64,
    /// Where the sled store lives
    pub data_dir: PathBuf,
    /// Block-explorer API credential; verification is skipped without it
    pub etherscan_api_key: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            network: "hardhat".to_string(),
            minimum_usd: 50,
            data_dir: PathBuf::from(".fundme"),
            etherscan_api_key: None,
        }
    }
}

impl HarnessConfig {
    /// Load from a TOML file if it exists, then apply environment
    /// overrides. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p)?;
                toml::from_str(&raw)?
            }
            _ => Self::default(),
        };

        if let Ok(network) = std::env::var(ENV_NETWORK) {
            config.network = network;
        }
        if let Ok(key) = std::env::var(ENV_EXPLORER_API_KEY) {
            if !key.is_empty() {
                config.etherscan_api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Resolve the selected network against the built-in table
    pub fn resolve_network(&self) -> Result<NetworkConfig, ConfigError> {
        network_by_name(&self.network)
    }
}
