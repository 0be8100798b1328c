// Deploy tests - Per-network feed resolution and explorer verification

use fundme::account::Accounts;
use fundme::chain::LocalChain;
use fundme::config::{self, HarnessConfig, NetworkConfig, SEPOLIA_CHAIN_ID};
use fundme::deploy::{DeployError, MockExplorer, Orchestrator};
use fundme::oracle::{MockPriceFeed, WEI_PER_UNIT};

fn dev_config() -> HarnessConfig {
    HarnessConfig {
        network: "hardhat".to_string(),
        ..HarnessConfig::default()
    }
}

fn sepolia_config(api_key: Option<&str>) -> HarnessConfig {
    HarnessConfig {
        network: "sepolia".to_string(),
        etherscan_api_key: api_key.map(str::to_string),
        ..HarnessConfig::default()
    }
}

/// A chain standing in for Sepolia, with the live feed pre-registered
fn sepolia_chain(accounts: &Accounts) -> LocalChain {
    let mut chain =
        LocalChain::new(SEPOLIA_CHAIN_ID).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);
    let feed = config::network_by_name("sepolia").unwrap().price_feed.unwrap();
    chain.register_price_feed(feed, MockPriceFeed::default());
    chain
}

#[tokio::test]
async fn test_development_deploy_uses_a_mock_feed() {
    let accounts = Accounts::development(3);
    let mut chain = LocalChain::new(31337).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);

    let orchestrator = Orchestrator::new(dev_config()).unwrap();
    let explorer = MockExplorer::new();
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert_eq!(record.chain_id, 31337);
    assert_eq!(record.deployer, accounts.deployer());
    assert_eq!(chain.contract_address(), Some(record.contract));
    assert_eq!(chain.contract().unwrap().price_feed(), record.price_feed);

    // the deployed contract is immediately usable against the mock feed
    chain.fund(accounts.user(0), WEI_PER_UNIT).unwrap();
}

#[tokio::test]
async fn test_development_deploy_never_verifies() {
    let accounts = Accounts::development(2);
    let mut chain = LocalChain::new(31337).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);

    // even with a key present, development chains skip verification
    let mut config = dev_config();
    config.etherscan_api_key = Some("KEY".to_string());

    let orchestrator = Orchestrator::new(config).unwrap();
    let explorer = MockExplorer::new();
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert!(!record.verified);
    assert_eq!(explorer.call_count(), 0);
}

#[tokio::test]
async fn test_public_deploy_uses_the_configured_feed() {
    let accounts = Accounts::development(2);
    let mut chain = sepolia_chain(&accounts);
    let expected_feed = config::network_by_name("sepolia").unwrap().price_feed.unwrap();

    let orchestrator = Orchestrator::new(sepolia_config(None)).unwrap();
    let explorer = MockExplorer::new();
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert_eq!(record.price_feed, expected_feed);
    // no API key: verification never attempted
    assert!(!record.verified);
    assert_eq!(explorer.call_count(), 0);
}

#[tokio::test]
async fn test_public_deploy_verifies_with_api_key() {
    let accounts = Accounts::development(2);
    let mut chain = sepolia_chain(&accounts);

    let orchestrator = Orchestrator::new(sepolia_config(Some("KEY"))).unwrap();
    let explorer = MockExplorer::new();
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert!(record.verified);
    assert_eq!(explorer.call_count(), 1);
}

#[tokio::test]
async fn test_already_verified_counts_as_verified() {
    let accounts = Accounts::development(2);
    let mut chain = sepolia_chain(&accounts);

    let orchestrator = Orchestrator::new(sepolia_config(Some("KEY"))).unwrap();
    let explorer = MockExplorer::new().with_already_verified();
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert!(record.verified);
}

#[tokio::test]
async fn test_verification_failure_does_not_fail_the_deploy() {
    let accounts = Accounts::development(2);
    let mut chain = sepolia_chain(&accounts);

    let orchestrator = Orchestrator::new(sepolia_config(Some("KEY"))).unwrap();
    let explorer = MockExplorer::new().with_unreachable("connection refused");
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    // deployment stands, verification is merely recorded as missing
    assert!(!record.verified);
    assert_eq!(chain.contract_address(), Some(record.contract));
}

#[tokio::test]
async fn test_rejected_verification_is_also_non_fatal() {
    let accounts = Accounts::development(2);
    let mut chain = sepolia_chain(&accounts);

    let orchestrator = Orchestrator::new(sepolia_config(Some("KEY"))).unwrap();
    let explorer = MockExplorer::new().with_rejection("source mismatch");
    let record = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap();

    assert!(!record.verified);
    assert_eq!(explorer.call_count(), 1);
}

#[tokio::test]
async fn test_public_network_without_feed_config_fails() {
    let accounts = Accounts::development(2);
    let mut chain = LocalChain::new(999).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);

    let network = NetworkConfig {
        name: "barenet".to_string(),
        chain_id: 999,
        price_feed: None,
        block_confirmations: 1,
    };
    let orchestrator = Orchestrator::for_network(sepolia_config(None), network);
    let explorer = MockExplorer::new();

    let err = orchestrator
        .deploy(&mut chain, accounts.deployer(), &explorer)
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::MissingPriceFeed(_)));
    assert!(chain.contract_address().is_none());
}
