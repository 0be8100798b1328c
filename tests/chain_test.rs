// Chain tests - Transaction atomicity and native-currency conservation

use fundme::account::{Accounts, Address};
use fundme::chain::{ChainError, LocalChain};
use fundme::ledger::FundMeError;
use fundme::oracle::{DEFAULT_ANSWER, DEFAULT_DECIMALS, MockPriceFeed, WEI_PER_UNIT};

fn deployed() -> (LocalChain, Accounts) {
    let accounts = Accounts::development(6);
    let deployer = accounts.deployer();
    let mut chain = LocalChain::new(31337).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);
    let feed = chain.deploy_price_feed(deployer, DEFAULT_DECIMALS, DEFAULT_ANSWER);
    chain.deploy_fund_me(deployer, feed, 50).unwrap();
    (chain, accounts)
}

#[test]
fn test_operations_require_a_deployed_contract() {
    let mut chain = LocalChain::new(31337);
    let someone = Address::from_seed("someone");
    chain.fund_account(someone, WEI_PER_UNIT);

    assert!(matches!(
        chain.fund(someone, WEI_PER_UNIT),
        Err(ChainError::NotDeployed)
    ));
    assert!(matches!(chain.withdraw(someone), Err(ChainError::NotDeployed)));
    assert!(matches!(
        chain.cheaper_withdraw(someone),
        Err(ChainError::NotDeployed)
    ));
    assert!(chain.contract().is_err());
}

#[test]
fn test_unknown_sender_is_rejected() {
    let (mut chain, _) = deployed();
    let stranger = Address::from_seed("stranger");

    assert!(matches!(
        chain.fund(stranger, WEI_PER_UNIT),
        Err(ChainError::UnknownAccount(_))
    ));
}

#[test]
fn test_insufficient_funds_leave_state_untouched() {
    let (mut chain, accounts) = deployed();
    let supply = chain.total_supply();

    let err = chain.fund(accounts.user(0), 1_000 * WEI_PER_UNIT).unwrap_err();

    assert!(matches!(err, ChainError::InsufficientFunds { .. }));
    assert_eq!(chain.balance_of(accounts.user(0)), 100 * WEI_PER_UNIT);
    assert_eq!(chain.total_supply(), supply);
}

#[test]
fn test_rejected_contribution_is_fully_reverted() {
    let (mut chain, accounts) = deployed();
    let supply = chain.total_supply();

    // below the USD minimum: the ledger rejects, the chain refunds
    let err = chain.fund(accounts.user(0), WEI_PER_UNIT / 10_000).unwrap_err();

    assert!(matches!(
        err,
        ChainError::Contract(FundMeError::InsufficientContribution { .. })
    ));
    assert_eq!(chain.balance_of(accounts.user(0)), 100 * WEI_PER_UNIT);
    assert_eq!(chain.contract().unwrap().balance(), 0);
    assert_eq!(chain.contract().unwrap().funder_count(), 0);
    assert_eq!(chain.total_supply(), supply);
}

#[test]
fn test_failed_payout_rolls_back_the_reset() {
    let (mut chain, accounts) = deployed();
    for i in 0..3 {
        chain.fund(accounts.user(i), WEI_PER_UNIT).unwrap();
    }
    chain.set_rejecting(accounts.deployer(), true);
    let supply = chain.total_supply();

    for attempt in [
        chain.withdraw(accounts.deployer()),
        chain.cheaper_withdraw(accounts.deployer()),
    ] {
        assert!(matches!(
            attempt,
            Err(ChainError::Contract(FundMeError::TransferFailed { .. }))
        ));
    }

    // no partial reset observable
    let contract = chain.contract().unwrap();
    assert_eq!(contract.balance(), 3 * WEI_PER_UNIT);
    assert_eq!(contract.funder_count(), 3);
    for i in 0..3 {
        assert_eq!(
            contract.address_to_amount_funded(accounts.user(i)),
            WEI_PER_UNIT
        );
    }
    assert_eq!(chain.total_supply(), supply);
}

#[test]
fn test_supply_is_conserved_across_a_full_cycle() {
    let (mut chain, accounts) = deployed();
    let supply = chain.total_supply();

    for i in 0..5 {
        chain.fund(accounts.user(i), WEI_PER_UNIT).unwrap();
        assert_eq!(chain.total_supply(), supply);
    }
    chain.withdraw(accounts.deployer()).unwrap();
    assert_eq!(chain.total_supply(), supply);
}

#[test]
fn test_registered_feed_backs_a_public_network_simulation() {
    let accounts = Accounts::development(2);
    let deployer = accounts.deployer();
    let mut chain = LocalChain::new(11_155_111).with_accounts(accounts.all(), 100 * WEI_PER_UNIT);

    let live_feed = Address::from_seed("sepolia-feed");
    chain.register_price_feed(live_feed, MockPriceFeed::default());
    chain.deploy_fund_me(deployer, live_feed, 50).unwrap();

    chain.fund(accounts.user(0), WEI_PER_UNIT).unwrap();
    assert_eq!(chain.contract().unwrap().balance(), WEI_PER_UNIT);
}

#[test]
fn test_setting_answer_on_unknown_feed_fails() {
    let (mut chain, _) = deployed();
    let bogus = Address::from_seed("bogus-feed");

    assert!(matches!(
        chain.set_feed_answer(bogus, 1),
        Err(ChainError::UnknownPriceFeed(_))
    ));
}
