// LocalChain - In-process serialized execution environment
//
// Plays the role a development node plays for the real harness: it
// holds native account balances, hosts at most one FundMe contract
// plus any deployed mock price feeds, and executes each transaction
// to completion with all-or-nothing semantics.

use crate::account::Address;
use crate::ledger::{FundMe, FundMeError, TransferError, TransferSink};
use crate::oracle::MockPriceFeed;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the chain itself, distinct from contract errors
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Unknown account: {0}")]
    UnknownAccount(Address),

    #[error("Insufficient funds: account {account} holds {available}, needs {required}")]
    InsufficientFunds {
        account: Address,
        available: u128,
        required: u128,
    },

    #[error("No contract deployed on this chain")]
    NotDeployed,

    #[error("A contract is already deployed on this chain")]
    AlreadyDeployed,

    #[error("No price feed registered at {0}")]
    UnknownPriceFeed(Address),

    #[error(transparent)]
    Contract(#[from] FundMeError),
}

/// A deployed contract and the address it lives at
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Deployed {
    address: Address,
    contract: FundMe,
}

/// Routes contract payouts into the chain's account table.
/// Recipients in the rejecting set refuse the transfer, which is how
/// tests exercise the failed-payout path.
struct AccountSink<'a> {
    balances: &'a mut HashMap<Address, u128>,
    rejecting: &'a HashSet<Address>,
}

impl TransferSink for AccountSink<'_> {
    fn transfer(&mut self, to: Address, amount: u128) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            return Err(TransferError::Rejected(to));
        }
        match self.balances.get_mut(&to) {
            Some(balance) => {
                *balance += amount;
                Ok(())
            }
            None => Err(TransferError::UnknownRecipient(to)),
        }
    }
}

/// The simulated chain state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalChain {
    chain_id: u64,
    /// Native balance per externally-owned account
    balances: HashMap<Address, u128>,
    /// Accounts that refuse incoming transfers
    rejecting: HashSet<Address>,
    /// Deployed price feeds, by address
    feeds: HashMap<Address, MockPriceFeed>,
    /// The single hosted FundMe instance, once deployed
    contract: Option<Deployed>,
    /// Deployment counter, feeds contract-address derivation
    nonce: u64,
}

impl LocalChain {
    /// Create an empty chain with the given id
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            balances: HashMap::new(),
            rejecting: HashSet::new(),
            feeds: HashMap::new(),
            contract: None,
            nonce: 0,
        }
    }

    /// Seed every account in `accounts` with `initial_balance` (builder form)
    pub fn with_accounts(mut self, accounts: &[Address], initial_balance: u128) -> Self {
        for account in accounts {
            self.balances.insert(*account, initial_balance);
        }
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Create or top up an account
    pub fn fund_account(&mut self, account: Address, amount: u128) {
        *self.balances.entry(account).or_insert(0) += amount;
    }

    /// Native balance of an account (0 when unknown)
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Mark or unmark an account as refusing incoming transfers
    pub fn set_rejecting(&mut self, account: Address, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }

    /// Deploy a mock price feed, returning its address
    pub fn deploy_price_feed(
        &mut self,
        deployer: Address,
        decimals: u8,
        initial_answer: i128,
    ) -> Address {
        let address = self.next_contract_address(deployer);
        self.feeds
            .insert(address, MockPriceFeed::new(decimals, initial_answer));
        debug!(%address, decimals, initial_answer, "mock price feed deployed");
        address
    }

    /// Register an externally-supplied feed at a fixed address.
    /// Lets a chain stand in for a public network whose feed already exists.
    pub fn register_price_feed(&mut self, address: Address, feed: MockPriceFeed) {
        self.feeds.insert(address, feed);
    }

    /// Update the answer of a deployed feed
    pub fn set_feed_answer(&mut self, address: Address, answer: i128) -> Result<(), ChainError> {
        let feed = self
            .feeds
            .get_mut(&address)
            .ok_or(ChainError::UnknownPriceFeed(address))?;
        feed.set_answer(answer);
        Ok(())
    }

    /// Deploy FundMe with `deployer` as owner and `price_feed` as its
    /// sole constructor argument.
    pub fn deploy_fund_me(
        &mut self,
        deployer: Address,
        price_feed: Address,
        minimum_usd: u64,
    ) -> Result<Address, ChainError> {
        if self.contract.is_some() {
            return Err(ChainError::AlreadyDeployed);
        }
        if !self.feeds.contains_key(&price_feed) {
            return Err(ChainError::UnknownPriceFeed(price_feed));
        }

        let address = self.next_contract_address(deployer);
        let contract = FundMe::new(deployer, price_feed).with_minimum_usd(minimum_usd);
        self.contract = Some(Deployed { address, contract });

        info!(%address, %price_feed, owner = %deployer, "FundMe deployed");
        Ok(address)
    }

    /// Address of the hosted contract, if deployed
    pub fn contract_address(&self) -> Option<Address> {
        self.contract.as_ref().map(|d| d.address)
    }

    /// Read access to the hosted contract
    pub fn contract(&self) -> Result<&FundMe, ChainError> {
        self.contract
            .as_ref()
            .map(|d| &d.contract)
            .ok_or(ChainError::NotDeployed)
    }

    /// Execute a fund transaction from `sender`. The sender is debited
    /// only after the contract accepts; a rejected contribution leaves
    /// every balance untouched.
    pub fn fund(&mut self, sender: Address, amount: u128) -> Result<(), ChainError> {
        let available = *self
            .balances
            .get(&sender)
            .ok_or(ChainError::UnknownAccount(sender))?;
        if available < amount {
            return Err(ChainError::InsufficientFunds {
                account: sender,
                available,
                required: amount,
            });
        }

        let deployed = self.contract.as_mut().ok_or(ChainError::NotDeployed)?;
        let feed_address = deployed.contract.price_feed();
        let feed = self
            .feeds
            .get(&feed_address)
            .ok_or(ChainError::UnknownPriceFeed(feed_address))?;

        deployed.contract.fund(sender, amount, feed)?;

        if let Some(balance) = self.balances.get_mut(&sender) {
            *balance -= amount;
        }
        debug!(%sender, amount, "fund transaction committed");
        Ok(())
    }

    /// Execute an owner withdrawal, returning the amount drained
    pub fn withdraw(&mut self, caller: Address) -> Result<u128, ChainError> {
        let deployed = self.contract.as_mut().ok_or(ChainError::NotDeployed)?;
        let mut sink = AccountSink {
            balances: &mut self.balances,
            rejecting: &self.rejecting,
        };
        let amount = deployed.contract.withdraw(caller, &mut sink)?;
        debug!(%caller, amount, "withdraw committed");
        Ok(amount)
    }

    /// Execute the storage-lean withdrawal variant
    pub fn cheaper_withdraw(&mut self, caller: Address) -> Result<u128, ChainError> {
        let deployed = self.contract.as_mut().ok_or(ChainError::NotDeployed)?;
        let mut sink = AccountSink {
            balances: &mut self.balances,
            rejecting: &self.rejecting,
        };
        let amount = deployed.contract.cheaper_withdraw(caller, &mut sink)?;
        debug!(%caller, amount, "cheaper withdraw committed");
        Ok(amount)
    }

    /// Total native currency on the chain: accounts plus contract escrow.
    /// Constant across any transaction, successful or failed.
    pub fn total_supply(&self) -> u128 {
        let escrow = self
            .contract
            .as_ref()
            .map(|d| d.contract.balance())
            .unwrap_or(0);
        self.balances.values().sum::<u128>() + escrow
    }

    fn next_contract_address(&mut self, deployer: Address) -> Address {
        let address = Address::derive_contract(&deployer, self.nonce);
        self.nonce += 1;
        address
    }
}
