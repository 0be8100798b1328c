// FundMe - USD-gated funding ledger with owner-only withdrawal
//
// One serialized state machine: contributions above a USD minimum are
// escrowed and recorded per sender; the owner drains the whole balance,
// resetting every record. Every operation either fully commits or
// leaves no trace.

use crate::account::Address;
use crate::oracle::{self, PriceFeed};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default funding minimum, in whole dollars
pub const DEFAULT_MINIMUM_USD: u64 = 50;

/// Errors raised by the contract. Closed set: tests branch on the
/// exact variant, never on message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FundMeError {
    #[error("Contribution too small: {sent_usd} USD units sent, minimum is {minimum_usd}")]
    InsufficientContribution { sent_usd: u128, minimum_usd: u128 },

    #[error("Caller is not the owner")]
    NotOwner,

    #[error("Funder index {index} out of range: registry holds {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Transfer of {amount} to the owner failed")]
    TransferFailed { amount: u128 },
}

/// Errors a transfer sink can raise
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Recipient {0} rejected the transfer")]
    Rejected(Address),

    #[error("Unknown recipient {0}")]
    UnknownRecipient(Address),
}

/// Destination for withdrawn funds. The chain (or a test double) owns
/// the actual balance movement; the contract only sees pass/fail.
pub trait TransferSink {
    fn transfer(&mut self, to: Address, amount: u128) -> Result<(), TransferError>;
}

/// The FundMe contract state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundMe {
    /// Set at construction, immutable afterwards
    owner: Address,
    /// Price feed the funding minimum is checked against, immutable
    price_feed: Address,
    /// Funding minimum in whole dollars
    minimum_usd: u64,
    /// Cumulative contribution per account
    funded: HashMap<Address, u128>,
    /// Accounts that funded since the last reset, in call order
    funders: Vec<Address>,
    /// Escrowed native balance; always equals the sum of `funded`
    balance: u128,
}

impl FundMe {
    /// Deploy-time constructor: the deployer becomes the owner, the
    /// feed address is the sole argument.
    pub fn new(deployer: Address, price_feed: Address) -> Self {
        Self {
            owner: deployer,
            price_feed,
            minimum_usd: DEFAULT_MINIMUM_USD,
            funded: HashMap::new(),
            funders: Vec::new(),
            balance: 0,
        }
    }

    /// Override the funding minimum (builder form, used at deployment)
    pub fn with_minimum_usd(mut self, minimum_usd: u64) -> Self {
        self.minimum_usd = minimum_usd;
        self
    }

    /// Accept a contribution. The USD guard runs before any mutation.
    pub fn fund(
        &mut self,
        sender: Address,
        amount: u128,
        feed: &dyn PriceFeed,
    ) -> Result<(), FundMeError> {
        let sent_usd = oracle::usd_value(amount, feed);
        let minimum_usd = oracle::scale_usd(self.minimum_usd, feed.decimals());

        if sent_usd < minimum_usd {
            return Err(FundMeError::InsufficientContribution {
                sent_usd,
                minimum_usd,
            });
        }

        *self.funded.entry(sender).or_insert(0) += amount;
        self.funders.push(sender);
        self.balance += amount;

        Ok(())
    }

    /// Drain the balance to the owner, resetting every funder record.
    ///
    /// Re-reads the registry length on each iteration; see
    /// `cheaper_withdraw` for the variant that snapshots it once.
    pub fn withdraw(
        &mut self,
        caller: Address,
        sink: &mut dyn TransferSink,
    ) -> Result<u128, FundMeError> {
        self.require_owner(caller)?;

        let snapshot_funded = self.funded.clone();
        let snapshot_funders = self.funders.clone();

        let mut index = 0;
        while index < self.funders.len() {
            let funder = self.funders[index];
            self.funded.insert(funder, 0);
            index += 1;
        }
        self.funders.clear();

        let amount = self.balance;
        self.balance = 0;

        if sink.transfer(self.owner, amount).is_err() {
            // All-or-nothing: undo the reset before surfacing the error
            self.funded = snapshot_funded;
            self.funders = snapshot_funders;
            self.balance = amount;
            return Err(FundMeError::TransferFailed { amount });
        }

        Ok(amount)
    }

    /// Observably identical twin of `withdraw`: the registry is taken
    /// into a local copy once and iterated without touching state.
    pub fn cheaper_withdraw(
        &mut self,
        caller: Address,
        sink: &mut dyn TransferSink,
    ) -> Result<u128, FundMeError> {
        self.require_owner(caller)?;

        let snapshot_funded = self.funded.clone();

        let funders = std::mem::take(&mut self.funders);
        for funder in &funders {
            self.funded.insert(*funder, 0);
        }

        let amount = self.balance;
        self.balance = 0;

        if sink.transfer(self.owner, amount).is_err() {
            self.funded = snapshot_funded;
            self.funders = funders;
            self.balance = amount;
            return Err(FundMeError::TransferFailed { amount });
        }

        Ok(amount)
    }

    fn require_owner(&self, caller: Address) -> Result<(), FundMeError> {
        if caller != self.owner {
            return Err(FundMeError::NotOwner);
        }
        Ok(())
    }

    /// The owning account
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Address of the price feed set at construction
    pub fn price_feed(&self) -> Address {
        self.price_feed
    }

    /// Configured funding minimum, in whole dollars
    pub fn minimum_usd(&self) -> u64 {
        self.minimum_usd
    }

    /// Cumulative amount funded by an account (0 when absent)
    pub fn address_to_amount_funded(&self, account: Address) -> u128 {
        self.funded.get(&account).copied().unwrap_or(0)
    }

    /// Funder at `index` in the registry; fails past the end, so
    /// after a reset even index 0 is out of range.
    pub fn funder(&self, index: usize) -> Result<Address, FundMeError> {
        self.funders
            .get(index)
            .copied()
            .ok_or(FundMeError::IndexOutOfRange {
                index,
                len: self.funders.len(),
            })
    }

    /// Number of entries in the funder registry
    pub fn funder_count(&self) -> usize {
        self.funders.len()
    }

    /// Escrowed native balance
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// True when the registry is empty and nothing is escrowed
    pub fn is_empty(&self) -> bool {
        self.funders.is_empty() && self.balance == 0
    }

    /// Sum of every funder record; equals `balance` between operations
    pub fn total_recorded(&self) -> u128 {
        self.funded.values().sum()
    }
}
