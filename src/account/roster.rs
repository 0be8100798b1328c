use crate::account::Address;
use serde::{Deserialize, Serialize};

/// Named-account roster for a development chain.
///
/// Index 0 is the deployer, the rest are plain users. Addresses are
/// derived from stable seed labels so every run of the harness sees
/// the same roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Accounts {
    list: Vec<Address>,
}

impl Accounts {
    /// Build a roster of `count` deterministic accounts (deployer + users).
    /// A roster always carries at least the deployer, whatever `count` says.
    pub fn development(count: usize) -> Self {
        let list = (0..count.max(1))
            .map(|i| {
                if i == 0 {
                    Address::from_seed("deployer")
                } else {
                    Address::from_seed(&format!("user-{i}"))
                }
            })
            .collect();
        Self { list }
    }

    /// The deploying account (index 0)
    pub fn deployer(&self) -> Address {
        self.list[0]
    }

    /// A user account; index 0 is the first non-deployer account.
    /// Panics past the roster, like slice indexing.
    pub fn user(&self, index: usize) -> Address {
        self.list[index + 1]
    }

    /// A user account, or None past the roster
    pub fn get_user(&self, index: usize) -> Option<Address> {
        self.list.get(index + 1).copied()
    }

    /// All accounts, deployer first
    pub fn all(&self) -> &[Address] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
