// Account module - Addresses and named test accounts

mod address;
mod roster;

pub use address::{Address, AddressError};
pub use roster::Accounts;
