use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Length of an account identifier in bytes
pub const ADDRESS_LEN: usize = 20;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid address length: expected {ADDRESS_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-width account identifier, displayed as 0x-prefixed hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Generate a random address
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; ADDRESS_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive a deterministic address from a seed label.
    /// Used for reproducible test-account rosters.
    pub fn from_seed(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"account:");
        hasher.update(label.as_bytes());
        Self::truncate(&hasher.finalize())
    }

    /// Derive the address of a contract created by `deployer` at `nonce`
    pub fn derive_contract(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"contract:");
        hasher.update(deployer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        Self::truncate(&hasher.finalize())
    }

    fn truncate(digest: &[u8]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse an address from a 0x-prefixed hex string
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::InvalidFormat("address cannot be empty".into()));
        }

        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressError::InvalidFormat("missing 0x prefix".into()))?;

        let bytes = hex::decode(hex_part).map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        if bytes.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }

        let mut fixed = [0u8; ADDRESS_LEN];
        fixed.copy_from_slice(&bytes);
        Ok(Self(fixed))
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_derivation_is_deterministic() {
        let a = Address::from_seed("deployer");
        let b = Address::from_seed("deployer");
        let c = Address::from_seed("user-1");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_roundtrip() {
        let addr = Address::generate();
        let parsed = Address::parse(&addr.to_string()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("deadbeef").is_err());
        assert!(Address::parse("0xzz").is_err());
        assert!(Address::parse("0xdeadbeef").is_err());
    }

    #[test]
    fn test_contract_addresses_differ_by_nonce() {
        let deployer = Address::from_seed("deployer");
        let a = Address::derive_contract(&deployer, 0);
        let b = Address::derive_contract(&deployer, 1);
        assert_ne!(a, b);
    }
}
