// HarnessStore - Persistent harness state using sled
//
// Provides typed access for storing:
// - The simulated chain (so the CLI survives restarts)
// - Deployment records, keyed by chain id

use crate::chain::LocalChain;
use crate::deploy::DeploymentRecord;
use std::path::Path;
use thiserror::Error;

/// Key prefixes for organizing data
mod keys {
    pub const CHAIN_STATE: &[u8] = b"chain:state";
    pub const DEPLOYMENT_PREFIX: &[u8] = b"deployment:";
}

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

/// Statistics about the storage
#[derive(Clone, Debug)]
pub struct StorageStats {
    /// Number of keys in the database
    pub key_count: usize,
    /// Approximate disk size in bytes
    pub disk_size_bytes: u64,
}

/// Persistent key-value store for harness data
///
/// Uses sled for crash-safe, embedded storage.
/// All writes are atomic and durable after flush.
pub struct HarnessStore {
    db: sled::Db,
}

impl HarnessStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.db.is_empty())
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StoreError> {
        Ok(StorageStats {
            key_count: self.db.len(),
            disk_size_bytes: self.db.size_on_disk().unwrap_or(0),
        })
    }

    // ========================================================================
    // RAW KEY-VALUE OPERATIONS
    // ========================================================================

    /// Put raw bytes
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    /// Get raw bytes
    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    /// Delete a key
    pub fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.db.remove(key)?;
        Ok(())
    }

    // ========================================================================
    // CHAIN PERSISTENCE
    // ========================================================================

    /// Save the simulated chain
    pub fn save_chain(&self, chain: &LocalChain) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(chain)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        self.put_raw(keys::CHAIN_STATE, &bytes)
    }

    /// Load the simulated chain
    pub fn load_chain(&self) -> Result<Option<LocalChain>, StoreError> {
        match self.get_raw(keys::CHAIN_STATE)? {
            Some(bytes) => {
                let chain = postcard::from_bytes(&bytes)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(chain))
            }
            None => Ok(None),
        }
    }

    /// Drop the persisted chain
    pub fn clear_chain(&self) -> Result<(), StoreError> {
        self.delete(keys::CHAIN_STATE)
    }

    // ========================================================================
    // DEPLOYMENT RECORDS
    // ========================================================================

    fn deployment_key(chain_id: u64) -> Vec<u8> {
        [keys::DEPLOYMENT_PREFIX, &chain_id.to_be_bytes()[..]].concat()
    }

    /// Save a deployment record under its chain id
    pub fn save_deployment(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(record)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        self.put_raw(&Self::deployment_key(record.chain_id), &bytes)
    }

    /// Load the deployment record for a chain id
    pub fn load_deployment(&self, chain_id: u64) -> Result<Option<DeploymentRecord>, StoreError> {
        match self.get_raw(&Self::deployment_key(chain_id))? {
            Some(bytes) => {
                let record = postcard::from_bytes(&bytes)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List every stored deployment record
    pub fn list_deployments(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        let mut records = Vec::new();
        for result in self.db.scan_prefix(keys::DEPLOYMENT_PREFIX) {
            let (_, value) = result?;
            let record = postcard::from_bytes(&value)
                .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }
}
