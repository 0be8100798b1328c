// Storage module - Persistent harness state using sled

mod store;

pub use store::{HarnessStore, StorageStats, StoreError};
