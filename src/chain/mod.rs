// Chain module - Local simulated chain the unit tests run against

mod local;

pub use local::{ChainError, LocalChain};
