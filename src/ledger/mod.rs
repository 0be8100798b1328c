// Ledger module - The FundMe funding/withdrawal contract

mod fundme;

pub use fundme::{FundMe, FundMeError, TransferError, TransferSink, DEFAULT_MINIMUM_USD};
