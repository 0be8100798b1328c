// FundMe Harness - Development harness for a USD-gated funding ledger
//
// The crate hosts the FundMe contract (a funding/withdrawal ledger with
// owner-only withdrawal), a local simulated chain to execute it on, the
// deployment orchestrator with per-network price-feed resolution and
// explorer verification, and persistent harness storage for the CLI.

pub mod account;
pub mod chain;
pub mod config;
pub mod deploy;
pub mod ledger;
pub mod oracle;
pub mod storage;
