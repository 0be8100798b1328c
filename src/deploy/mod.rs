// Deploy module - Deployment orchestration
// Resolves the price feed per network, deploys FundMe, and optionally
// registers the address with a block-explorer verification service

mod orchestrator;
mod verify;

pub use orchestrator::{DeployError, DeploymentRecord, Orchestrator};
pub use verify::{ExplorerApi, MockExplorer, VerifyError, VerifyOutcome};
