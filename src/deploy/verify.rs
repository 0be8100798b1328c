// Explorer verification - External block-explorer API seam

use crate::account::Address;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// How a verification request concluded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Source registered for the first time
    Verified,
    /// The explorer already knew this address; treated as success
    AlreadyVerified,
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Explorer rejected verification: {0}")]
    Rejected(String),

    #[error("Explorer unreachable: {0}")]
    Unreachable(String),
}

/// Block-explorer verification service (Etherscan-shaped)
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Submit a deployed address and its constructor arguments
    async fn verify_contract(
        &self,
        address: Address,
        constructor_args: &[String],
    ) -> Result<VerifyOutcome, VerifyError>;
}

enum MockResponse {
    Verified,
    AlreadyVerified,
    Rejected(String),
    Unreachable(String),
}

/// Mock explorer for tests and development chains
pub struct MockExplorer {
    response: MockResponse,
    call_count: AtomicUsize,
}

impl MockExplorer {
    /// Create a mock that verifies everything
    pub fn new() -> Self {
        Self {
            response: MockResponse::Verified,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Respond with "already verified"
    pub fn with_already_verified(mut self) -> Self {
        self.response = MockResponse::AlreadyVerified;
        self
    }

    /// Reject every submission with a message
    pub fn with_rejection(mut self, message: &str) -> Self {
        self.response = MockResponse::Rejected(message.to_string());
        self
    }

    /// Fail every submission as unreachable
    pub fn with_unreachable(mut self, message: &str) -> Self {
        self.response = MockResponse::Unreachable(message.to_string());
        self
    }

    /// How many submissions the mock has seen
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExplorerApi for MockExplorer {
    async fn verify_contract(
        &self,
        _address: Address,
        _constructor_args: &[String],
    ) -> Result<VerifyOutcome, VerifyError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            MockResponse::Verified => Ok(VerifyOutcome::Verified),
            MockResponse::AlreadyVerified => Ok(VerifyOutcome::AlreadyVerified),
            MockResponse::Rejected(msg) => Err(VerifyError::Rejected(msg.clone())),
            MockResponse::Unreachable(msg) => Err(VerifyError::Unreachable(msg.clone())),
        }
    }
}
