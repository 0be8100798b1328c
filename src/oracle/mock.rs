use crate::oracle::{PriceFeed, PriceRound};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default decimal precision of the mock feed (Chainlink USD pairs use 8)
pub const DEFAULT_DECIMALS: u8 = 8;

/// Default mock answer: $2000 per whole native unit, at 8 decimals
pub const DEFAULT_ANSWER: i128 = 2_000 * 100_000_000;

/// In-memory price aggregator for development chains.
///
/// Holds a fixed answer that tests and scripts can move with
/// `set_answer`; each update bumps the round counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MockPriceFeed {
    decimals: u8,
    answer: i128,
    round_id: u64,
    updated_at: u64,
}

impl MockPriceFeed {
    /// Create a mock feed with the given precision and initial answer
    pub fn new(decimals: u8, initial_answer: i128) -> Self {
        Self {
            decimals,
            answer: initial_answer,
            round_id: 1,
            updated_at: now(),
        }
    }

    /// Replace the initial answer (builder form)
    pub fn with_answer(mut self, answer: i128) -> Self {
        self.answer = answer;
        self
    }

    /// Publish a new answer, advancing the round
    pub fn set_answer(&mut self, answer: i128) {
        self.answer = answer;
        self.round_id += 1;
        self.updated_at = now();
    }
}

impl Default for MockPriceFeed {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS, DEFAULT_ANSWER)
    }
}

impl PriceFeed for MockPriceFeed {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn latest_round(&self) -> PriceRound {
        PriceRound {
            round_id: self.round_id,
            answer: self.answer,
            updated_at: self.updated_at,
        }
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
