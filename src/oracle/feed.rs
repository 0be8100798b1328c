use serde::{Deserialize, Serialize};

/// One observation from a price feed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRound {
    /// Monotonically increasing round counter
    pub round_id: u64,
    /// Exchange rate, scaled by 10^decimals USD per whole native unit
    pub answer: i128,
    /// Unix timestamp of the last update
    pub updated_at: u64,
}

/// Read-only price oracle (AggregatorV3-shaped).
///
/// Treated as a trusted, always-available collaborator: reads do not
/// fail and there is no retry or fallback layer in the harness.
pub trait PriceFeed {
    /// Decimal precision of the answer
    fn decimals(&self) -> u8;

    /// Latest observed round
    fn latest_round(&self) -> PriceRound;

    /// Latest answer, shorthand over `latest_round`
    fn latest_answer(&self) -> i128 {
        self.latest_round().answer
    }
}
