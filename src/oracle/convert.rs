// Native-to-USD conversion against a price feed

use crate::oracle::PriceFeed;
use thiserror::Error;

/// Smallest units per whole native coin (18 decimals)
pub const WEI_PER_UNIT: u128 = 1_000_000_000_000_000_000;

#[derive(Error, Debug)]
pub enum UnitsError {
    #[error("Invalid amount '{0}': not a decimal number")]
    InvalidNumber(String),

    #[error("Too many decimal places in '{0}': at most 18 supported")]
    TooPrecise(String),
}

/// Convert a native amount (smallest units) to its USD value,
/// expressed at the feed's decimal precision.
///
/// The multiplication is split around the unit boundary so
/// `amount * price` cannot overflow for any realistic inputs.
pub fn usd_value(amount: u128, feed: &dyn PriceFeed) -> u128 {
    let price = feed.latest_answer().max(0) as u128;

    let whole = amount / WEI_PER_UNIT;
    let frac = amount % WEI_PER_UNIT;

    whole * price + frac * price / WEI_PER_UNIT
}

/// Scale a whole-dollar amount to the feed's decimal precision.
/// Saturates on absurd precisions (10^39 and up exceed u128), which
/// makes a non-zero minimum unsatisfiable instead of panicking.
pub fn scale_usd(whole_dollars: u64, decimals: u8) -> u128 {
    10u128
        .checked_pow(decimals as u32)
        .and_then(|scale| (whole_dollars as u128).checked_mul(scale))
        .unwrap_or(u128::MAX)
}

/// Parse a whole-unit decimal string ("0.1", "2", "1.5") into smallest units
pub fn parse_units(s: &str) -> Result<u128, UnitsError> {
    let s = s.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::InvalidNumber(s.to_string()));
    }
    if frac.len() > 18 {
        return Err(UnitsError::TooPrecise(s.to_string()));
    }

    let whole_part: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| UnitsError::InvalidNumber(s.to_string()))?
    };

    let frac_part: u128 = if frac.is_empty() {
        0
    } else {
        let digits: u128 = frac
            .parse()
            .map_err(|_| UnitsError::InvalidNumber(s.to_string()))?;
        digits * 10u128.pow((18 - frac.len()) as u32)
    };

    Ok(whole_part * WEI_PER_UNIT + frac_part)
}
