// Oracle module - Price feed interface and mock aggregator
// Supplies the USD/native exchange rate the funding minimum is checked against

mod convert;
mod feed;
mod mock;

pub use convert::{parse_units, scale_usd, usd_value, UnitsError, WEI_PER_UNIT};
pub use feed::{PriceFeed, PriceRound};
pub use mock::{MockPriceFeed, DEFAULT_ANSWER, DEFAULT_DECIMALS};
