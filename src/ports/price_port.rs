//! Price history port trait.

use crate::domain::error::InsiderError;
use crate::domain::price_series::PriceSeries;

pub trait PriceHistoryPort {
    /// Full daily adjusted-close history for `ticker`. The latest adjusted
    /// close is the series' last point.
    fn fetch_price_history(&self, ticker: &str) -> Result<PriceSeries, InsiderError>;
}
