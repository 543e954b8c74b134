//! Insider trade source port trait.

use crate::domain::error::InsiderError;
use crate::domain::trade::InsiderTrade;

pub trait TradeSourcePort {
    /// All disclosed insider trades for `ticker`, in filing order.
    fn fetch_insider_trades(&self, ticker: &str) -> Result<Vec<InsiderTrade>, InsiderError>;
}
