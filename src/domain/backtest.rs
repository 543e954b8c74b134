//! Post-trade performance backtest.
//!
//! For each disclosed trade, the adjusted close on the trade date is the
//! anchor. Each horizon `h` looks at the window `[trade_date, trade_date + h]`
//! and takes the last close inside it; the `current` column compares the
//! anchor against the latest close in the series. All changes are percentages
//! of the anchor, never of the disclosed price.

use crate::domain::error::InsiderError;
use crate::domain::horizon::Horizons;
use crate::domain::price_series::PriceSeries;
use crate::domain::trade::InsiderTrade;
use crate::ports::price_port::PriceHistoryPort;
use chrono::{Days, NaiveDate, NaiveDateTime};
use std::fmt;
use tracing::{debug, info, warn};

/// One horizon cell. `Unavailable` means the window runs past the price
/// history; it is never reported as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonChange {
    Change(f64),
    Unavailable,
}

impl HorizonChange {
    pub fn value(self) -> Option<f64> {
        match self {
            HorizonChange::Change(v) => Some(v),
            HorizonChange::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, HorizonChange::Change(_))
    }
}

impl fmt::Display for HorizonChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonChange::Change(v) => write!(f, "{v:.2}"),
            HorizonChange::Unavailable => f.write_str("n/a"),
        }
    }
}

/// Backtest result for a single trade, keyed by its filing timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRow {
    pub filing_date: NaiveDateTime,
    pub trade_date: NaiveDate,
    /// Disclosed execution price.
    pub price: f64,
    /// Adjusted close on the trade date.
    pub adj_price: f64,
    /// `(horizon days, change)` in horizon order.
    pub changes: Vec<(u32, HorizonChange)>,
    pub current: f64,
}

impl BacktestRow {
    pub fn change(&self, days: u32) -> Option<HorizonChange> {
        self.changes
            .iter()
            .find(|(d, _)| *d == days)
            .map(|(_, c)| *c)
    }
}

/// A trade whose row could not be built. The row is left out of
/// [`BacktestTable::rows`].
#[derive(Debug)]
pub struct RowFailure {
    pub filing_date: NaiveDateTime,
    pub trade_date: NaiveDate,
    pub error: InsiderError,
}

#[derive(Debug)]
pub struct BacktestTable {
    pub horizons: Horizons,
    pub rows: Vec<BacktestRow>,
    pub failures: Vec<RowFailure>,
}

impl BacktestTable {
    pub fn empty(horizons: &Horizons) -> Self {
        Self {
            horizons: horizons.clone(),
            rows: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, filing_date: NaiveDateTime) -> Option<&BacktestRow> {
        self.rows.iter().find(|r| r.filing_date == filing_date)
    }
}

/// `(end - start) / start * 100`
pub fn percent_change(start: f64, end: f64) -> f64 {
    (end - start) / start * 100.0
}

/// Backtest `trades` against `ticker`'s price history.
///
/// The history is fetched once for the whole batch. A fetch failure aborts
/// the call; per-trade problems only affect their own row.
pub fn backtest(
    trades: &[InsiderTrade],
    ticker: &str,
    price_port: &dyn PriceHistoryPort,
    horizons: &Horizons,
) -> Result<BacktestTable, InsiderError> {
    if trades.is_empty() {
        debug!(ticker, "no trades to backtest");
        return Ok(BacktestTable::empty(horizons));
    }

    let series = price_port.fetch_price_history(ticker)?;
    info!(
        ticker,
        points = series.len(),
        trades = trades.len(),
        "fetched price history"
    );
    Ok(backtest_series(trades, &series, horizons))
}

/// Backtest against an already fetched series.
pub fn backtest_series(
    trades: &[InsiderTrade],
    series: &PriceSeries,
    horizons: &Horizons,
) -> BacktestTable {
    let mut table = BacktestTable::empty(horizons);

    for trade in trades {
        match backtest_trade(trade, series, horizons) {
            Ok(row) => table.rows.push(row),
            Err(error) => {
                warn!(
                    filing_date = %trade.filing_date,
                    trade_date = %trade.trade_date,
                    "skipping trade: {error}"
                );
                table.failures.push(RowFailure {
                    filing_date: trade.filing_date,
                    trade_date: trade.trade_date,
                    error,
                });
            }
        }
    }

    table
}

fn backtest_trade(
    trade: &InsiderTrade,
    series: &PriceSeries,
    horizons: &Horizons,
) -> Result<BacktestRow, InsiderError> {
    let lookup_failure = || InsiderError::TradeDateLookup {
        trade_date: trade.trade_date,
    };
    let adj_price = series.close_on(trade.trade_date).ok_or_else(lookup_failure)?;
    let last_date = series.last_date().ok_or_else(lookup_failure)?;
    let latest = series.latest_close().ok_or_else(lookup_failure)?;

    let changes = horizons
        .days()
        .iter()
        .map(|&days| {
            let cell = trade
                .trade_date
                .checked_add_days(Days::new(u64::from(days)))
                .filter(|end| *end <= last_date)
                .and_then(|end| series.last_close_in(trade.trade_date, end))
                .map(|end_price| HorizonChange::Change(percent_change(adj_price, end_price)))
                .unwrap_or(HorizonChange::Unavailable);
            (days, cell)
        })
        .collect();

    Ok(BacktestRow {
        filing_date: trade.filing_date,
        trade_date: trade.trade_date,
        price: trade.price,
        adj_price,
        changes,
        current: percent_change(adj_price, latest),
    })
}
