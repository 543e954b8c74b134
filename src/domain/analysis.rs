//! Analysis of one insider's trades in one company.
//!
//! Loads the company's disclosure table once, resolves the insider, keeps the
//! trades inside the analysis window and classifies them. Backtests of either
//! side go through [`crate::domain::backtest`].

use crate::domain::backtest::{self, BacktestTable};
use crate::domain::classifier::{self, Classified};
use crate::domain::error::InsiderError;
use crate::domain::horizon::Horizons;
use crate::domain::summary::{InsiderOverview, TradeSummary};
use crate::domain::trade::InsiderTrade;
use crate::ports::price_port::PriceHistoryPort;
use crate::ports::trade_port::TradeSourcePort;
use chrono::{Days, NaiveDate};
use tracing::{info, warn};

pub const DEFAULT_LOOKBACK_YEARS: u64 = 5;

/// Inclusive trade-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// `years` × 365 days back from `end`.
    pub fn trailing_years(end: NaiveDate, years: u64) -> Self {
        let start = end.checked_sub_days(Days::new(365 * years)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Both bounds or neither; without bounds the default lookback ending
    /// `today` is used.
    pub fn from_bounds(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, InsiderError> {
        match (start, end) {
            (None, None) => Ok(Self::trailing_years(today, DEFAULT_LOOKBACK_YEARS)),
            (Some(s), Some(e)) => {
                let start = parse_date(s, "start")?;
                let end = parse_date(e, "end")?;
                if start > end {
                    return Err(InsiderError::InvalidArgument {
                        name: "start".into(),
                        reason: "start must not be after end".into(),
                    });
                }
                Ok(Self { start, end })
            }
            (Some(_), None) | (None, Some(_)) => Err(InsiderError::InvalidArgument {
                name: "window".into(),
                reason: "start and end must be given together".into(),
            }),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, InsiderError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| InsiderError::InvalidArgument {
        name: field.to_string(),
        reason: format!("invalid date {value:?}, expected YYYY-MM-DD"),
    })
}

#[derive(Debug, Clone)]
pub struct InsiderQuery {
    pub last_name: String,
    pub first_name: Option<String>,
    pub ticker: String,
    pub window: AnalysisWindow,
}

#[derive(Debug, Clone)]
pub struct InsiderAnalysis {
    pub ticker: String,
    /// `None` when no insider matched the query.
    pub full_name: Option<String>,
    pub titles: Vec<String>,
    pub window: AnalysisWindow,
    /// The resolved insider's trades inside the window, filing order.
    pub trades: Vec<InsiderTrade>,
    pub classified: Classified,
    pub summary: TradeSummary,
}

impl InsiderAnalysis {
    pub fn load(query: &InsiderQuery, trade_port: &dyn TradeSourcePort) -> Result<Self, InsiderError> {
        let ticker = query.ticker.trim().to_uppercase();
        let company_trades = trade_port.fetch_insider_trades(&ticker)?;
        info!(ticker = %ticker, trades = company_trades.len(), "loaded insider trades");

        let full_name = classifier::resolve_insider_name(
            &company_trades,
            &query.last_name,
            query.first_name.as_deref(),
        );

        let (titles, trades) = match &full_name {
            Some(name) => {
                let titles = classifier::collect_titles(&company_trades, name);
                let trades: Vec<InsiderTrade> = company_trades
                    .into_iter()
                    .filter(|t| &t.insider_name == name && query.window.contains(t.trade_date))
                    .collect();
                (titles, trades)
            }
            None => {
                let err = InsiderError::UnresolvedInsider {
                    last_name: query.last_name.clone(),
                    first_name: query.first_name.clone(),
                };
                warn!(ticker = %ticker, "{err}");
                (Vec::new(), Vec::new())
            }
        };

        let classified = classifier::classify(&trades);
        let summary = TradeSummary::compute(&classified.purchases, &classified.sales);
        info!(
            purchases = classified.purchases.len(),
            sales = classified.sales.len(),
            "classified trades"
        );

        Ok(Self {
            ticker,
            full_name,
            titles,
            window: query.window,
            trades,
            classified,
            summary,
        })
    }

    pub fn purchases(&self) -> &[InsiderTrade] {
        &self.classified.purchases
    }

    pub fn sales(&self) -> &[InsiderTrade] {
        &self.classified.sales
    }

    pub fn backtest_purchases(
        &self,
        price_port: &dyn PriceHistoryPort,
        horizons: &Horizons,
    ) -> Result<BacktestTable, InsiderError> {
        backtest::backtest(self.purchases(), &self.ticker, price_port, horizons)
    }

    pub fn backtest_sales(
        &self,
        price_port: &dyn PriceHistoryPort,
        horizons: &Horizons,
    ) -> Result<BacktestTable, InsiderError> {
        backtest::backtest(self.sales(), &self.ticker, price_port, horizons)
    }

    pub fn overview(&self) -> InsiderOverview<'_> {
        InsiderOverview {
            full_name: self.full_name.as_deref(),
            titles: &self.titles,
            summary: &self.summary,
        }
    }
}
