//! Buy/sell aggregates for an insider's classified trades.

use crate::domain::trade::InsiderTrade;
use serde::Serialize;
use std::fmt;

/// Count, total value and total shares for one side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SideTotals {
    pub trades: i64,
    pub value: f64,
    pub shares: i64,
}

impl SideTotals {
    pub fn from_trades(trades: &[InsiderTrade]) -> Self {
        Self {
            trades: trades.len() as i64,
            value: trades.iter().map(|t| t.value).sum(),
            shares: trades.iter().map(|t| t.quantity).sum(),
        }
    }
}

/// Serialises as `{"buy": {...}, "sell": {...}, "net": {...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TradeSummary {
    pub buy: SideTotals,
    pub sell: SideTotals,
    pub net: SideTotals,
}

impl TradeSummary {
    pub fn compute(purchases: &[InsiderTrade], sales: &[InsiderTrade]) -> Self {
        let buy = SideTotals::from_trades(purchases);
        let sell = SideTotals::from_trades(sales);
        let net = SideTotals {
            trades: buy.trades - sell.trades,
            value: buy.value - sell.value,
            shares: buy.shares - sell.shares,
        };
        Self { buy, sell, net }
    }
}

/// Human-readable overview of one insider's activity.
pub struct InsiderOverview<'a> {
    pub full_name: Option<&'a str>,
    pub titles: &'a [String],
    pub summary: &'a TradeSummary,
}

impl fmt::Display for InsiderOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Full Name: {}", self.full_name.unwrap_or("(unresolved)"))?;
        writeln!(f, "Titles: {}", self.titles.join("; "))?;
        writeln!(f)?;
        writeln!(f, "[Trades Overview]")?;
        writeln!(f, "----------------")?;
        writeln!(f, "Purchases")?;
        writeln!(f, "----")?;
        writeln!(f, "Number of Purchases: {}", s.buy.trades)?;
        writeln!(f, "Value Bought($): {}", group_thousands(s.buy.value.round() as i64))?;
        writeln!(f, "Shares Bought: {}", group_thousands(s.buy.shares))?;
        writeln!(f)?;
        writeln!(f, "Sales")?;
        writeln!(f, "----")?;
        writeln!(f, "Number of Sales: {}", s.sell.trades)?;
        writeln!(f, "Value Sold($): {}", group_thousands(s.sell.value.round() as i64))?;
        write!(f, "Shares Sold: {}", group_thousands(s.sell.shares))
    }
}

/// `1234567` → `1,234,567`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}
