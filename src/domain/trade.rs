//! Insider trade disclosure records.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Timestamp format used for filing dates in disclosure tables.
pub const FILING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Disclosure transaction codes this crate classifies.
///
/// `+OE` marks a trade that came with an option exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    Purchase,
    PurchaseOptionExercise,
    Sale,
    SaleOptionExercise,
}

impl TradeType {
    /// Parse a disclosure label. Matching is exact: `P - Purchase`,
    /// `P - Purchase+OE`, `S - Sale`, `S - Sale+OE`.
    pub fn parse(label: &str) -> Option<Self> {
        let (base, option_exercise) = match label.strip_suffix("+OE") {
            Some(base) => (base, true),
            None => (label, false),
        };
        match (base, option_exercise) {
            ("P - Purchase", false) => Some(TradeType::Purchase),
            ("P - Purchase", true) => Some(TradeType::PurchaseOptionExercise),
            ("S - Sale", false) => Some(TradeType::Sale),
            ("S - Sale", true) => Some(TradeType::SaleOptionExercise),
            _ => None,
        }
    }

    pub fn is_purchase(self) -> bool {
        matches!(self, TradeType::Purchase | TradeType::PurchaseOptionExercise)
    }

    pub fn is_sale(self) -> bool {
        matches!(self, TradeType::Sale | TradeType::SaleOptionExercise)
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeType::Purchase => "P - Purchase",
            TradeType::PurchaseOptionExercise => "P - Purchase+OE",
            TradeType::Sale => "S - Sale",
            TradeType::SaleOptionExercise => "S - Sale+OE",
        };
        f.write_str(label)
    }
}

/// One row of a company's insider trade table. The filing timestamp is the
/// record's identity within a person's trades.
#[derive(Debug, Clone, PartialEq)]
pub struct InsiderTrade {
    pub filing_date: NaiveDateTime,
    pub trade_date: NaiveDate,
    pub insider_name: String,
    pub title: String,
    /// Raw label as disclosed; see [`TradeType::parse`].
    pub trade_type: String,
    pub price: f64,
    pub quantity: i64,
    pub value: f64,
}

impl InsiderTrade {
    pub fn kind(&self) -> Option<TradeType> {
        TradeType::parse(&self.trade_type)
    }
}
