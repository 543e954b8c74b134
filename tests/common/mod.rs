#![allow(dead_code)]

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use insidertrader::domain::error::InsiderError;
use insidertrader::domain::price_series::{PricePoint, PriceSeries};
pub use insidertrader::domain::trade::InsiderTrade;
use insidertrader::ports::price_port::PriceHistoryPort;
use insidertrader::ports::trade_port::TradeSourcePort;
use std::cell::Cell;
use std::collections::HashMap;

pub struct MockTradePort {
    pub data: HashMap<String, Vec<InsiderTrade>>,
    pub errors: HashMap<String, String>,
}

impl MockTradePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_trades(mut self, ticker: &str, trades: Vec<InsiderTrade>) -> Self {
        self.data.insert(ticker.to_string(), trades);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl TradeSourcePort for MockTradePort {
    fn fetch_insider_trades(&self, ticker: &str) -> Result<Vec<InsiderTrade>, InsiderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(InsiderError::TradeFetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

/// Price source that counts fetches.
pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub fetches: Cell<usize>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            fetches: Cell::new(0),
        }
    }

    pub fn with_points(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), points);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PriceHistoryPort for MockPricePort {
    fn fetch_price_history(&self, ticker: &str) -> Result<PriceSeries, InsiderError> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(reason) = self.errors.get(ticker) {
            return Err(InsiderError::PriceFetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(PriceSeries::new(
            self.data.get(ticker).cloned().unwrap_or_default(),
        ))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn filed(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn make_trade(
    name: &str,
    title: &str,
    trade_type: &str,
    filing: &str,
    trade_date: &str,
    price: f64,
    quantity: i64,
) -> InsiderTrade {
    InsiderTrade {
        filing_date: filed(filing),
        trade_date: NaiveDate::parse_from_str(trade_date, "%Y-%m-%d").unwrap(),
        insider_name: name.to_string(),
        title: title.to_string(),
        trade_type: trade_type.to_string(),
        price,
        quantity,
        value: price * quantity as f64,
    }
}

/// Weekday closes from `start` for `count` calendar days, rising by
/// `step` per trading day from `start_price`.
pub fn generate_weekday_points(
    start: &str,
    count: u64,
    start_price: f64,
    step: f64,
) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| start.checked_add_days(Days::new(i)).unwrap())
        .filter(|d| d.weekday().number_from_monday() <= 5)
        .enumerate()
        .map(|(i, d)| PricePoint {
            date: d,
            adj_close: start_price + step * i as f64,
        })
        .collect()
}

/// NVDA-like disclosure table: the CEO mostly sells, a director buys once.
pub fn nvda_trades() -> Vec<InsiderTrade> {
    vec![
        make_trade("Huang Jen Hsun", "Pres, CEO", "S - Sale+OE", "2024-03-15 18:30:00", "2024-03-13", 905.0, -120_000),
        make_trade("Kress Colette", "EVP, CFO", "S - Sale", "2024-03-14 18:00:00", "2024-03-12", 890.0, -10_000),
        make_trade("Huang Jen Hsun", "Pres, CEO", "S - Sale", "2024-01-10 18:30:00", "2024-01-08", 520.0, -60_000),
        make_trade("Huang Jen Hsun", "Pres, CEO_", "M - OptEx", "2024-01-09 18:30:00", "2024-01-08", 10.0, 60_000),
        make_trade("Stevens Mark A", "Dir", "P - Purchase", "2023-12-01 18:00:00", "2023-11-29", 480.0, 1_000),
        make_trade("Huang Jen Hsun", "Pres, CEO", "P - Purchase", "2023-06-07 18:30:00", "2023-06-05", 390.0, 5_000),
        make_trade("Huang Jen Hsun", "Director", "S - Sale", "2021-03-03 18:30:00", "2021-03-01", 130.0, -40_000),
    ]
}
