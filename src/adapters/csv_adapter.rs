//! CSV file data adapter for insider trades and price history.
//!
//! Files live under a base directory: `<TICKER>_trades.csv` and
//! `<TICKER>_prices.csv`.

use crate::domain::error::InsiderError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::trade::{InsiderTrade, FILING_DATE_FORMAT};
use crate::ports::price_port::PriceHistoryPort;
use crate::ports::trade_port::TradeSourcePort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

static TRADE_COLUMNS: [&str; 8] = [
    "filing_date",
    "trade_date",
    "insider_name",
    "title",
    "trade_type",
    "price",
    "quantity",
    "value",
];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn trades_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}_trades.csv", ticker.to_uppercase()))
    }

    fn prices_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}_prices.csv", ticker.to_uppercase()))
    }
}

/// Position of each wanted column in the header, matched case-insensitively.
fn column_positions(
    headers: &csv::StringRecord,
    wanted: &[&[&str]],
) -> Result<Vec<usize>, String> {
    wanted
        .iter()
        .map(|aliases| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
                .ok_or_else(|| format!("missing {} column", aliases[0]))
        })
        .collect()
}

/// Numbers as the disclosure site prints them: `$1,234.50`, `+10,000`, `-$5`.
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '+'))
        .collect();
    cleaned.parse().ok()
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, name: &str) -> Result<&'r str, String> {
    record.get(idx).ok_or_else(|| format!("missing {name} value"))
}

fn parse_trade(record: &csv::StringRecord, cols: &[usize]) -> Result<InsiderTrade, String> {
    let filing_raw = field(record, cols[0], "filing_date")?;
    let filing_date = NaiveDateTime::parse_from_str(filing_raw.trim(), FILING_DATE_FORMAT)
        .map_err(|e| format!("invalid filing_date {filing_raw:?}: {e}"))?;
    let trade_raw = field(record, cols[1], "trade_date")?;
    let trade_date = NaiveDate::parse_from_str(trade_raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid trade_date {trade_raw:?}: {e}"))?;

    let price_raw = field(record, cols[5], "price")?;
    let price =
        parse_number(price_raw).ok_or_else(|| format!("invalid price value {price_raw:?}"))?;
    let quantity_raw = field(record, cols[6], "quantity")?;
    let quantity = parse_number(quantity_raw)
        .map(|q| q.round() as i64)
        .ok_or_else(|| format!("invalid quantity value {quantity_raw:?}"))?;
    let value_raw = field(record, cols[7], "value")?;
    let value =
        parse_number(value_raw).ok_or_else(|| format!("invalid value {value_raw:?}"))?;

    Ok(InsiderTrade {
        filing_date,
        trade_date,
        insider_name: field(record, cols[2], "insider_name")?.trim().to_string(),
        title: field(record, cols[3], "title")?.trim().to_string(),
        trade_type: field(record, cols[4], "trade_type")?.trim().to_string(),
        price,
        quantity,
        value,
    })
}

impl TradeSourcePort for CsvAdapter {
    fn fetch_insider_trades(&self, ticker: &str) -> Result<Vec<InsiderTrade>, InsiderError> {
        let fetch_error = |reason: String| InsiderError::TradeFetch {
            ticker: ticker.to_string(),
            reason,
        };

        let path = self.trades_path(ticker);
        let content = fs::read_to_string(&path)
            .map_err(|e| fetch_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| fetch_error(format!("CSV parse error: {e}")))?
            .clone();
        let wanted: Vec<&[&str]> = TRADE_COLUMNS.iter().map(std::slice::from_ref).collect();
        let cols = column_positions(&headers, &wanted).map_err(fetch_error)?;

        let mut trades = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| fetch_error(format!("CSV parse error: {e}")))?;
            let trade = parse_trade(&record, &cols)
                .map_err(|reason| fetch_error(format!("row {}: {}", line + 1, reason)))?;
            trades.push(trade);
        }

        Ok(trades)
    }
}

impl PriceHistoryPort for CsvAdapter {
    fn fetch_price_history(&self, ticker: &str) -> Result<PriceSeries, InsiderError> {
        let fetch_error = |reason: String| InsiderError::PriceFetch {
            ticker: ticker.to_string(),
            reason,
        };

        let path = self.prices_path(ticker);
        let content = fs::read_to_string(&path)
            .map_err(|e| fetch_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| fetch_error(format!("CSV parse error: {e}")))?
            .clone();
        let wanted: [&[&str]; 2] = [&["date"], &["adj close", "adj_close"]];
        let cols = column_positions(&headers, &wanted).map_err(fetch_error)?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| fetch_error(format!("CSV parse error: {e}")))?;

            let date_str = field(&record, cols[0], "date").map_err(fetch_error)?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
                .map_err(|e| fetch_error(format!("invalid date format: {e}")))?;

            let close_str = field(&record, cols[1], "adj close").map_err(fetch_error)?;
            // Price exports leave gaps blank on non-trading rows.
            if close_str.trim().is_empty() {
                continue;
            }
            let adj_close: f64 = close_str
                .trim()
                .parse()
                .map_err(|e| fetch_error(format!("invalid adj close value: {e}")))?;

            points.push(PricePoint { date, adj_close });
        }

        Ok(PriceSeries::new(points))
    }
}
