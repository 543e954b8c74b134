//! CSV writer for backtest tables.

use crate::domain::backtest::{BacktestRow, BacktestTable};
use crate::domain::error::InsiderError;
use crate::domain::trade::FILING_DATE_FORMAT;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn header(table: &BacktestTable) -> Vec<String> {
        let mut header: Vec<String> = ["filing_date", "trade_date", "price", "adj_price"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(table.horizons.days().iter().map(|d| d.to_string()));
        header.push("current".to_string());
        header
    }

    /// Unavailable horizons are left blank.
    pub fn record(table: &BacktestTable, row: &BacktestRow) -> Vec<String> {
        let mut record = vec![
            row.filing_date.format(FILING_DATE_FORMAT).to_string(),
            row.trade_date.to_string(),
            row.price.to_string(),
            row.adj_price.to_string(),
        ];
        record.extend(table.horizons.days().iter().map(|&d| {
            row.change(d)
                .and_then(|c| c.value())
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        record.push(row.current.to_string());
        record
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, table: &BacktestTable, output_path: &Path) -> Result<(), InsiderError> {
        let report_error = |e: csv::Error| InsiderError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        };

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(output_path).map_err(report_error)?;
        writer.write_record(Self::header(table)).map_err(report_error)?;
        for row in &table.rows {
            writer
                .write_record(Self::record(table, row))
                .map_err(report_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::HorizonChange;
    use crate::domain::horizon::Horizons;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn sample_table() -> BacktestTable {
        let mut table = BacktestTable::empty(&Horizons::new(vec![1, 30]).unwrap());
        table.rows.push(BacktestRow {
            filing_date: NaiveDateTime::parse_from_str("2024-03-13 18:30:01", FILING_DATE_FORMAT)
                .unwrap(),
            trade_date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            price: 875.5,
            adj_price: 874.5,
            changes: vec![
                (1, HorizonChange::Change(1.5)),
                (30, HorizonChange::Unavailable),
            ],
            current: -2.25,
        });
        table
    }

    #[test]
    fn header_lists_horizons() {
        assert_eq!(
            CsvReportAdapter::header(&sample_table()),
            vec!["filing_date", "trade_date", "price", "adj_price", "1", "30", "current"]
        );
    }

    #[test]
    fn write_leaves_unavailable_blank() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        CsvReportAdapter.write(&sample_table(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "filing_date,trade_date,price,adj_price,1,30,current");
        assert_eq!(lines[1], "2024-03-13 18:30:01,2024-03-11,875.5,874.5,1.5,,-2.25");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn write_empty_table_has_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let table = BacktestTable::empty(&Horizons::default());
        CsvReportAdapter.write(&table, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "filing_date,trade_date,price,adj_price,1,5,30,90,365,current");
    }
}
