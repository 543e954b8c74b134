//! Backtest table output port trait.

use crate::domain::backtest::BacktestTable;
use crate::domain::error::InsiderError;
use std::path::Path;

/// Port for writing backtest result tables.
pub trait ReportPort {
    fn write(&self, table: &BacktestTable, output_path: &Path) -> Result<(), InsiderError>;
}
