//! Core domain types and logic.

pub mod analysis;
pub mod backtest;
pub mod classifier;
pub mod config;
pub mod error;
pub mod horizon;
pub mod price_series;
pub mod summary;
pub mod trade;
