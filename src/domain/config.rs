//! Export configuration.
//!
//! The config file is looked up in an ordered list of candidate locations;
//! the first one that exists is used.

use crate::domain::error::InsiderError;
use crate::ports::config_port::ConfigPort;
use std::path::{Path, PathBuf};

pub const DATA_EXPORT_PATH_KEY: &str = "data_export_path";

/// Candidate config locations, relative to the working directory.
pub const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["config.json", "InsiderAnalysis/config.json"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub data_export_path: PathBuf,
}

impl ExportConfig {
    pub fn from_config(config: &dyn ConfigPort, file: &Path) -> Result<Self, InsiderError> {
        let path = config
            .get_string(DATA_EXPORT_PATH_KEY)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| InsiderError::ConfigurationMissing {
                candidates: format!("{} (no {DATA_EXPORT_PATH_KEY})", file.display()),
            })?;
        Ok(Self {
            data_export_path: PathBuf::from(path),
        })
    }

    /// Output path for one backtest table, e.g. `NVDA_huang_jen_hsun_sales.csv`.
    pub fn export_file(&self, ticker: &str, full_name: &str, side: &str) -> PathBuf {
        let slug: Vec<String> = full_name
            .split_whitespace()
            .map(|part| {
                part.chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|part| !part.is_empty())
            .collect();
        self.data_export_path
            .join(format!("{}_{}_{}.csv", ticker.to_uppercase(), slug.join("_"), side))
    }
}

pub fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_CONFIG_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// First candidate that exists on disk.
pub fn first_existing(candidates: &[PathBuf]) -> Result<&PathBuf, InsiderError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .ok_or_else(|| InsiderError::ConfigurationMissing {
            candidates: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}
