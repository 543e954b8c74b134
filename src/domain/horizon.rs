//! Forward horizons, in calendar days, for post-trade returns.

use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_HORIZONS: [u32; 5] = [1, 5, 30, 90, 365];

/// Ordered set of positive day offsets. Caller order is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Horizons(Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HorizonError {
    #[error("empty token in horizon list")]
    EmptyToken,

    #[error("invalid horizon: {0}")]
    Invalid(String),

    #[error("duplicate horizon: {0}")]
    Duplicate(u32),

    #[error("no horizons given")]
    Empty,
}

impl Horizons {
    pub fn new(days: Vec<u32>) -> Result<Self, HorizonError> {
        if days.is_empty() {
            return Err(HorizonError::Empty);
        }
        let mut seen = HashSet::new();
        for &d in &days {
            if d == 0 {
                return Err(HorizonError::Invalid(d.to_string()));
            }
            if !seen.insert(d) {
                return Err(HorizonError::Duplicate(d));
            }
        }
        Ok(Self(days))
    }

    /// Parse a comma-separated list such as `1,5,30`.
    pub fn parse(input: &str) -> Result<Self, HorizonError> {
        let mut days = Vec::new();
        for token in input.split(',') {
            let trimmed = token.trim();
            if trimmed.is_empty() {
                return Err(HorizonError::EmptyToken);
            }
            let day: u32 = trimmed
                .parse()
                .map_err(|_| HorizonError::Invalid(trimmed.to_string()))?;
            days.push(day);
        }
        Self::new(days)
    }

    pub fn days(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Horizons {
    fn default() -> Self {
        Self(DEFAULT_HORIZONS.to_vec())
    }
}

impl fmt::Display for Horizons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}
