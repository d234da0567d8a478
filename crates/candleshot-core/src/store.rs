//! Series persistence boundary contract.
//!
//! Persistence is the orchestration layer's concern; the core only defines
//! the row shape and the store seam. No concrete backend ships with this
//! crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Bar, BarSeries, Granularity, Symbol, UtcDateTime, ValidationError};

/// Errors reported by series stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read series: {0}")]
    Read(String),

    #[error("failed to write series: {0}")]
    Write(String),

    #[error("stored data is invalid")]
    Corrupt(#[from] ValidationError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Tabular row for one bar: `date, open, high, low, close[, volume]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    pub date: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl From<&Bar> for BarRecord {
    fn from(bar: &Bar) -> Self {
        Self {
            date: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl TryFrom<BarRecord> for Bar {
    type Error = ValidationError;

    fn try_from(record: BarRecord) -> Result<Self, Self::Error> {
        Bar::new(
            record.date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        )
    }
}

/// Series store contract.
pub trait SeriesStore: Send + Sync {
    fn save(&self, series: &BarSeries) -> Result<(), StoreError>;
    fn load(&self, symbol: &Symbol, granularity: Granularity) -> Result<BarSeries, StoreError>;
}
