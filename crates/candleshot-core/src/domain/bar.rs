use serde::{Deserialize, Serialize};

use crate::{Granularity, Symbol, UtcDateTime, ValidationError};

/// OHLCV bar record for a given granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Absent when the feed does not track volume.
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(
        timestamp: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        if let Some(volume) = volume {
            validate_non_negative("volume", volume)?;
        }

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Ordered series of bars for one symbol at one granularity.
///
/// Timestamps are strictly increasing. Gaps are tolerated: a missing bar
/// never breaks correctness downstream, it only reduces aggregate coverage.
/// A series is immutable once produced; every transformation derives a new
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub granularity: Granularity,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(
        symbol: Symbol,
        granularity: Granularity,
        bars: Vec<Bar>,
    ) -> Result<Self, ValidationError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp == pair[0].timestamp {
                return Err(ValidationError::DuplicateTimestamp { index: index + 1 });
            }
            if pair[1].timestamp < pair[0].timestamp {
                return Err(ValidationError::UnsortedSeries { index: index + 1 });
            }
        }

        Ok(Self {
            symbol,
            granularity,
            bars,
        })
    }

    pub fn empty(symbol: Symbol, granularity: Granularity) -> Self {
        Self {
            symbol,
            granularity,
            bars: Vec::new(),
        }
    }

    /// Sort ascending before constructing.
    ///
    /// Covers the vendor contract: upstream feeds may deliver bars unordered
    /// or reverse-chronological. Duplicate timestamps are still rejected.
    pub fn from_unsorted(
        symbol: Symbol,
        granularity: Granularity,
        mut bars: Vec<Bar>,
    ) -> Result<Self, ValidationError> {
        bars.sort_by_key(|bar| bar.timestamp);
        Self::new(symbol, granularity, bars)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Derive an owned contiguous sub-series covering `[start, end)`,
    /// clamped to the available bars.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.bars.len());
        let start = start.min(end);
        Self {
            symbol: self.symbol.clone(),
            granularity: self.granularity,
            bars: self.bars[start..end].to_vec(),
        }
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
