//! Candle resampler: fine-to-coarse calendar-aligned aggregation.
//!
//! Aggregates groups of hourly bars into one coarse bar per calendar bucket.
//! A bucket opens at a bar whose wall-clock hour is evenly divisible by the
//! multiple and closes when the next such bar arrives, so missing bars never
//! desynchronize bucket boundaries.

use crate::source::MAX_FETCH_BARS;
use crate::{Bar, BarSeries, Granularity, UtcDateTime, ValidationError};

/// Aggregate `multiple` consecutive fine bars into one coarse bar.
///
/// The fine series must be hourly: bucket alignment keys off hour-of-day,
/// which is only meaningful for hourly input. The coarse granularity is
/// derived from `fine duration * multiple` and must be a supported
/// [`Granularity`] (the shipped case is 1h x 4 = 4h).
///
/// Output is capped at `MAX_FETCH_BARS / multiple` coarse bars, mirroring
/// the upstream fetch-page size of 300 fine bars per call.
///
/// Bars before the first bucket boundary are discarded. A trailing bucket is
/// emitted only when it holds a full `multiple` bars; a shorter remainder is
/// an incomplete candle and is dropped. Empty input, or input with no bar on
/// a bucket boundary, yields an empty series.
pub fn resample(fine: &BarSeries, multiple: u32) -> Result<BarSeries, ValidationError> {
    if multiple < 2 {
        return Err(ValidationError::InvalidMultiple { multiple });
    }

    let coarse = fine
        .granularity
        .secs()
        .checked_mul(multiple)
        .and_then(Granularity::from_secs)
        .filter(|_| fine.granularity == Granularity::OneHour)
        .ok_or(ValidationError::InvalidResampleTarget {
            fine: fine.granularity.as_str(),
            multiple,
        })?;

    let cap = (MAX_FETCH_BARS / multiple) as usize;
    let mut coarse_bars = Vec::with_capacity(cap.min(fine.len() / multiple as usize + 1));
    let mut bucket: Option<Bucket> = None;

    for bar in &fine.bars {
        let on_boundary = u32::from(bar.timestamp.hour()) % multiple == 0;
        if on_boundary {
            if let Some(done) = bucket.take() {
                coarse_bars.push(done.into_bar()?);
                if coarse_bars.len() == cap {
                    break;
                }
            }
            bucket = Some(Bucket::open_with(bar));
        } else if let Some(open) = bucket.as_mut() {
            open.fold(bar);
        }
        // bars before the first boundary fall through untouched
    }

    // A trailing bucket never sees its closing boundary; it only counts as
    // complete when the full multiple of bars arrived.
    if coarse_bars.len() < cap {
        if let Some(tail) = bucket {
            if tail.count == multiple {
                coarse_bars.push(tail.into_bar()?);
            }
        }
    }

    BarSeries::new(fine.symbol.clone(), coarse, coarse_bars)
}

/// Running aggregate over one calendar bucket.
struct Bucket {
    timestamp: UtcDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
    count: u32,
}

impl Bucket {
    fn open_with(bar: &Bar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            count: 1,
        }
    }

    fn fold(&mut self, bar: &Bar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        // Bars without volume are excluded from the sum only; a bucket where
        // no bar carries volume stays untracked.
        self.volume = match (self.volume, bar.volume) {
            (Some(acc), Some(value)) => Some(acc + value),
            (Some(acc), None) => Some(acc),
            (None, value) => value,
        };
        self.count += 1;
    }

    fn into_bar(self) -> Result<Bar, ValidationError> {
        Bar::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}
