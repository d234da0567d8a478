//! Batch splitter: bounded contiguous chunking of long series.
//!
//! A series far too long for one output set is partitioned into chunks of at
//! most `batch_size` bars, and the window sequencer runs independently over
//! each chunk. Window state does not carry across a chunk boundary by
//! default; that reset is observable in the reference dataset and is kept
//! behind [`SnapshotPlan::carry_offset_across_batches`].

use serde::{Deserialize, Serialize};

use crate::window::{Window, WindowSequencer};
use crate::{BarSeries, ValidationError};

/// Parameters driving batched snapshot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPlan {
    /// Bars visible in the initial view of each batch.
    pub show_size: usize,
    /// New bars appended between snapshots.
    pub step_size: usize,
    /// Maximum bars per batch.
    pub batch_size: usize,
    /// When set, a batch's leftover step phase seeds the next batch's start
    /// offset instead of resetting to zero.
    pub carry_offset_across_batches: bool,
}

impl Default for SnapshotPlan {
    fn default() -> Self {
        Self {
            show_size: 120,
            step_size: 20,
            batch_size: 10_000,
            carry_offset_across_batches: false,
        }
    }
}

impl SnapshotPlan {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.show_size == 0 {
            return Err(ValidationError::InvalidParameter { field: "show_size" });
        }
        if self.step_size == 0 {
            return Err(ValidationError::InvalidParameter { field: "step_size" });
        }
        if self.batch_size == 0 {
            return Err(ValidationError::InvalidParameter { field: "batch_size" });
        }
        Ok(())
    }
}

/// Partition `series` into contiguous chunks of at most `batch_size` bars.
///
/// Chunk `i` covers `[i * batch_size, min((i + 1) * batch_size, len))`; the
/// last chunk may be shorter. Concatenating all chunks reproduces the input.
/// An empty series yields no chunks.
pub fn batches(series: &BarSeries, batch_size: usize) -> Result<Batches<'_>, ValidationError> {
    if batch_size == 0 {
        return Err(ValidationError::InvalidParameter { field: "batch_size" });
    }
    Ok(Batches {
        series,
        batch_size,
        next: 0,
    })
}

/// Lazy iterator of owned contiguous sub-series.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    series: &'a BarSeries,
    batch_size: usize,
    next: usize,
}

impl Iterator for Batches<'_> {
    type Item = BarSeries;

    fn next(&mut self) -> Option<BarSeries> {
        if self.next >= self.series.len() {
            return None;
        }
        let start = self.next;
        let end = (start + self.batch_size).min(self.series.len());
        self.next = end;
        Some(self.series.slice(start, end))
    }
}

/// One snapshot window inside a specific batch.
///
/// `window` indices are relative to the batch, matching the sub-series
/// yielded by [`batches`] for the same plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchWindow {
    pub batch: usize,
    pub window: Window,
}

/// Drive the window sequencer independently over each batch of `series`.
///
/// Each batch restarts at `start_offset = 0` unless
/// [`SnapshotPlan::carry_offset_across_batches`] is set, in which case the
/// stepping arithmetic continues: the next batch starts at
/// `(last snapshot_start + step_size) - batch_len`, clamped at zero.
pub fn batched_windows(
    series: &BarSeries,
    plan: &SnapshotPlan,
) -> Result<BatchedWindows, ValidationError> {
    plan.validate()?;
    Ok(BatchedWindows {
        total_len: series.len(),
        plan: *plan,
        consumed: 0,
        batch: 0,
        next_offset: 0,
        active: None,
    })
}

/// Lazy iterator over per-batch snapshot windows.
#[derive(Debug, Clone)]
pub struct BatchedWindows {
    total_len: usize,
    plan: SnapshotPlan,
    consumed: usize,
    batch: usize,
    next_offset: usize,
    active: Option<ActiveChunk>,
}

#[derive(Debug, Clone)]
struct ActiveChunk {
    seq: WindowSequencer,
    chunk_len: usize,
    offset: usize,
    last_start: Option<usize>,
}

impl Iterator for BatchedWindows {
    type Item = BatchWindow;

    fn next(&mut self) -> Option<BatchWindow> {
        loop {
            match self.active.take() {
                Some(mut chunk) => {
                    if let Some(window) = chunk.seq.next() {
                        chunk.last_start = Some(window.start);
                        let batch = self.batch;
                        self.active = Some(chunk);
                        return Some(BatchWindow { batch, window });
                    }

                    self.next_offset = if self.plan.carry_offset_across_batches {
                        match chunk.last_start {
                            Some(start) => {
                                (start + self.plan.step_size).saturating_sub(chunk.chunk_len)
                            }
                            // Chunk produced no windows: the unconsumed
                            // offset rolls forward instead.
                            None => chunk.offset.saturating_sub(chunk.chunk_len),
                        }
                    } else {
                        0
                    };
                    self.batch += 1;
                }
                None => {
                    if self.consumed >= self.total_len {
                        return None;
                    }
                    let chunk_len = (self.total_len - self.consumed).min(self.plan.batch_size);
                    self.consumed += chunk_len;
                    self.active = Some(ActiveChunk {
                        seq: WindowSequencer::unchecked(
                            chunk_len,
                            self.plan.show_size,
                            self.plan.step_size,
                            self.next_offset,
                        ),
                        chunk_len,
                        offset: self.next_offset,
                        last_start: None,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, Granularity, Symbol, UtcDateTime};

    fn series(count: usize) -> BarSeries {
        let bars = (0..count)
            .map(|i| {
                let ts =
                    UtcDateTime::from_unix_timestamp(i as i64 * 3_600).expect("in range");
                Bar::new(ts, 10.0, 11.0, 9.0, 10.5, None).expect("valid bar")
            })
            .collect();
        BarSeries::new(
            Symbol::parse("BTC-USD").expect("valid"),
            Granularity::OneHour,
            bars,
        )
        .expect("valid series")
    }

    #[test]
    fn chunks_are_contiguous_and_complete() {
        let input = series(25);
        let chunks: Vec<BarSeries> = batches(&input, 10).expect("valid").collect();
        assert_eq!(
            chunks.iter().map(BarSeries::len).collect::<Vec<_>>(),
            vec![10, 10, 5]
        );

        let rejoined: Vec<Bar> = chunks.into_iter().flat_map(|chunk| chunk.bars).collect();
        assert_eq!(rejoined, input.bars);
    }

    #[test]
    fn oversized_batch_yields_single_chunk() {
        let input = series(7);
        let chunks: Vec<BarSeries> = batches(&input, 100).expect("valid").collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], input);
    }

    #[test]
    fn empty_series_yields_no_chunks() {
        let input = BarSeries::empty(
            Symbol::parse("BTC-USD").expect("valid"),
            Granularity::OneHour,
        );
        assert_eq!(batches(&input, 10).expect("valid").count(), 0);
    }

    #[test]
    fn rejects_zero_batch_size() {
        let err = batches(&series(5), 0).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::InvalidParameter { field: "batch_size" }
        ));
    }

    #[test]
    fn default_plan_matches_reference_settings() {
        let plan = SnapshotPlan::default();
        assert_eq!(plan.show_size, 120);
        assert_eq!(plan.step_size, 20);
        assert_eq!(plan.batch_size, 10_000);
        assert!(!plan.carry_offset_across_batches);
    }

    #[test]
    fn plan_validation_rejects_zero_fields() {
        let plan = SnapshotPlan {
            batch_size: 0,
            ..SnapshotPlan::default()
        };
        assert!(matches!(
            plan.validate(),
            Err(ValidationError::InvalidParameter { field: "batch_size" })
        ));
    }
}
