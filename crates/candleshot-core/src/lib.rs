//! Core contracts for candleshot.
//!
//! This crate contains:
//! - Canonical bar-series domain models and validation
//! - The candle resampler (fine-to-coarse calendar-aligned aggregation)
//! - The window sequencer and batch splitter driving snapshot generation
//! - Boundary traits for bar sources and series stores
//!
//! Everything here is pure, synchronous computation over in-memory series;
//! fetching, persistence, and rendering live behind the boundary traits and
//! are implemented by the orchestration layer.

pub mod batch;
pub mod domain;
pub mod error;
pub mod resample;
pub mod source;
pub mod store;
pub mod window;

pub use batch::{batched_windows, batches, BatchWindow, BatchedWindows, Batches, SnapshotPlan};
pub use domain::{Bar, BarSeries, Granularity, Symbol, UtcDateTime};
pub use error::{CoreError, ValidationError};
pub use resample::resample;
pub use source::{BarSource, BarsRequest, SourceError, SourceErrorKind, MAX_FETCH_BARS};
pub use store::{BarRecord, SeriesStore, StoreError};
pub use window::{windows, Window, WindowSequencer};
