//! Canonical domain models: symbols, timestamps, granularities, and bar
//! series.

mod bar;
mod granularity;
mod symbol;
mod timestamp;

pub use bar::{Bar, BarSeries};
pub use granularity::Granularity;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
