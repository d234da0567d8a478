use thiserror::Error;

/// Validation and contract errors exposed by `candleshot-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid granularity '{value}', expected one of 1m, 5m, 15m, 1h, 4h, 6h, 1d")]
    InvalidGranularity { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix timestamp {seconds} is outside the representable range")]
    TimestampOutOfRange { seconds: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("series timestamps must be strictly increasing (violation at index {index})")]
    UnsortedSeries { index: usize },
    #[error("series contains a duplicate timestamp at index {index}")]
    DuplicateTimestamp { index: usize },

    #[error("resample multiple must be at least 2, got {multiple}")]
    InvalidMultiple { multiple: u32 },
    #[error("cannot resample '{fine}' bars by {multiple}: no matching coarse granularity")]
    InvalidResampleTarget { fine: &'static str, multiple: u32 },

    #[error("parameter '{field}' must be greater than zero")]
    InvalidParameter { field: &'static str },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
