//! Bar source boundary contract.
//!
//! The core never performs I/O; an orchestration layer implements
//! [`BarSource`] against a vendor API and hands the core already-materialized
//! series. No concrete adapter ships with this crate.

use std::fmt::{Display, Formatter};

use crate::{BarSeries, Granularity, Symbol, UtcDateTime};

/// Maximum bars a single upstream fetch returns.
///
/// This is a hard page size on the vendor side; the resampler's output cap
/// derives from it.
pub const MAX_FETCH_BARS: u32 = 300;

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured error reported by bar sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for a bar fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    pub symbol: Symbol,
    pub granularity: Granularity,
    pub start: UtcDateTime,
    pub end: UtcDateTime,
}

impl BarsRequest {
    pub fn new(
        symbol: Symbol,
        granularity: Granularity,
        start: UtcDateTime,
        end: UtcDateTime,
    ) -> Result<Self, SourceError> {
        if start >= end {
            return Err(SourceError::invalid_request(
                "bars request start must precede end",
            ));
        }
        Ok(Self {
            symbol,
            granularity,
            start,
            end,
        })
    }
}

/// Bar source contract.
///
/// Implementations return at most [`MAX_FETCH_BARS`] bars per call and must
/// deliver the series sorted ascending; vendors that answer
/// reverse-chronological can normalize through
/// [`BarSeries::from_unsorted`](crate::BarSeries::from_unsorted).
pub trait BarSource: Send + Sync {
    fn fetch_bars(&self, req: &BarsRequest) -> Result<BarSeries, SourceError>;
}
