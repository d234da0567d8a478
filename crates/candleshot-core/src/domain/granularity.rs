use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Supported bar intervals.
///
/// `FourHours` is the derived timeframe: the upstream feed does not serve it
/// directly, so it only ever appears as resampler output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Granularity {
    pub const ALL: [Self; 7] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::OneHour,
        Self::FourHours,
        Self::SixHours,
        Self::OneDay,
    ];

    /// Nominal bar duration in seconds.
    pub const fn secs(self) -> u32 {
        match self {
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::OneHour => 3_600,
            Self::FourHours => 14_400,
            Self::SixHours => 21_600,
            Self::OneDay => 86_400,
        }
    }

    /// Reverse lookup by duration; used to derive the coarse granularity
    /// when resampling.
    pub const fn from_secs(secs: u32) -> Option<Self> {
        match secs {
            60 => Some(Self::OneMinute),
            300 => Some(Self::FiveMinutes),
            900 => Some(Self::FifteenMinutes),
            3_600 => Some(Self::OneHour),
            14_400 => Some(Self::FourHours),
            21_600 => Some(Self::SixHours),
            86_400 => Some(Self::OneDay),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::SixHours => "6h",
            Self::OneDay => "1d",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Self::OneMinute),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "1h" => Ok(Self::OneHour),
            "4h" => Ok(Self::FourHours),
            "6h" => Ok(Self::SixHours),
            "1d" => Ok(Self::OneDay),
            other => Err(ValidationError::InvalidGranularity {
                value: other.to_owned(),
            }),
        }
    }
}
