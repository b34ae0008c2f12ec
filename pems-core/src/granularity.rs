use crate::error::ParseError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the time-of-day buckets flow samples are resampled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[default]
    #[serde(rename = "1H")]
    OneHour,
}

impl Granularity {
    /// All granularities in the order they are offered in the selector.
    pub const ALL: [Granularity; 3] = [
        Granularity::FifteenMinutes,
        Granularity::ThirtyMinutes,
        Granularity::OneHour,
    ];

    pub fn minutes(&self) -> i64 {
        match self {
            Granularity::FifteenMinutes => 15,
            Granularity::ThirtyMinutes => 30,
            Granularity::OneHour => 60,
        }
    }

    pub fn width(&self) -> TimeDelta {
        TimeDelta::minutes(self.minutes())
    }

    /// Short code, as used by the selector options: "15min", "30min", "1H".
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::FifteenMinutes => "15min",
            Granularity::ThirtyMinutes => "30min",
            Granularity::OneHour => "1H",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "15min" | "15 min" | "15" => Ok(Granularity::FifteenMinutes),
            "30min" | "30 min" | "30" => Ok(Granularity::ThirtyMinutes),
            "1h" | "1 hour" | "60min" | "60" => Ok(Granularity::OneHour),
            _ => Err(ParseError::new("granularity", s)),
        }
    }
}
