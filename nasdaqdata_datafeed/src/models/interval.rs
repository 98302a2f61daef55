//! Bar intervals as the host framework names them, and the subset this
//! provider can serve.
//!
//! [`Interval`] mirrors the host's interval enum. Only minute, hour and daily
//! bars have a Nasdaq counterpart; [`IntervalSpec`] is the checked form that
//! carries the provider granularity code and the close-to-open adjustment.

use std::{fmt, str::FromStr};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Unsupported interval for NasdaqData: {0}")]
    Unsupported(Interval),

    #[error("Invalid interval: {input:?}")]
    InvalidInput { input: String },
}

/// Bar interval in the host framework's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Tick,
    Minute,
    Hour,
    Daily,
    Weekly,
}

impl Interval {
    /// Host-side short code (`"1m"`, `"1h"`, `"d"`, `"w"`, `"tick"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Interval::Tick => "tick",
            Interval::Minute => "1m",
            Interval::Hour => "1h",
            Interval::Daily => "d",
            Interval::Weekly => "w",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tick" => Ok(Interval::Tick),
            "1m" | "m" | "min" | "minute" => Ok(Interval::Minute),
            "1h" | "60m" | "h" | "hour" => Ok(Interval::Hour),
            "d" | "1d" | "day" | "daily" => Ok(Interval::Daily),
            "w" | "1w" | "week" | "weekly" => Ok(Interval::Weekly),
            _ => Err(IntervalError::InvalidInput {
                input: s.to_string(),
            }),
        }
    }
}

/// An interval the provider supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalSpec {
    Minute,
    Hour,
    Daily,
}

impl IntervalSpec {
    /// Granularity code used on the provider side.
    pub const fn provider_code(&self) -> &'static str {
        match self {
            IntervalSpec::Minute => "1m",
            IntervalSpec::Hour => "60m",
            IntervalSpec::Daily => "1d",
        }
    }

    /// Gap between a bar's close stamp (provider) and its open stamp (host).
    pub fn adjustment(&self) -> TimeDelta {
        match self {
            IntervalSpec::Minute => TimeDelta::minutes(1),
            IntervalSpec::Hour => TimeDelta::hours(1),
            // daily bars are already stamped by calendar day
            IntervalSpec::Daily => TimeDelta::zero(),
        }
    }

    pub const fn interval(&self) -> Interval {
        match self {
            IntervalSpec::Minute => Interval::Minute,
            IntervalSpec::Hour => Interval::Hour,
            IntervalSpec::Daily => Interval::Daily,
        }
    }
}

impl TryFrom<Interval> for IntervalSpec {
    type Error = IntervalError;

    fn try_from(interval: Interval) -> Result<Self, Self::Error> {
        match interval {
            Interval::Minute => Ok(IntervalSpec::Minute),
            Interval::Hour => Ok(IntervalSpec::Hour),
            Interval::Daily => Ok(IntervalSpec::Daily),
            other => Err(IntervalError::Unsupported(other)),
        }
    }
}
