use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Simulated time in base ticks. One tick is one picosecond.
pub type SimTime = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("unknown time unit `{0}`")]
    UnknownUnit(String),
    #[error("time unit `{0}` is finer than the 1ps simulation resolution")]
    BelowResolution(String),
    #[error("{value}{unit} does not fit in the simulation time range")]
    Overflow { value: u64, unit: TimeUnit },
}

/// Units accepted when expressing clock periods and delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeUnit {
    Ps,
    Ns,
    Us,
    Ms,
    Sec,
}

impl TimeUnit {
    /// Number of base ticks in one unit.
    pub fn ticks(self) -> SimTime {
        match self {
            TimeUnit::Ps => 1,
            TimeUnit::Ns => 1_000,
            TimeUnit::Us => 1_000_000,
            TimeUnit::Ms => 1_000_000_000,
            TimeUnit::Sec => 1_000_000_000_000,
        }
    }

    /// Converts `value` expressed in this unit into base ticks.
    pub fn to_ticks(self, value: u64) -> Result<SimTime, TimeError> {
        value
            .checked_mul(self.ticks())
            .ok_or(TimeError::Overflow { value, unit: self })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Ps => "ps",
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::Sec => "sec",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeUnit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ps" => Ok(TimeUnit::Ps),
            "ns" => Ok(TimeUnit::Ns),
            "us" => Ok(TimeUnit::Us),
            "ms" => Ok(TimeUnit::Ms),
            "sec" | "s" => Ok(TimeUnit::Sec),
            "fs" => Err(TimeError::BelowResolution(s.to_string())),
            _ => Err(TimeError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
