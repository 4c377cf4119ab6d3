use crate::ConfigError;
use crate::time::{SimTime, TimeUnit};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Bench settings read from a TOML file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub clock: ClockConfig,
    pub reset: ResetConfig,
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub period: u64,
    pub units: TimeUnit,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: 10,
            units: TimeUnit::Us,
        }
    }
}

impl ClockConfig {
    pub fn period_ticks(&self) -> Result<SimTime, ConfigError> {
        Ok(self.units.to_ticks(self.period)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResetConfig {
    pub hold_cycles: u64,
    pub settle_cycles: u64,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            hold_cycles: 10,
            settle_cycles: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Directory receiving one `<test>.vcd` per test.
    pub vcd_dir: Option<PathBuf>,
}

impl BenchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }
}

impl FromStr for BenchConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: BenchConfig = toml::from_str(s)?;
        config.clock.period_ticks()?;
        Ok(config)
    }
}
