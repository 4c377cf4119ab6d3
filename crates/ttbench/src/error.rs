use crate::pins::Pin;
use crate::time::{SimTime, TimeError};
use thiserror::Error;

/// A check made by a test did not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
    /// The observed value that failed the check.
    pub value: u64,
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("no clock is running on `clk`")]
    NoClock,
    #[error("a clock is already running on `clk`")]
    ClockAlreadyRunning,
    #[error("clock period of {0} ticks must be an even number of at least 2 ticks")]
    InvalidClockPeriod(SimTime),
    #[error("`{0}` is not a testbench-driven input")]
    NotAnInput(Pin),
    #[error("cannot schedule an event at {at} before the current time {now}")]
    ScheduleInPast { at: SimTime, now: SimTime },
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("clock edge after {0}ps is past the end of simulation time")]
    TimeOverflow(SimTime),
    #[error("waveform dump failed: {0}")]
    Vcd(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("a test named `{0}` is already registered")]
    DuplicateTest(String),
    #[error("no test named `{0}` is registered")]
    UnknownTest(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read bench config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse bench config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Time(#[from] TimeError),
}
