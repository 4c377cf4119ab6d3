mod config;
mod dut;
mod error;
pub mod harness;
mod pins;
pub mod reset_check;
mod scheduler;
mod simulation;
pub mod time;
mod vcd;

pub use config::{BenchConfig, ClockConfig, ResetConfig, TraceConfig};
pub use dut::Dut;
pub use error::{AssertionFailure, ConfigError, HarnessError, SimulationError, TestError};
pub use harness::{Harness, Outcome, Report, TestResult};
pub use pins::{Direction, Inputs, Pin};
pub use reset_check::{ResetCheck, test_project};
pub use simulation::Simulation;
pub use time::{SimTime, TimeError, TimeUnit};
