//! Named test registration and execution.
//!
//! Each registered test runs on its own [`Simulation`] around a freshly built
//! design, so results do not depend on run order.

use crate::reset_check::ResetCheck;
use crate::time::SimTime;
use crate::{BenchConfig, ConfigError, Dut, HarnessError, Simulation, TestError};
use log::{error, info};
use std::fmt;
use std::path::PathBuf;

pub type TestFn<D> = Box<dyn Fn(&mut Simulation<D>) -> Result<(), TestError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub outcome: Outcome,
    /// Simulation time when the test returned.
    pub sim_time: SimTime,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub results: Vec<TestResult>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.results {
            match &r.outcome {
                Outcome::Passed => writeln!(f, "{} PASS ({}ps)", r.name, r.sim_time)?,
                Outcome::Failed(msg) => writeln!(f, "{} FAIL ({}ps): {msg}", r.name, r.sim_time)?,
            }
        }
        write!(
            f,
            "TESTS={} PASS={} FAIL={}",
            self.results.len(),
            self.passed(),
            self.failed()
        )
    }
}

pub struct Harness<D: Dut> {
    factory: Box<dyn FnMut() -> D>,
    tests: Vec<(String, TestFn<D>)>,
    vcd_dir: Option<PathBuf>,
}

impl<D: Dut> fmt::Debug for Harness<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("tests", &self.names())
            .field("vcd_dir", &self.vcd_dir)
            .finish()
    }
}

impl<D: Dut> Harness<D> {
    /// `factory` builds a fresh design for every test run.
    pub fn new(factory: impl FnMut() -> D + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            tests: Vec::new(),
            vcd_dir: None,
        }
    }

    /// A harness with `test_project` registered, timed and traced per `config`.
    pub fn from_config(
        factory: impl FnMut() -> D + 'static,
        config: &BenchConfig,
    ) -> Result<Self, ConfigError> {
        let check = ResetCheck::from_config(config)?;
        let mut harness = Self::new(factory);
        harness.vcd_dir = config.trace.vcd_dir.clone();
        let test: TestFn<D> = Box::new(move |sim: &mut Simulation<D>| check.run(sim));
        harness.tests.push(("test_project".to_string(), test));
        Ok(harness)
    }

    /// Writes `<dir>/<test name>.vcd` for every test run.
    pub fn trace_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vcd_dir = Some(dir.into());
        self
    }

    pub fn register<F>(&mut self, name: &str, test: F) -> Result<&mut Self, HarnessError>
    where
        F: Fn(&mut Simulation<D>) -> Result<(), TestError> + 'static,
    {
        if self.tests.iter().any(|(n, _)| n == name) {
            return Err(HarnessError::DuplicateTest(name.to_string()));
        }
        self.tests.push((name.to_string(), Box::new(test)));
        Ok(self)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Runs every registered test in registration order.
    pub fn run(&mut self) -> Report {
        let mut report = Report::default();
        for idx in 0..self.tests.len() {
            report.results.push(self.run_at(idx));
        }
        info!(
            "{} tests, {} passed, {} failed",
            report.results.len(),
            report.passed(),
            report.failed()
        );
        report
    }

    pub fn run_test(&mut self, name: &str) -> Result<TestResult, HarnessError> {
        let idx = self
            .tests
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| HarnessError::UnknownTest(name.to_string()))?;
        Ok(self.run_at(idx))
    }

    fn run_at(&mut self, idx: usize) -> TestResult {
        let (name, test) = &self.tests[idx];
        info!("running {name}");
        let mut sim = Simulation::new((self.factory)());

        let outcome = match Self::execute(&mut sim, name, test, self.vcd_dir.as_ref()) {
            Ok(()) => {
                info!("{name} passed at {}ps", sim.time());
                Outcome::Passed
            }
            Err(e) => {
                error!("{name} failed at {}ps: {e}", sim.time());
                Outcome::Failed(e.to_string())
            }
        };
        TestResult {
            name: name.clone(),
            outcome,
            sim_time: sim.time(),
        }
    }

    fn execute(
        sim: &mut Simulation<D>,
        name: &str,
        test: &TestFn<D>,
        vcd_dir: Option<&PathBuf>,
    ) -> Result<(), TestError> {
        if let Some(dir) = vcd_dir {
            sim.trace_vcd(dir.join(format!("{name}.vcd")))?;
        }
        let result = test(sim);
        sim.flush_trace()?;
        result
    }
}
