use crate::{
    Dut, Inputs, Pin, SimulationError,
    pins::Direction,
    scheduler::{ClockDef, Scheduler, SimEvent},
    time::{SimTime, TimeUnit},
    vcd::VcdWriter,
};
use log::{debug, trace};
use std::path::Path;

/// A timed simulation of a design behind the [`Dut`] trait.
///
/// Manages simulation time, the periodic clock on `clk`, the driven input
/// pins and an event queue.
pub struct Simulation<D: Dut> {
    dut: D,
    scheduler: Scheduler,
    inputs: Inputs,
    clk: u8,
    rising_edges: u64,
    vcd_writer: Option<VcdWriter>,
}

impl<D: Dut> std::fmt::Debug for Simulation<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.scheduler.time)
            .field("clk", &self.clk)
            .field("rising_edges", &self.rising_edges)
            .field("inputs", &self.inputs)
            .finish()
    }
}

impl<D: Dut> Simulation<D> {
    /// Binds `dut` to a new simulation at time zero with every pin low.
    pub fn new(dut: D) -> Self {
        Self {
            dut,
            scheduler: Scheduler::new(),
            inputs: Inputs::default(),
            clk: 0,
            rising_edges: 0,
            vcd_writer: None,
        }
    }

    pub fn dut(&self) -> &D {
        &self.dut
    }

    pub fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    pub fn into_dut(self) -> D {
        self.dut
    }

    /// Starts dumping every pin to a VCD file at `path`.
    pub fn trace_vcd<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SimulationError> {
        self.vcd_writer = Some(VcdWriter::new(path)?);
        self.dump()
    }

    /// Writes buffered waveform data out to the VCD file, if tracing.
    pub fn flush_trace(&mut self) -> Result<(), SimulationError> {
        if let Some(writer) = &mut self.vcd_writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn dump(&mut self) -> Result<(), SimulationError> {
        let time = self.scheduler.time;
        let (inputs, clk, uo_out) = (self.inputs, self.clk, self.dut.uo_out());
        if let Some(writer) = &mut self.vcd_writer {
            writer.dump(time, |pin| match pin {
                Pin::Clk => clk,
                Pin::UoOut => uo_out,
                pin => inputs.get(pin).unwrap_or_default(),
            })?;
        }
        Ok(())
    }

    /// Starts a free-running clock on `clk` with the given period in ticks.
    /// The first rising edge happens at the current time; the clock is never
    /// stopped.
    pub fn add_clock(&mut self, period: SimTime) -> Result<(), SimulationError> {
        if period < 2 || !period.is_multiple_of(2) {
            return Err(SimulationError::InvalidClockPeriod(period));
        }
        if self.scheduler.clock.is_some() {
            return Err(SimulationError::ClockAlreadyRunning);
        }
        debug!("clk: period {period}ps starting at {}ps", self.scheduler.time);
        self.scheduler.clock = Some(ClockDef { period });
        self.scheduler.push(SimEvent {
            time: self.scheduler.time,
            pin: Pin::Clk,
            next_val: 1,
        });
        Ok(())
    }

    /// Like [`Simulation::add_clock`], with the period given in `unit`.
    pub fn add_clock_in(&mut self, period: u64, unit: TimeUnit) -> Result<(), SimulationError> {
        self.add_clock(unit.to_ticks(period)?)
    }

    /// Changes driven inputs. The design samples them on the next clock edge.
    pub fn modify<F>(&mut self, f: F) -> Result<(), SimulationError>
    where
        F: FnOnce(&mut Inputs),
    {
        f(&mut self.inputs);
        self.dump()
    }

    /// Drives a single input pin, truncating `value` to the pin width.
    pub fn drive(&mut self, pin: Pin, value: u8) -> Result<(), SimulationError> {
        if !self.inputs.set(pin, value) {
            return Err(SimulationError::NotAnInput(pin));
        }
        self.dump()
    }

    /// Schedule a one-shot input change at an absolute time.
    pub fn schedule(&mut self, pin: Pin, time: SimTime, value: u8) -> Result<(), SimulationError> {
        if pin == Pin::Clk || pin.direction() == Direction::Output {
            return Err(SimulationError::NotAnInput(pin));
        }
        if time < self.scheduler.time {
            return Err(SimulationError::ScheduleInPast {
                at: time,
                now: self.scheduler.time,
            });
        }
        self.scheduler.push(SimEvent {
            time,
            pin,
            next_val: value & pin.mask(),
        });
        Ok(())
    }

    /// Advance time to the next scheduled event and process all events at that time.
    /// Returns the new simulation time, or None if no events are scheduled.
    pub fn step(&mut self) -> Result<Option<SimTime>, SimulationError> {
        let (current_time, events) = match self.scheduler.pop_all_at_next_time() {
            Some(res) => res,
            None => return Ok(None),
        };
        self.scheduler.time = current_time;

        for ev in events {
            if ev.pin != Pin::Clk {
                self.inputs.set(ev.pin, ev.next_val);
                continue;
            }

            let last = self.clk;
            self.clk = ev.next_val;
            match (last, self.clk) {
                (0, 1) => {
                    self.rising_edges += 1;
                    trace!("posedge #{} at {current_time}ps", self.rising_edges);
                    self.dut.posedge(&self.inputs);
                }
                (1, 0) => self.dut.negedge(&self.inputs),
                _ => {}
            }

            // Reschedule the clock
            if let Some(def) = &self.scheduler.clock {
                let time = current_time
                    .checked_add(def.half_period())
                    .ok_or(SimulationError::TimeOverflow(current_time))?;
                self.scheduler.push(SimEvent {
                    time,
                    pin: Pin::Clk,
                    next_val: 1 - ev.next_val,
                });
            }
        }

        self.dump()?;
        Ok(Some(current_time))
    }

    /// Advance time and run until `end_time` (inclusive).
    pub fn run_until(&mut self, end_time: SimTime) -> Result<(), SimulationError> {
        while let Some(next_time) = self.scheduler.next_event_time() {
            if next_time > end_time {
                break;
            }
            self.step()?;
        }
        self.scheduler.time = self.scheduler.time.max(end_time);
        self.dump()
    }

    /// Runs until `cycles` rising edges of `clk` have been processed.
    /// An edge pending at the current time counts as the first one.
    pub fn clock_cycles(&mut self, cycles: u64) -> Result<(), SimulationError> {
        if self.scheduler.clock.is_none() {
            return Err(SimulationError::NoClock);
        }
        let target = self.rising_edges + cycles;
        while self.rising_edges < target {
            if self.step()?.is_none() {
                return Err(SimulationError::NoClock);
            }
        }
        Ok(())
    }

    /// Current value of any pin.
    pub fn read(&self, pin: Pin) -> u8 {
        match pin {
            Pin::Clk => self.clk,
            Pin::UoOut => self.dut.uo_out(),
            pin => self.inputs.get(pin).unwrap_or_default(),
        }
    }

    pub fn uo_out(&self) -> u8 {
        self.dut.uo_out()
    }

    pub fn inputs(&self) -> Inputs {
        self.inputs
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> SimTime {
        self.scheduler.time
    }

    /// Returns the time of the next scheduled event, if any.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.scheduler.next_event_time()
    }

    /// Number of rising edges of `clk` processed so far.
    pub fn rising_edges(&self) -> u64 {
        self.rising_edges
    }
}
