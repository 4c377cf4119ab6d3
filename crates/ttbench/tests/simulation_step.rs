mod common;

use common::{EdgeCounter, SpiMaster};
use ttbench::{Pin, Simulation, SimulationError, TimeUnit};

#[test]
fn test_simulation_step() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.add_clock(10).unwrap();

    // Step 0: clk 0 -> 1 at t=0.
    assert_eq!(sim.step().unwrap(), Some(0));
    assert_eq!(sim.read(Pin::Clk), 1);
    assert_eq!(sim.dut().rising, 1);

    // Step 1: clk 1 -> 0 at t=5
    assert_eq!(sim.step().unwrap(), Some(5));
    assert_eq!(sim.read(Pin::Clk), 0);
    assert_eq!(sim.dut().falling, 1);

    // Step 2: clk 0 -> 1 at t=10
    assert_eq!(sim.step().unwrap(), Some(10));
    assert_eq!(sim.dut().rising, 2);
    assert_eq!(sim.rising_edges(), 2);
}

#[test]
fn test_next_event_time() {
    let mut sim = Simulation::new(EdgeCounter::default());
    assert_eq!(sim.next_event_time(), None);
    assert_eq!(sim.step().unwrap(), None);

    sim.add_clock(100).unwrap();
    assert_eq!(sim.next_event_time(), Some(0));
    sim.step().unwrap();
    assert_eq!(sim.next_event_time(), Some(50));
    sim.step().unwrap();
    assert_eq!(sim.next_event_time(), Some(100));
}

#[test]
fn clock_starts_at_current_time() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.run_until(33).unwrap();
    assert_eq!(sim.time(), 33);

    sim.add_clock(10).unwrap();
    assert_eq!(sim.next_event_time(), Some(33));
    sim.clock_cycles(2).unwrap();
    assert_eq!(sim.time(), 43);
}

#[test]
fn clock_cycles_counts_rising_edges() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.add_clock_in(10, TimeUnit::Us).unwrap();

    sim.clock_cycles(10).unwrap();
    assert_eq!(sim.dut().rising, 10);
    assert_eq!(sim.dut().falling, 9);
    assert_eq!(sim.time(), 90_000_000);

    sim.clock_cycles(0).unwrap();
    assert_eq!(sim.time(), 90_000_000);

    sim.clock_cycles(1).unwrap();
    assert_eq!(sim.time(), 100_000_000);
}

#[test]
fn clock_cycles_without_clock() {
    let mut sim = Simulation::new(EdgeCounter::default());
    assert!(matches!(
        sim.clock_cycles(1),
        Err(SimulationError::NoClock)
    ));
}

#[test]
fn second_clock_is_rejected() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.add_clock(10).unwrap();
    assert!(matches!(
        sim.add_clock(10),
        Err(SimulationError::ClockAlreadyRunning)
    ));
}

#[test]
fn odd_or_tiny_periods_are_rejected() {
    let mut sim = Simulation::new(EdgeCounter::default());
    for period in [0, 1, 7] {
        assert!(matches!(
            sim.add_clock(period),
            Err(SimulationError::InvalidClockPeriod(p)) if p == period
        ));
    }
    assert!(matches!(
        sim.add_clock_in(u64::MAX, TimeUnit::Sec),
        Err(SimulationError::Time(_))
    ));
}

#[test]
fn inputs_are_sampled_on_next_edge() {
    let mut sim = Simulation::new(SpiMaster::default());
    sim.add_clock(10).unwrap();
    sim.modify(|io| io.ena = true).unwrap();
    sim.clock_cycles(1).unwrap();
    sim.drive(Pin::RstN, 1).unwrap();
    assert_eq!(sim.dut().rst_history, vec![false]);

    sim.clock_cycles(1).unwrap();
    assert_eq!(sim.dut().rst_history, vec![false, true]);
}

#[test]
fn drive_rejects_clock_and_outputs() {
    let mut sim = Simulation::new(SpiMaster::default());
    for pin in [Pin::Clk, Pin::UoOut] {
        assert!(matches!(
            sim.drive(pin, 1),
            Err(SimulationError::NotAnInput(p)) if p == pin
        ));
    }
}

#[test]
fn scheduled_input_lands_before_coincident_edge() {
    let mut sim = Simulation::new(SpiMaster::default());
    sim.add_clock(10).unwrap();
    sim.schedule(Pin::RstN, 20, 1).unwrap();
    sim.clock_cycles(4).unwrap();
    assert_eq!(sim.dut().rst_history, vec![false, false, true, true]);
}

#[test]
fn schedule_rejects_past_and_non_inputs() {
    let mut sim = Simulation::new(SpiMaster::default());
    sim.run_until(100).unwrap();
    assert!(matches!(
        sim.schedule(Pin::UiIn, 50, 1),
        Err(SimulationError::ScheduleInPast { at: 50, now: 100 })
    ));
    assert!(matches!(
        sim.schedule(Pin::Clk, 150, 1),
        Err(SimulationError::NotAnInput(Pin::Clk))
    ));
}

#[test]
fn spi_transfer_drops_chip_select() {
    let mut sim = Simulation::new(SpiMaster::default());
    sim.add_clock(10).unwrap();
    sim.modify(|io| io.ena = true).unwrap();
    sim.clock_cycles(2).unwrap();
    sim.modify(|io| {
        io.rst_n = true;
        io.uio_in = 0xa5;
        io.ui_in = 0x01;
    })
    .unwrap();
    sim.clock_cycles(1).unwrap();
    assert_eq!(sim.uo_out() & 0x08, 0);
    assert_eq!(sim.uo_out() & 0x04, 0x04);
}

#[test]
fn run_until_includes_events_at_end_time() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.add_clock(10).unwrap();

    sim.run_until(9).unwrap();
    assert_eq!(sim.rising_edges(), 1);
    assert_eq!(sim.time(), 9);
    assert_eq!(sim.next_event_time(), Some(10));

    sim.run_until(10).unwrap();
    assert_eq!(sim.rising_edges(), 2);
    assert_eq!(sim.dut().falling, 1);
    assert_eq!(sim.time(), 10);
    assert_eq!(sim.next_event_time(), Some(15));
}

#[test]
fn clock_past_end_of_time_is_an_error() {
    let mut sim = Simulation::new(EdgeCounter::default());
    sim.add_clock_in(18_000_000, TimeUnit::Sec).unwrap();

    // Edges at 0 and 9e18 fit, the one after 1.8e19 does not.
    assert_eq!(sim.step().unwrap(), Some(0));
    assert!(sim.step().unwrap().is_some());
    assert!(matches!(
        sim.step(),
        Err(SimulationError::TimeOverflow(18_000_000_000_000_000_000))
    ));
    assert_eq!(sim.time(), 18_000_000_000_000_000_000);
}
