use crate::pins::Pin;
use crate::time::SimTime;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
pub struct ClockDef {
    pub period: SimTime,
}

impl ClockDef {
    pub fn half_period(&self) -> SimTime {
        self.period / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimEvent {
    pub time: SimTime,
    pub pin: Pin,
    pub next_val: u8,
}

impl SimEvent {
    fn is_clock(&self) -> bool {
        self.pin == Pin::Clk
    }
}

impl PartialOrd for SimEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Earlier time has higher priority (BinaryHeap is a Max-Heap).
        // At equal time, input changes are applied before the clock edge.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.is_clock().cmp(&self.is_clock()))
            .then_with(|| other.pin.cmp(&self.pin))
            .then_with(|| other.next_val.cmp(&self.next_val))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pub(crate) time: SimTime,
    pub(crate) clock: Option<ClockDef>,
    pub(crate) event_queue: BinaryHeap<SimEvent>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|e| e.time)
    }

    pub fn push(&mut self, event: SimEvent) {
        self.event_queue.push(event);
    }

    pub fn pop_all_at_next_time(&mut self) -> Option<(SimTime, Vec<SimEvent>)> {
        let next_time = self.next_event_time()?;
        let mut events = Vec::new();
        while self.next_event_time() == Some(next_time) {
            if let Some(ev) = self.event_queue.pop() {
                events.push(ev);
            }
        }
        Some((next_time, events))
    }
}
