#![allow(dead_code)]

use ttbench::{Dut, Inputs};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Minimal SPI master: `ui_in[0]` starts an 8-bit transfer of `uio_in`.
///
/// `uo_out` layout: bit 0 = sclk, bit 1 = mosi, bit 3 = cs_n, bit 2 = busy.
/// Every rising edge records the sampled `rst_n` for later inspection.
#[derive(Debug, Default)]
pub struct SpiMaster {
    cs_n: bool,
    sclk: bool,
    mosi: bool,
    shift: u8,
    bits_left: u8,
    pub rst_history: Vec<bool>,
}

impl Dut for SpiMaster {
    fn posedge(&mut self, inputs: &Inputs) {
        self.rst_history.push(inputs.rst_n);
        if inputs.in_reset() {
            self.cs_n = true;
            self.sclk = false;
            self.mosi = false;
            self.shift = 0;
            self.bits_left = 0;
            return;
        }
        if !inputs.ena {
            return;
        }
        if self.bits_left == 0 {
            if inputs.ui_in & 0x01 != 0 {
                self.cs_n = false;
                self.shift = inputs.uio_in;
                self.bits_left = 8;
            } else {
                self.cs_n = true;
                self.sclk = false;
            }
            return;
        }
        if self.sclk {
            self.sclk = false;
            self.shift <<= 1;
            self.bits_left -= 1;
        } else {
            self.mosi = self.shift & 0x80 != 0;
            self.sclk = true;
        }
    }

    fn uo_out(&self) -> u8 {
        (self.sclk as u8)
            | ((self.mosi as u8) << 1)
            | (((self.bits_left != 0) as u8) << 2)
            | ((self.cs_n as u8) << 3)
    }
}

/// Output bus tied to a constant.
#[derive(Debug, Clone, Copy)]
pub struct Stuck(pub u8);

impl Dut for Stuck {
    fn posedge(&mut self, _inputs: &Inputs) {}

    fn uo_out(&self) -> u8 {
        self.0
    }
}

/// Chip-select that only deasserts after `needed` consecutive reset cycles,
/// as a design with a reset synchroniser chain would.
#[derive(Debug)]
pub struct SlowReset {
    needed: u64,
    seen: u64,
    cs_n: bool,
}

impl SlowReset {
    pub fn new(needed: u64) -> Self {
        Self {
            needed,
            seen: 0,
            cs_n: false,
        }
    }
}

impl Dut for SlowReset {
    fn posedge(&mut self, inputs: &Inputs) {
        if inputs.in_reset() {
            self.seen += 1;
            if self.seen >= self.needed {
                self.cs_n = true;
            }
        } else {
            self.seen = 0;
        }
    }

    fn uo_out(&self) -> u8 {
        (self.cs_n as u8) << 3
    }
}

/// Counts edges in both directions.
#[derive(Debug, Default)]
pub struct EdgeCounter {
    pub rising: u64,
    pub falling: u64,
}

impl Dut for EdgeCounter {
    fn posedge(&mut self, _inputs: &Inputs) {
        self.rising += 1;
    }

    fn negedge(&mut self, _inputs: &Inputs) {
        self.falling += 1;
    }

    fn uo_out(&self) -> u8 {
        self.rising as u8
    }
}
