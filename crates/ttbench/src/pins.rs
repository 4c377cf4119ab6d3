use std::fmt;

/// Top-level ports of a Tiny Tapeout style user design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pin {
    Clk,
    RstN,
    Ena,
    UiIn,
    UioIn,
    UoOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Pin {
    pub const ALL: [Pin; 6] = [
        Pin::Clk,
        Pin::RstN,
        Pin::Ena,
        Pin::UiIn,
        Pin::UioIn,
        Pin::UoOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pin::Clk => "clk",
            Pin::RstN => "rst_n",
            Pin::Ena => "ena",
            Pin::UiIn => "ui_in",
            Pin::UioIn => "uio_in",
            Pin::UoOut => "uo_out",
        }
    }

    pub fn width(self) -> u32 {
        match self {
            Pin::Clk | Pin::RstN | Pin::Ena => 1,
            Pin::UiIn | Pin::UioIn | Pin::UoOut => 8,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Pin::UoOut => Direction::Output,
            _ => Direction::Input,
        }
    }

    /// Mask of the bits this pin can carry.
    pub fn mask(self) -> u8 {
        if self.width() == 1 { 0x01 } else { 0xff }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values currently driven onto the design's inputs by the testbench.
///
/// Single-bit pins are stored as `bool`; the bus inputs are 8 bits wide.
/// The DUT samples a copy of this on every clock edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    pub rst_n: bool,
    pub ena: bool,
    pub ui_in: u8,
    pub uio_in: u8,
}

impl Inputs {
    /// Returns true while the active-low reset is asserted.
    pub fn in_reset(&self) -> bool {
        !self.rst_n
    }

    /// Writes `value` to `pin`, truncated to the pin width.
    /// Returns false if `pin` is not a testbench-driven input.
    pub(crate) fn set(&mut self, pin: Pin, value: u8) -> bool {
        let value = value & pin.mask();
        match pin {
            Pin::RstN => self.rst_n = value != 0,
            Pin::Ena => self.ena = value != 0,
            Pin::UiIn => self.ui_in = value,
            Pin::UioIn => self.uio_in = value,
            Pin::Clk | Pin::UoOut => return false,
        }
        true
    }

    pub(crate) fn get(&self, pin: Pin) -> Option<u8> {
        match pin {
            Pin::RstN => Some(self.rst_n as u8),
            Pin::Ena => Some(self.ena as u8),
            Pin::UiIn => Some(self.ui_in),
            Pin::UioIn => Some(self.uio_in),
            Pin::Clk | Pin::UoOut => None,
        }
    }
}
