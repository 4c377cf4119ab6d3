use crate::pins::Inputs;

/// Behavioural model of the design under test.
///
/// The simulation owns the clock and the input pins. It calls [`Dut::posedge`]
/// on every rising edge of `clk` with the inputs driven at that instant, and
/// reads outputs back through [`Dut::uo_out`].
pub trait Dut {
    fn posedge(&mut self, inputs: &Inputs);

    /// Called on every falling edge of `clk`. Most designs are purely
    /// rising-edge triggered.
    fn negedge(&mut self, _inputs: &Inputs) {}

    fn uo_out(&self) -> u8;
}

impl<D: Dut + ?Sized> Dut for Box<D> {
    fn posedge(&mut self, inputs: &Inputs) {
        (**self).posedge(inputs)
    }

    fn negedge(&mut self, inputs: &Inputs) {
        (**self).negedge(inputs)
    }

    fn uo_out(&self) -> u8 {
        (**self).uo_out()
    }
}
