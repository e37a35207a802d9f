//! Port function select
//!
//! Pins default to GPIO inputs. Handing a pin to a peripheral module means
//! setting its PxSEL bit; PxDIR then picks which way the module drives it.

use msp430_demos_hal::{Pins, RegisterBus};

use crate::device::PortRegisters;

/// One 8-bit digital I/O port
pub struct Port<B> {
    bus: B,
    regs: PortRegisters,
}

impl<B: RegisterBus> Port<B> {
    pub const fn new(bus: B, regs: PortRegisters) -> Self {
        Self { bus, regs }
    }

    /// Hand `pins` to their peripheral module as outputs
    ///
    /// Used for clock outputs (MCLK, ACLK) where the module drives the pin.
    pub fn select_peripheral_output(&mut self, pins: Pins) {
        self.bus.set_bits8(self.regs.dir, pins.bits());
        self.bus.set_bits8(self.regs.sel, pins.bits());
    }

    /// Hand `pins` to their peripheral module as inputs
    ///
    /// USCI pins only need the select bit; the module takes over direction.
    pub fn select_peripheral_input(&mut self, pins: Pins) {
        self.bus.set_bits8(self.regs.sel, pins.bits());
        self.bus.clear_bits8(self.regs.dir, pins.bits());
    }

    /// Pins currently assigned to a peripheral module
    pub fn peripheral_pins(&self) -> Pins {
        Pins::from_bits(self.bus.read8(self.regs.sel))
    }

    /// Pins currently set as outputs
    pub fn output_pins(&self) -> Pins {
        Pins::from_bits(self.bus.read8(self.regs.dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{f41x, f5438a};
    use msp430_demos_hal::RegisterFile;

    #[test]
    fn test_clock_outputs_on_p1() {
        let mut regs = RegisterFile::new();
        let mut port = Port::new(&mut regs, f41x::PORT1);
        port.select_peripheral_output(Pins::P1 | Pins::P5);

        assert_eq!(port.peripheral_pins().bits(), 0x22);
        assert_eq!(port.output_pins().bits(), 0x22);
    }

    #[test]
    fn test_uart_pins_on_p3_leave_other_pins_alone() {
        let mut regs = RegisterFile::new();
        regs.preset8(f5438a::PORT3.dir, 0x31);
        regs.preset8(f5438a::PORT3.sel, 0x01);

        Port::new(&mut regs, f5438a::PORT3).select_peripheral_input(Pins::P4 | Pins::P5);

        assert_eq!(regs.read8(f5438a::PORT3.sel), 0x31);
        assert_eq!(regs.read8(f5438a::PORT3.dir), 0x01);
    }
}
