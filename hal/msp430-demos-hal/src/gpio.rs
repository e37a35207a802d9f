//! GPIO pin masks
//!
//! MSP430 ports are eight pins wide and every port register takes a bit
//! mask, so pins are passed around as a mask rather than one at a time.

use core::ops::BitOr;

/// Set of pins within one 8-bit port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pins(u8);

impl Pins {
    pub const NONE: Pins = Pins(0);
    pub const P0: Pins = Pins(1 << 0);
    pub const P1: Pins = Pins(1 << 1);
    pub const P2: Pins = Pins(1 << 2);
    pub const P3: Pins = Pins(1 << 3);
    pub const P4: Pins = Pins(1 << 4);
    pub const P5: Pins = Pins(1 << 5);
    pub const P6: Pins = Pins(1 << 6);
    pub const P7: Pins = Pins(1 << 7);

    /// Build a mask from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw mask for register writes
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every pin in `other` is also in `self`
    pub const fn contains(self, other: Pins) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Pins {
    type Output = Pins;

    fn bitor(self, rhs: Pins) -> Pins {
        Pins(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_pins() {
        let clocks = Pins::P1 | Pins::P5;
        assert_eq!(clocks.bits(), 0x22);
        assert!(clocks.contains(Pins::P5));
        assert!(!clocks.contains(Pins::P4));
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(Pins::from_bits(0x10), Pins::P4);
        assert_eq!((Pins::NONE | Pins::P7).bits(), 0x80);
        assert!(Pins::NONE.is_empty());
    }
}
