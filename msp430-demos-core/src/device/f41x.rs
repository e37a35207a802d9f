//! MSP430F41x (FLL+ clock module)

use msp430_demos_hal::Pins;

use super::PortRegisters;

/// Watchdog control register
pub const WDTCTL: u16 = 0x0120;

/// Base of the FLL+ register block (SCFI0)
pub const FLL_BASE: u16 = 0x0050;

/// Port 1
pub const PORT1: PortRegisters = PortRegisters {
    dir: 0x0022,
    sel: 0x0026,
};

/// P1 pin carrying MCLK when selected
pub const MCLK_PIN: Pins = Pins::P1;

/// P1 pin carrying ACLK when selected
pub const ACLK_PIN: Pins = Pins::P5;

/// Highest MCLK the family is rated for
pub const MCLK_MAX_HZ: u32 = 8_000_000;
