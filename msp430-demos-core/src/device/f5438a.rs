//! MSP430F5438A (UCS clock system, USCI_A0)

use msp430_demos_hal::Pins;

use super::PortRegisters;

/// WDT_A control register
pub const WDTCTL: u16 = 0x015C;

/// Base of the UCS register block (UCSCTL0)
pub const UCS_BASE: u16 = 0x0160;

/// Base of the USCI_A0 register block (UCA0CTLW0)
pub const USCI_A0_BASE: u16 = 0x05C0;

/// Port 3 (low byte of port B)
pub const PORT3: PortRegisters = PortRegisters {
    dir: 0x0224,
    sel: 0x022A,
};

/// P3 pin carrying UCA0TXD
pub const UCA0TXD_PIN: Pins = Pins::P4;

/// P3 pin carrying UCA0RXD
pub const UCA0RXD_PIN: Pins = Pins::P5;

/// Both USCI_A0 UART pins
pub const UCA0_UART_PINS: Pins = Pins::from_bits(UCA0TXD_PIN.bits() | UCA0RXD_PIN.bits());
