//! USCI_A UART driver
//!
//! Covers the vendor driver library's UART calls used by the echo demo:
//! init, enable, interrupt enable/status, transmit and receive.

pub mod baud;
pub mod usci;

use core::fmt;

pub use baud::{BaudDivider, BaudGeneration};
pub use usci::{ClockSource, UartMode, Usci, UsciConfig};

/// UART initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Requested baud rate is zero
    InvalidBaudRate,
    /// Bit clock frequency is zero
    NoClock,
    /// Prescaler does not fit UCBRx (too slow a clock or too high a rate)
    DividerOutOfRange,
}

impl fmt::Display for UartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UartError::InvalidBaudRate => write!(f, "baud rate must be non-zero"),
            UartError::NoClock => write!(f, "bit clock is not running"),
            UartError::DividerOutOfRange => {
                write!(f, "baud rate cannot be derived from the bit clock")
            }
        }
    }
}
