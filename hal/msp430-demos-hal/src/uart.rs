//! UART serial communication abstractions
//!
//! Byte-level traits mirroring what an interrupt handler actually does with
//! a UART: poll a ready flag, move one byte in or out of a buffer register.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UART transmitter
pub trait UartTx {
    /// Check if the transmit buffer can accept another byte
    fn is_tx_ready(&mut self) -> bool;

    /// Place a byte in the transmit buffer
    ///
    /// Does not wait for [`UartTx::is_tx_ready`]; callers that need to
    /// must poll first.
    fn write_byte(&mut self, byte: u8);

    /// Write data, busy-waiting for the buffer before each byte
    fn write_blocking(&mut self, data: &[u8]) {
        for &byte in data {
            while !self.is_tx_ready() {}
            self.write_byte(byte);
        }
    }
}

/// UART receiver
pub trait UartRx {
    /// Read the receive buffer as it stands
    ///
    /// On hardware this also clears the receive flag and any error flags.
    fn read_byte(&mut self) -> u8;

    /// Error condition latched for the byte currently in the receive buffer
    fn line_error(&mut self) -> Option<LineError>;
}

/// Combined UART interface
///
/// What a receive handler needs: read the byte, answer on the same port.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (7 or 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Bit order on the wire
    pub bit_order: BitOrder,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            bit_order: BitOrder::LsbFirst,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DataBits {
    Seven,
    #[default]
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopBits {
    #[default]
    One,
    Two,
}

/// Order in which data bits are shifted out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BitOrder {
    #[default]
    LsbFirst,
    MsbFirst,
}

/// UART interrupt sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartInterrupt {
    /// A byte arrived in the receive buffer
    Receive,
    /// The transmit buffer emptied
    Transmit,
}

/// Receive-side line errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Stop bit missing
    Framing,
    /// Byte arrived before the previous one was read
    Overrun,
    /// Parity bit mismatch
    Parity,
    /// Break condition on the line
    Break,
}
