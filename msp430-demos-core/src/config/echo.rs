//! UART echo demo settings

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use msp430_demos_hal::uart::{BitOrder, DataBits, Parity, StopBits, UartConfig};

use super::{ConfigError, MAX_BAUD_ERROR_PERMILLE};
use crate::uart::{BaudDivider, BaudGeneration, ClockSource, UartMode, UsciConfig};

/// Contents of `echo.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EchoSettings {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub bit_order: BitOrder,
    pub clock_source: ClockSource,
    pub baud_generation: BaudGeneration,
    /// Counter value sent at startup
    pub first_byte: u8,
}

impl Default for EchoSettings {
    /// 9600 8N1, LSB first, from SMCLK with oversampling
    fn default() -> Self {
        let line = UartConfig::default();
        Self {
            baud_rate: line.baudrate,
            data_bits: line.data_bits,
            parity: line.parity,
            stop_bits: line.stop_bits,
            bit_order: line.bit_order,
            clock_source: ClockSource::Smclk,
            baud_generation: BaudGeneration::Oversampling,
            first_byte: 0,
        }
    }
}

impl EchoSettings {
    pub fn uart_config(&self) -> UartConfig {
        UartConfig {
            baudrate: self.baud_rate,
            data_bits: self.data_bits,
            parity: self.parity,
            stop_bits: self.stop_bits,
            bit_order: self.bit_order,
        }
    }

    /// USCI setup for a bit clock running at `clock_hz`
    pub fn usci_config(&self, clock_hz: u32) -> UsciConfig {
        UsciConfig {
            uart: self.uart_config(),
            clock_source: self.clock_source,
            clock_hz,
            mode: UartMode::Uart,
            baud_generation: self.baud_generation,
        }
    }

    /// Check the rate against the clock source's power-up frequency
    ///
    /// The firmware measures the real clock at boot; this catches settings
    /// that cannot work with an untouched clock tree.
    pub fn validate(&self) -> Result<BaudDivider, ConfigError> {
        let divider = BaudDivider::compute(
            self.clock_source.reset_hz(),
            self.baud_rate,
            self.baud_generation,
        )?;

        let error = divider.error_permille(self.baud_rate);
        if error > MAX_BAUD_ERROR_PERMILLE {
            return Err(ConfigError::BaudErrorTooLarge(error));
        }

        Ok(divider)
    }
}
