//! USCI_A in UART mode (MSP430x5xx/6xx)
//!
//! Register layout relative to the module base:
//!
//! | Offset | Register            |
//! |--------|---------------------|
//! | 0x00   | UCAxCTL1            |
//! | 0x01   | UCAxCTL0            |
//! | 0x06   | UCAxBRW             |
//! | 0x08   | UCAxMCTL            |
//! | 0x0A   | UCAxSTAT            |
//! | 0x0C   | UCAxRXBUF           |
//! | 0x0E   | UCAxTXBUF           |
//! | 0x1C   | UCAxIE              |
//! | 0x1D   | UCAxIFG             |
//! | 0x1E   | UCAxIV              |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use msp430_demos_hal::uart::{
    BitOrder, DataBits, LineError, Parity, StopBits, UartConfig, UartInterrupt,
};
use msp430_demos_hal::{RegisterBus, UartRx, UartTx};

use super::baud::{BaudDivider, BaudGeneration};
use super::UartError;

const CTL1: u16 = 0x00;
const CTL0: u16 = 0x01;
const BRW: u16 = 0x06;
const MCTL: u16 = 0x08;
const STAT: u16 = 0x0A;
const RXBUF: u16 = 0x0C;
const TXBUF: u16 = 0x0E;
const IE: u16 = 0x1C;
const IFG: u16 = 0x1D;
const IV: u16 = 0x1E;

// UCAxCTL0
const UCPEN: u8 = 0x80;
const UCPAR: u8 = 0x40;
const UCMSB: u8 = 0x20;
const UC7BIT: u8 = 0x10;
const UCSPB: u8 = 0x08;
const UCMODE_MASK: u8 = 0x06;
const UCSYNC: u8 = 0x01;

// UCAxCTL1
const UCSSEL_MASK: u8 = 0xC0;
const UCSWRST: u8 = 0x01;

// UCAxSTAT
const UCFE: u8 = 0x40;
const UCOE: u8 = 0x20;
const UCPE: u8 = 0x10;
const UCBRK: u8 = 0x08;

// UCAxIE / UCAxIFG
const UCRXIE: u8 = 0x01;
const UCTXIE: u8 = 0x02;
#[cfg(test)]
const UCTXIFG: u8 = 0x02;

// UCAxIV values
const IV_RXIFG: u16 = 0x02;
const IV_TXIFG: u16 = 0x04;

/// Bit clock source (UCSSELx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockSource {
    Aclk,
    #[default]
    Smclk,
}

impl ClockSource {
    pub const fn bits(self) -> u8 {
        match self {
            ClockSource::Aclk => 0x40,
            ClockSource::Smclk => 0x80,
        }
    }

    /// Frequency of the source straight out of reset on UCS parts
    pub const fn reset_hz(self) -> u32 {
        match self {
            ClockSource::Aclk => 32_768,
            ClockSource::Smclk => 1_048_576,
        }
    }
}

/// Asynchronous mode (UCMODEx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UartMode {
    #[default]
    Uart,
    IdleLineMultiprocessor,
    AddressBitMultiprocessor,
    AutomaticBaudDetection,
}

impl UartMode {
    pub const fn bits(self) -> u8 {
        match self {
            UartMode::Uart => 0x00,
            UartMode::IdleLineMultiprocessor => 0x02,
            UartMode::AddressBitMultiprocessor => 0x04,
            UartMode::AutomaticBaudDetection => 0x06,
        }
    }
}

/// Everything `Usci::init` needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsciConfig {
    /// Line settings
    pub uart: UartConfig,
    /// Bit clock source
    pub clock_source: ClockSource,
    /// Bit clock frequency (Hz)
    pub clock_hz: u32,
    pub mode: UartMode,
    pub baud_generation: BaudGeneration,
}

impl UsciConfig {
    fn ctl0(&self) -> u8 {
        let mut ctl0 = self.mode.bits();
        match self.uart.parity {
            Parity::None => {}
            Parity::Odd => ctl0 |= UCPEN,
            Parity::Even => ctl0 |= UCPEN | UCPAR,
        }
        if self.uart.bit_order == BitOrder::MsbFirst {
            ctl0 |= UCMSB;
        }
        if self.uart.data_bits == DataBits::Seven {
            ctl0 |= UC7BIT;
        }
        if self.uart.stop_bits == StopBits::Two {
            ctl0 |= UCSPB;
        }
        ctl0
    }
}

const fn interrupt_mask(interrupt: UartInterrupt) -> u8 {
    match interrupt {
        UartInterrupt::Receive => UCRXIE,
        UartInterrupt::Transmit => UCTXIE,
    }
}

/// USCI_A module in UART mode
pub struct Usci<B> {
    bus: B,
    base: u16,
}

impl<B: RegisterBus> Usci<B> {
    /// Create a handle for the USCI_A block starting at `base`
    pub const fn new(bus: B, base: u16) -> Self {
        Self { bus, base }
    }

    /// Configure the module for asynchronous operation
    ///
    /// The divider is computed before any register is touched, so a failed
    /// init leaves the module as it was. On success the module is left in
    /// reset; call [`Usci::enable`] to start it.
    pub fn init(&mut self, config: &UsciConfig) -> Result<BaudDivider, UartError> {
        let divider = BaudDivider::compute(
            config.clock_hz,
            config.uart.baudrate,
            config.baud_generation,
        )?;

        self.bus.set_bits8(self.base + CTL1, UCSWRST);
        self.bus.modify8(self.base + CTL1, |v| {
            (v & !UCSSEL_MASK) | config.clock_source.bits()
        });

        let framing = UCPEN | UCPAR | UCMSB | UC7BIT | UCSPB | UCMODE_MASK | UCSYNC;
        let ctl0 = config.ctl0();
        self.bus.modify8(self.base + CTL0, |v| (v & !framing) | ctl0);

        self.bus.write16(self.base + BRW, divider.prescaler);
        self.bus.write8(self.base + MCTL, divider.mctl());

        Ok(divider)
    }

    /// Release the module from reset
    pub fn enable(&mut self) {
        self.bus.clear_bits8(self.base + CTL1, UCSWRST);
    }

    /// Hold the module in reset
    ///
    /// Clears interrupt enables and flags as a side effect on hardware.
    pub fn disable(&mut self) {
        self.bus.set_bits8(self.base + CTL1, UCSWRST);
    }

    pub fn is_enabled(&self) -> bool {
        self.bus.read8(self.base + CTL1) & UCSWRST == 0
    }

    pub fn enable_interrupt(&mut self, interrupt: UartInterrupt) {
        self.bus.set_bits8(self.base + IE, interrupt_mask(interrupt));
    }

    pub fn disable_interrupt(&mut self, interrupt: UartInterrupt) {
        self.bus.clear_bits8(self.base + IE, interrupt_mask(interrupt));
    }

    /// Check an interrupt flag in UCAxIFG
    pub fn interrupt_status(&self, interrupt: UartInterrupt) -> bool {
        self.bus.read8(self.base + IFG) & interrupt_mask(interrupt) != 0
    }

    pub fn clear_interrupt_flag(&mut self, interrupt: UartInterrupt) {
        self.bus.clear_bits8(self.base + IFG, interrupt_mask(interrupt));
    }

    /// Highest-priority pending interrupt, from UCAxIV
    ///
    /// On hardware the read also clears the flag it reports.
    pub fn pending_interrupt(&mut self) -> Option<UartInterrupt> {
        match self.bus.read16(self.base + IV) {
            IV_RXIFG => Some(UartInterrupt::Receive),
            IV_TXIFG => Some(UartInterrupt::Transmit),
            _ => None,
        }
    }

    /// Send a byte
    ///
    /// Polls TXIFG first unless the transmit interrupt is enabled, in which
    /// case the caller is expected to be running from that interrupt.
    pub fn transmit_data(&mut self, byte: u8) {
        if self.bus.read8(self.base + IE) & UCTXIE == 0 {
            while !self.interrupt_status(UartInterrupt::Transmit) {}
        }
        self.bus.write8(self.base + TXBUF, byte);
    }

    /// Read the receive buffer
    pub fn receive_data(&mut self) -> u8 {
        self.bus.read8(self.base + RXBUF)
    }

    /// Error latched for the byte in the receive buffer
    pub fn receive_error(&self) -> Option<LineError> {
        let stat = self.bus.read8(self.base + STAT);
        if stat & UCBRK != 0 {
            Some(LineError::Break)
        } else if stat & UCOE != 0 {
            Some(LineError::Overrun)
        } else if stat & UCFE != 0 {
            Some(LineError::Framing)
        } else if stat & UCPE != 0 {
            Some(LineError::Parity)
        } else {
            None
        }
    }
}

impl<B: RegisterBus> UartTx for Usci<B> {
    fn is_tx_ready(&mut self) -> bool {
        self.interrupt_status(UartInterrupt::Transmit)
    }

    fn write_byte(&mut self, byte: u8) {
        self.bus.write8(self.base + TXBUF, byte);
    }
}

impl<B: RegisterBus> UartRx for Usci<B> {
    fn read_byte(&mut self) -> u8 {
        self.receive_data()
    }

    fn line_error(&mut self) -> Option<LineError> {
        self.receive_error()
    }
}
