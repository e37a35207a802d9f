//! UART echo state
//!
//! Two bytes shared between `main` and the receive ISR: the last byte
//! received and the next byte to transmit. Every receive interrupt sends
//! the queued byte and advances the queue by one, wrapping at 256:
//!
//! ```text
//!   main: prime()  ──► TX first, next = first + 1
//!                       │
//!                       ▼
//!               ┌──── LPM3 ◄────┐
//!               │               │
//!           RX interrupt        │
//!               ▼               │
//!   ISR: service() ──► wait TX ready, store RX,
//!                      TX next, next += 1
//! ```
//!
//! The ISR runs to completion before another interrupt can be taken, so
//! the only sharing is between thread mode and a single handler. Atomics
//! let the state live in a plain `static`.

use msp430_demos_hal::uart::{LineError, Uart, UartInterrupt};
use msp430_demos_hal::UartTx;
use portable_atomic::{AtomicU8, Ordering};

/// One serviced receive interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exchange {
    /// Byte read from the receive buffer
    pub received: u8,
    /// Byte sent in reply
    pub transmitted: u8,
    /// Error latched with the received byte, if any
    pub line_error: Option<LineError>,
}

/// Echo counter shared between `main` and the receive ISR
pub struct Echo {
    received: AtomicU8,
    next_transmit: AtomicU8,
}

impl Default for Echo {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Echo {
    /// Create the state with `first` queued for transmission
    pub const fn new(first: u8) -> Self {
        Self {
            received: AtomicU8::new(0),
            next_transmit: AtomicU8::new(first),
        }
    }

    /// Reset to `first` queued and nothing received
    ///
    /// Must run before the receive interrupt is enabled.
    pub fn reset(&self, first: u8) {
        self.received.store(0, Ordering::Relaxed);
        self.next_transmit.store(first, Ordering::Relaxed);
    }

    /// Last byte received
    pub fn received(&self) -> u8 {
        self.received.load(Ordering::Relaxed)
    }

    /// Byte the next exchange will transmit
    pub fn next_transmit(&self) -> u8 {
        self.next_transmit.load(Ordering::Relaxed)
    }

    /// Send the queued byte without waiting for a receive
    ///
    /// Called once from `main` after the UART is enabled. Returns the byte
    /// sent.
    pub fn prime<P: UartTx>(&self, port: &mut P) -> u8 {
        let byte = self.next_transmit.fetch_add(1, Ordering::Relaxed);
        port.write_blocking(&[byte]);
        byte
    }

    /// Handle one UART interrupt
    ///
    /// Only [`UartInterrupt::Receive`] does anything. The byte is stored and
    /// answered even when it arrived with a line error, so every receive
    /// yields exactly one transmit.
    pub fn service<P: Uart>(
        &self,
        port: &mut P,
        pending: Option<UartInterrupt>,
    ) -> Option<Exchange> {
        if pending != Some(UartInterrupt::Receive) {
            return None;
        }

        while !port.is_tx_ready() {}

        let line_error = port.line_error();
        let received = port.read_byte();
        self.received.store(received, Ordering::Relaxed);

        let transmitted = self.next_transmit.fetch_add(1, Ordering::Relaxed);
        port.write_byte(transmitted);

        Some(Exchange {
            received,
            transmitted,
            line_error,
        })
    }
}
