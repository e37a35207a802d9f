//! USCI_A0 UART echo demo for the MSP430F5438A
//!
//! Brings up USCI_A0 on P3.4 (TXD) and P3.5 (RXD), sends the first counter
//! value, then sleeps in LPM3. Each received byte wakes the receive
//! interrupt, which stores the byte and answers with the next counter value.
//!
//! Settings come from `echo.toml`, validated and embedded by `build.rs`.
//! The bit clock is read back from the UCS at boot rather than assumed.

#![no_std]
#![no_main]
#![feature(abi_msp430_interrupt)]

#[macro_use]
mod fmt;

use msp430_rt::entry;
use panic_msp430 as _;

use msp430_demos_core::boot;
use msp430_demos_core::config::{self, EchoSettings};
use msp430_demos_core::device::f5438a;
use msp430_demos_core::echo::Echo;
use msp430_demos_core::uart::Usci;
use msp430_demos_core::watchdog::Watchdog;
use msp430_demos_hal_msp430::{interrupt, lpm, Mmio};

/// echo.toml as encoded by the build script
static SETTINGS: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/echo.bin"));

/// Last byte received and next byte to send, shared with `USCI_A0`
static ECHO: Echo = Echo::new(0);

#[entry]
fn main() -> ! {
    Watchdog::new(Mmio, f5438a::WDTCTL).hold();

    let settings = load_settings();

    match boot::start_echo(&mut Mmio, &settings, &ECHO) {
        Ok(divider) => info!(
            "USCI_A0 at {} baud (UCBRx={} MCTL={=u8:#x})",
            settings.baud_rate,
            divider.prescaler,
            divider.mctl()
        ),
        Err(e) => {
            error!("UART init failed: {}", e);
            lpm::halt();
        }
    }

    loop {
        // Handlers leave the saved SR alone, so this only returns on a
        // spurious wakeup
        lpm::enter_lpm3_with_interrupts();
        msp430::asm::nop();
    }
}

/// Decode the embedded settings, or fall back to the defaults
fn load_settings() -> EchoSettings {
    match config::decode(SETTINGS) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("embedded UART settings unusable ({}), using defaults", e);
            EchoSettings::default()
        }
    }
}

#[interrupt]
fn USCI_A0() {
    let mut uart = Usci::new(Mmio, f5438a::USCI_A0_BASE);
    let pending = uart.pending_interrupt();

    if let Some(exchange) = ECHO.service(&mut uart, pending) {
        if let Some(e) = exchange.line_error {
            warn!("rx {=u8:#x} with {}", exchange.received, e);
        }
    }
}
