//! FLL+ clock demo for the MSP430F41x
//!
//! Locks the DCO to the 32 kHz watch crystal so that
//! MCLK = (N + 1) × 32768 Hz, routes MCLK to P1.1 and ACLK to P1.5, then
//! spins. Put a scope on the two pins to check the multiplier.
//!
//! Settings come from `clock.toml`, validated and embedded by `build.rs`.

#![no_std]
#![no_main]

#[macro_use]
mod fmt;

use msp430_rt::entry;
use panic_msp430 as _;

use msp430_demos_core::boot;
use msp430_demos_core::config::{self, ClockSettings};
use msp430_demos_core::device::f41x;
use msp430_demos_core::watchdog::Watchdog;
use msp430_demos_hal_msp430::Mmio;

/// clock.toml as encoded by the build script
static SETTINGS: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/clock.bin"));

#[entry]
fn main() -> ! {
    Watchdog::new(Mmio, f41x::WDTCTL).hold();

    let settings = load_settings();
    let faults = boot::start_clock(&mut Mmio, &settings);

    let fll = settings.fll_config();
    info!(
        "FLL+ N={} MCLK={} Hz ACLK={} Hz",
        fll.multiplier,
        fll.mclk_hz(),
        fll.aclk_hz()
    );
    if faults.any() {
        // LFOF clears by itself once the crystal starts
        warn!("oscillator fault at startup: {}", faults);
    }

    loop {
        msp430::asm::nop();
    }
}

/// Decode the embedded settings, or fall back to the defaults
fn load_settings() -> ClockSettings {
    match config::decode(SETTINGS) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("embedded clock settings unusable ({}), using defaults", e);
            ClockSettings::default()
        }
    }
}
