//! Demo bring-up sequences
//!
//! The register work each firmware image does between holding the watchdog
//! and going idle. Generic over the bus so the ordering rules can be checked
//! against a `RegisterFile`:
//!
//! - clock demo: FLL+ before the clock pins are handed to the module
//! - echo demo: nothing is enabled or transmitted unless UART init succeeds

use msp430_demos_hal::uart::UartInterrupt;
use msp430_demos_hal::{Pins, RegisterBus};

use crate::clock::{ClockSources, Fll, OscillatorFaults, Ucs};
use crate::config::{ClockSettings, EchoSettings};
use crate::device::{f41x, f5438a};
use crate::echo::Echo;
use crate::gpio::Port;
use crate::uart::{BaudDivider, ClockSource, UartError, Usci};

/// Lock the FLL+ and route the selected clocks to P1
///
/// Returns the fault flags as read right after configuration.
pub fn start_clock<B: RegisterBus>(bus: &mut B, settings: &ClockSettings) -> OscillatorFaults {
    let mut fll = Fll::new(&mut *bus, f41x::FLL_BASE);
    fll.configure(&settings.fll_config());
    let faults = fll.faults();

    let mut pins = Pins::NONE;
    if settings.output_mclk {
        pins = pins | f41x::MCLK_PIN;
    }
    if settings.output_aclk {
        pins = pins | f41x::ACLK_PIN;
    }
    if !pins.is_empty() {
        Port::new(&mut *bus, f41x::PORT1).select_peripheral_output(pins);
    }

    faults
}

/// Bit clock frequency for `source`, decoded from the UCS
pub fn uart_clock_hz<B: RegisterBus>(bus: &mut B, source: ClockSource) -> u32 {
    let ucs = Ucs::new(bus, f5438a::UCS_BASE);
    let sources = ClockSources::default();
    match source {
        ClockSource::Smclk => ucs.smclk_hz(&sources),
        ClockSource::Aclk => ucs.aclk_hz(&sources),
    }
}

/// Bring up USCI_A0 for the echo and send the first byte
///
/// On error the USCI registers are untouched, the receive interrupt stays
/// disabled and `echo` keeps its previous state.
pub fn start_echo<B: RegisterBus>(
    bus: &mut B,
    settings: &EchoSettings,
    echo: &Echo,
) -> Result<BaudDivider, UartError> {
    Port::new(&mut *bus, f5438a::PORT3).select_peripheral_input(f5438a::UCA0_UART_PINS);

    let clock_hz = uart_clock_hz(&mut *bus, settings.clock_source);

    let mut uart = Usci::new(&mut *bus, f5438a::USCI_A0_BASE);
    let divider = uart.init(&settings.usci_config(clock_hz))?;

    echo.reset(settings.first_byte);
    uart.enable();
    uart.enable_interrupt(UartInterrupt::Receive);
    echo.prime(&mut uart);

    Ok(divider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uart::BaudGeneration;
    use msp430_demos_hal::RegisterFile;

    const USCI: u16 = f5438a::USCI_A0_BASE;
    const UCA0CTL1: u16 = USCI;
    const UCA0MCTL: u16 = USCI + 0x08;
    const UCA0TXBUF: u16 = USCI + 0x0E;
    const UCA0IE: u16 = USCI + 0x1C;
    const UCA0IFG: u16 = USCI + 0x1D;

    const P1DIR: u16 = 0x0022;
    const P1SEL: u16 = 0x0026;
    const P3SEL: u16 = 0x022A;

    /// F5438A after power-up: SMCLK = DCOCLKDIV = 32 × 32768, USCI in
    /// reset with an empty transmit buffer
    fn f5438a_reset() -> RegisterFile {
        let mut regs = RegisterFile::new();
        regs.preset16(f5438a::UCS_BASE + 0x04, 0x101F);
        regs.preset16(f5438a::UCS_BASE + 0x08, 0x0044);
        regs.preset8(UCA0CTL1, 0x01);
        regs.preset8(UCA0IFG, 0x02);
        regs
    }

    fn touches_usci(regs: &RegisterFile) -> bool {
        regs.writes()
            .iter()
            .any(|w| (USCI..USCI + 0x20).contains(&w.addr))
    }

    #[test]
    fn test_clock_demo_matches_vendor_example() {
        let mut regs = RegisterFile::new();
        start_clock(&mut regs, &ClockSettings::default());

        assert_eq!(regs.read8(f41x::FLL_BASE + 0x02), 74);
        assert_eq!(regs.read8(P1DIR), 0x22);
        assert_eq!(regs.read8(P1SEL), 0x22);

        // Pins follow the FLL
        let scfqctl = regs.first_write_to(f41x::FLL_BASE + 0x02).unwrap();
        let p1sel = regs.first_write_to(P1SEL).unwrap();
        assert!(scfqctl < p1sel);
    }

    #[test]
    fn test_clock_demo_without_outputs_leaves_port() {
        let mut regs = RegisterFile::new();
        let settings = ClockSettings {
            output_mclk: false,
            output_aclk: false,
            ..ClockSettings::default()
        };
        start_clock(&mut regs, &settings);

        assert_eq!(regs.first_write_to(P1DIR), None);
        assert_eq!(regs.first_write_to(P1SEL), None);
    }

    #[test]
    fn test_clock_demo_reports_faults() {
        let mut regs = RegisterFile::new();
        regs.preset8(f41x::FLL_BASE + 0x03, 0x02);

        let faults = start_clock(&mut regs, &ClockSettings::default());
        assert!(faults.lfxt1);
        assert!(!faults.dco);
    }

    #[test]
    fn test_echo_demo_starts_and_primes() {
        let mut regs = f5438a_reset();
        let echo = Echo::new(0);

        let divider = start_echo(&mut regs, &EchoSettings::default(), &echo).unwrap();

        assert_eq!(divider.prescaler, 6);
        assert_eq!(regs.read8(P3SEL), 0x30);
        assert_eq!(regs.read8(UCA0CTL1) & 0x01, 0);
        assert_eq!(regs.read8(UCA0IE), 0x01);
        assert_eq!(regs.read8(UCA0TXBUF), 0);
        assert_eq!(echo.next_transmit(), 1);

        // Divider, then receive interrupt, then the first byte
        let mctl = regs.first_write_to(UCA0MCTL).unwrap();
        let ie = regs.first_write_to(UCA0IE).unwrap();
        let tx = regs.first_write_to(UCA0TXBUF).unwrap();
        assert!(mctl < ie);
        assert!(ie < tx);
    }

    #[test]
    fn test_echo_demo_uses_first_byte() {
        let mut regs = f5438a_reset();
        let echo = Echo::new(0);
        let settings = EchoSettings {
            first_byte: 0x30,
            ..EchoSettings::default()
        };

        start_echo(&mut regs, &settings, &echo).unwrap();

        assert_eq!(regs.read8(UCA0TXBUF), 0x30);
        assert_eq!(echo.next_transmit(), 0x31);
    }

    #[test]
    fn test_echo_demo_init_failure_enables_nothing() {
        // UCS all zero: SMCLK is XT1 at 32 kHz, too slow to oversample 9600
        let mut regs = RegisterFile::new();
        let echo = Echo::new(9);

        let result = start_echo(&mut regs, &EchoSettings::default(), &echo);

        assert_eq!(result, Err(UartError::DividerOutOfRange));
        assert!(!touches_usci(&regs));
        assert_eq!(regs.read8(UCA0IE), 0);
        assert_eq!(echo.next_transmit(), 9);
    }

    #[test]
    fn test_uart_clock_follows_source() {
        let mut regs = f5438a_reset();
        assert_eq!(uart_clock_hz(&mut regs, ClockSource::Smclk), 1_048_576);
        assert_eq!(uart_clock_hz(&mut regs, ClockSource::Aclk), 32_768);
    }

    #[test]
    fn test_echo_demo_from_aclk() {
        let mut regs = f5438a_reset();
        let echo = Echo::new(0);
        let settings = EchoSettings {
            clock_source: ClockSource::Aclk,
            baud_generation: BaudGeneration::LowFrequency,
            ..EchoSettings::default()
        };

        let divider = start_echo(&mut regs, &settings, &echo).unwrap();

        assert_eq!(divider.prescaler, 3);
        assert_eq!(regs.read8(UCA0MCTL), 0x06);
        assert_eq!(regs.read8(UCA0CTL1) & 0xC0, 0x40);
    }
}
