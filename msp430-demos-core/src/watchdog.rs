//! Watchdog timer hold
//!
//! Both demos stop the watchdog before anything else. WDTCTL is password
//! protected: writes without `WDTPW` in the upper byte cause a reset, and
//! reads return `0x69` there instead.

use msp430_demos_hal::RegisterBus;

/// Watchdog password, required in the upper byte of every write
pub const WDTPW: u16 = 0x5A00;

/// Stop bit
pub const WDTHOLD: u16 = 0x0080;

/// Watchdog timer (WDT+ or WDT_A)
pub struct Watchdog<B> {
    bus: B,
    wdtctl: u16,
}

impl<B: RegisterBus> Watchdog<B> {
    /// Create a watchdog handle for the WDTCTL register at `wdtctl`
    pub const fn new(bus: B, wdtctl: u16) -> Self {
        Self { bus, wdtctl }
    }

    /// Stop the watchdog
    ///
    /// Keeps the low control bits (interval, clock source) and sets the
    /// hold bit.
    pub fn hold(&mut self) {
        let control = self.bus.read16(self.wdtctl) & 0x00FF;
        self.bus.write16(self.wdtctl, WDTPW | control | WDTHOLD);
    }

    /// Check if the watchdog is stopped
    pub fn is_held(&self) -> bool {
        self.bus.read16(self.wdtctl) & WDTHOLD != 0
    }
}
