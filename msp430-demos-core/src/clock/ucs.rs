//! Unified Clock System frequency query (MSP430x5xx/6xx)
//!
//! The UART demo needs the SMCLK frequency to derive its baud divider.
//! Nothing here writes UCS registers; the clock tree is decoded from its
//! current state.
//!
//! ```text
//! f_DCOCLKDIV = f_FLLREF / FLLREFDIV × (FLLN + 1)
//! f_DCOCLK    = f_DCOCLKDIV × FLLD
//! f_SMCLK     = f_SELS / 2^DIVS
//! ```

use msp430_demos_hal::RegisterBus;

// Register offsets from UCSCTL0
const UCSCTL2: u16 = 0x04;
const UCSCTL3: u16 = 0x06;
const UCSCTL4: u16 = 0x08;
const UCSCTL5: u16 = 0x0A;

const FLLN_MASK: u16 = 0x03FF;
const FLLD_SHIFT: u16 = 12;
const SELREF_SHIFT: u16 = 4;
const SELM_SHIFT: u16 = 0;
const SELS_SHIFT: u16 = 4;
const SELA_SHIFT: u16 = 8;
const FIELD_MASK: u16 = 0x0007;

/// REFOCLK trimmed reference
pub const REFO_HZ: u32 = 32_768;

/// VLOCLK typical frequency
pub const VLO_HZ: u32 = 10_000;

/// External oscillator frequencies populated on the board
///
/// A zero means the oscillator is not fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSources {
    pub xt1_hz: u32,
    pub xt2_hz: u32,
}

impl Default for ClockSources {
    /// 32 kHz watch crystal on XT1, XT2 not fitted
    fn default() -> Self {
        Self {
            xt1_hz: 32_768,
            xt2_hz: 0,
        }
    }
}

/// Output clock of the UCS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSignal {
    Aclk,
    Mclk,
    Smclk,
}

impl ClockSignal {
    const fn select_shift(self) -> u16 {
        match self {
            ClockSignal::Aclk => SELA_SHIFT,
            ClockSignal::Mclk => SELM_SHIFT,
            ClockSignal::Smclk => SELS_SHIFT,
        }
    }
}

/// Unified Clock System
pub struct Ucs<B> {
    bus: B,
    base: u16,
}

impl<B: RegisterBus> Ucs<B> {
    /// Create a handle for the UCS block starting at `base` (UCSCTL0)
    pub const fn new(bus: B, base: u16) -> Self {
        Self { bus, base }
    }

    pub fn smclk_hz(&self, sources: &ClockSources) -> u32 {
        self.frequency(ClockSignal::Smclk, sources)
    }

    pub fn mclk_hz(&self, sources: &ClockSources) -> u32 {
        self.frequency(ClockSignal::Mclk, sources)
    }

    pub fn aclk_hz(&self, sources: &ClockSources) -> u32 {
        self.frequency(ClockSignal::Aclk, sources)
    }

    /// Current frequency of one UCS output
    pub fn frequency(&self, signal: ClockSignal, sources: &ClockSources) -> u32 {
        let shift = signal.select_shift();
        let select = (self.bus.read16(self.base + UCSCTL4) >> shift) & FIELD_MASK;
        let divide = (self.bus.read16(self.base + UCSCTL5) >> shift) & FIELD_MASK;
        self.source_hz(select, sources) >> divide.min(5)
    }

    /// DCOCLKDIV: the FLL output after the loop divider
    pub fn dcoclkdiv_hz(&self, sources: &ClockSources) -> u32 {
        let ctl3 = self.bus.read16(self.base + UCSCTL3);
        let reference = match (ctl3 >> SELREF_SHIFT) & FIELD_MASK {
            0 | 1 => sources.xt1_hz,
            5..=7 if sources.xt2_hz != 0 => sources.xt2_hz,
            _ => REFO_HZ,
        };
        let ref_div = match ctl3 & FIELD_MASK {
            0 => 1,
            1 => 2,
            2 => 4,
            3 => 8,
            4 => 12,
            _ => 16,
        };
        let flln = (self.bus.read16(self.base + UCSCTL2) & FLLN_MASK) as u32;
        (reference / ref_div) * (flln + 1)
    }

    /// DCOCLK: DCOCLKDIV times the loop divider
    pub fn dcoclk_hz(&self, sources: &ClockSources) -> u32 {
        let flld = (self.bus.read16(self.base + UCSCTL2) >> FLLD_SHIFT) & FIELD_MASK;
        self.dcoclkdiv_hz(sources) << flld.min(5)
    }

    fn source_hz(&self, select: u16, sources: &ClockSources) -> u32 {
        match select {
            0 => sources.xt1_hz,
            1 => VLO_HZ,
            2 => REFO_HZ,
            3 => self.dcoclk_hz(sources),
            4 => self.dcoclkdiv_hz(sources),
            // XT2 select falls back to DCOCLKDIV on parts without XT2
            _ if sources.xt2_hz != 0 => sources.xt2_hz,
            _ => self.dcoclkdiv_hz(sources),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::f5438a::UCS_BASE;
    use msp430_demos_hal::RegisterFile;

    fn reset_state() -> RegisterFile {
        let mut regs = RegisterFile::new();
        regs.preset16(UCS_BASE + UCSCTL2, 0x101F);
        regs.preset16(UCS_BASE + UCSCTL3, 0x0000);
        regs.preset16(UCS_BASE + UCSCTL4, 0x0044);
        regs.preset16(UCS_BASE + UCSCTL5, 0x0000);
        regs
    }

    #[test]
    fn test_reset_smclk_is_dcoclkdiv() {
        let mut regs = reset_state();
        let ucs = Ucs::new(&mut regs, UCS_BASE);
        let sources = ClockSources::default();

        assert_eq!(ucs.smclk_hz(&sources), 1_048_576);
        assert_eq!(ucs.mclk_hz(&sources), 1_048_576);
        assert_eq!(ucs.aclk_hz(&sources), 32_768);
        assert_eq!(ucs.dcoclk_hz(&sources), 2_097_152);
    }

    #[test]
    fn test_smclk_divider_and_dcoclk_select() {
        let mut regs = reset_state();
        // SELS = DCOCLK, DIVS = /4
        regs.preset16(UCS_BASE + UCSCTL4, 0x0034);
        regs.preset16(UCS_BASE + UCSCTL5, 0x0020);
        let ucs = Ucs::new(&mut regs, UCS_BASE);

        assert_eq!(ucs.smclk_hz(&ClockSources::default()), 2_097_152 / 4);
    }

    #[test]
    fn test_refo_reference_with_divider() {
        let mut regs = reset_state();
        // SELREF = REFO, FLLREFDIV = /2, FLLN = 63
        regs.preset16(UCS_BASE + UCSCTL3, 0x0021);
        regs.preset16(UCS_BASE + UCSCTL2, 0x103F);
        let ucs = Ucs::new(&mut regs, UCS_BASE);

        let sources = ClockSources {
            xt1_hz: 0,
            xt2_hz: 0,
        };
        assert_eq!(ucs.smclk_hz(&sources), 16_384 * 64);
    }

    #[test]
    fn test_missing_xt2_falls_back() {
        let mut regs = reset_state();
        // SELS = XT2CLK
        regs.preset16(UCS_BASE + UCSCTL4, 0x0054);
        let ucs = Ucs::new(&mut regs, UCS_BASE);

        assert_eq!(ucs.smclk_hz(&ClockSources::default()), 1_048_576);
        let with_xt2 = ClockSources {
            xt2_hz: 4_000_000,
            ..ClockSources::default()
        };
        assert_eq!(ucs.smclk_hz(&with_xt2), 4_000_000);
    }
}
