//! FLL+ clock module (MSP430x4xx)
//!
//! The FLL+ locks the DCO to a multiple of the 32 kHz watch crystal:
//!
//! ```text
//! f_DCOCLK = D × (N + 1) × f_crystal
//! f_MCLK   = f_DCOCLK / D        (DCOPLUS = 0)
//!          = f_DCOCLK            (DCOPLUS = 1)
//! ```
//!
//! `N` is SCFQCTL[6:0], `D` is the loop divider in SCFI0[7:6]. The FN bits
//! in SCFI0 pick which DCO tap range the loop can move through; the target
//! must fall inside it or the loop pins at a rail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use msp430_demos_hal::RegisterBus;

// Register offsets from the FLL+ block base
const SCFI0: u16 = 0x00;
const SCFQCTL: u16 = 0x02;
const FLL_CTL0: u16 = 0x03;

// SCFI0 fields
const FN_MASK: u8 = 0x3C;
const FLLD_MASK: u8 = 0xC0;

// FLL_CTL0 fields
const DCOPLUS: u8 = 0x80;
const XCAP_MASK: u8 = 0x30;
const DCOF: u8 = 0x01;
const LFOF: u8 = 0x02;
const XT1OF: u8 = 0x04;
const XT2OF: u8 = 0x08;

// SCFQCTL fields
const SCFQ_N_MASK: u8 = 0x7F;

/// Highest multiplier SCFQCTL can hold
pub const MULTIPLIER_MAX: u8 = 0x7F;

/// Standard 32 kHz watch crystal
pub const WATCH_CRYSTAL_HZ: u32 = 32_768;

/// LFXT1 low-frequency mode input range (Hz)
pub const CRYSTAL_MIN_HZ: u32 = 10_000;
pub const CRYSTAL_MAX_HZ: u32 = 50_000;

/// DCO frequency range (SCFI0.FN_x)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DcoRange {
    /// FN_x = 0
    Fn0,
    /// FN_2
    #[default]
    Fn2,
    /// FN_3
    Fn3,
    /// FN_4
    Fn4,
    /// FN_8
    Fn8,
}

impl DcoRange {
    /// SCFI0 bits
    pub const fn bits(self) -> u8 {
        match self {
            DcoRange::Fn0 => 0x00,
            DcoRange::Fn2 => 0x04,
            DcoRange::Fn3 => 0x08,
            DcoRange::Fn4 => 0x10,
            DcoRange::Fn8 => 0x20,
        }
    }

    /// Typical DCO span (min, max) in Hz across the range's taps
    pub const fn typical_hz(self) -> (u32, u32) {
        match self {
            DcoRange::Fn0 => (650_000, 6_100_000),
            DcoRange::Fn2 => (1_300_000, 12_100_000),
            DcoRange::Fn3 => (2_000_000, 17_900_000),
            DcoRange::Fn4 => (2_800_000, 26_600_000),
            DcoRange::Fn8 => (4_200_000, 46_000_000),
        }
    }

    /// Check if the range can reach `dco_hz`
    pub const fn covers(self, dco_hz: u32) -> bool {
        let (min, max) = self.typical_hz();
        dco_hz >= min && dco_hz <= max
    }
}

/// LFXT1 oscillator load capacitance (FLL_CTL0.XCAPxPF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadCapacitance {
    Pf0,
    Pf10,
    Pf14,
    #[default]
    Pf18,
}

impl LoadCapacitance {
    pub const fn bits(self) -> u8 {
        match self {
            LoadCapacitance::Pf0 => 0x00,
            LoadCapacitance::Pf10 => 0x10,
            LoadCapacitance::Pf14 => 0x20,
            LoadCapacitance::Pf18 => 0x30,
        }
    }
}

/// FLL loop divider (SCFI0.FLLDx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoopDivider {
    Div1,
    /// Power-up value
    #[default]
    Div2,
    Div4,
    Div8,
}

impl LoopDivider {
    pub const fn bits(self) -> u8 {
        match self {
            LoopDivider::Div1 => 0x00,
            LoopDivider::Div2 => 0x40,
            LoopDivider::Div4 => 0x80,
            LoopDivider::Div8 => 0xC0,
        }
    }

    pub const fn divisor(self) -> u32 {
        match self {
            LoopDivider::Div1 => 1,
            LoopDivider::Div2 => 2,
            LoopDivider::Div4 => 4,
            LoopDivider::Div8 => 8,
        }
    }
}

/// FLL+ setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FllConfig {
    /// Reference crystal on LFXT1 (Hz)
    pub crystal_hz: u32,
    /// SCFQCTL multiplier N; the loop runs at (N + 1) × crystal
    pub multiplier: u8,
    /// DCO tap range
    pub dco_range: DcoRange,
    /// Crystal load capacitance
    pub load_capacitance: LoadCapacitance,
    /// Loop divider D
    pub loop_divider: LoopDivider,
    /// Feed MCLK from the undivided DCO
    pub dco_plus: bool,
}

impl Default for FllConfig {
    /// MCLK = (74 + 1) × 32768 = 2 457 600 Hz
    fn default() -> Self {
        Self {
            crystal_hz: WATCH_CRYSTAL_HZ,
            multiplier: 74,
            dco_range: DcoRange::Fn2,
            load_capacitance: LoadCapacitance::Pf18,
            loop_divider: LoopDivider::Div2,
            dco_plus: false,
        }
    }
}

impl FllConfig {
    /// Frequency the DCO itself runs at
    ///
    /// Saturates at `u32::MAX` for crystals far outside the LFXT1 range.
    pub const fn dco_hz(&self) -> u32 {
        self.loop_hz().saturating_mul(self.loop_divider.divisor())
    }

    /// MCLK (and SMCLK) frequency once locked
    pub const fn mclk_hz(&self) -> u32 {
        if self.dco_plus {
            self.dco_hz()
        } else {
            self.loop_hz()
        }
    }

    /// ACLK frequency: the crystal, undivided
    pub const fn aclk_hz(&self) -> u32 {
        self.crystal_hz
    }

    const fn loop_hz(&self) -> u32 {
        (self.multiplier as u32 + 1).saturating_mul(self.crystal_hz)
    }
}

/// Oscillator fault flags latched in FLL_CTL0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscillatorFaults {
    /// DCO tap at the end of its range
    pub dco: bool,
    /// LFXT1 in low-frequency mode not oscillating
    pub lfxt1: bool,
    /// LFXT1 in high-frequency mode not oscillating
    pub xt1: bool,
    /// XT2 not oscillating
    pub xt2: bool,
}

impl OscillatorFaults {
    fn from_bits(bits: u8) -> Self {
        Self {
            dco: bits & DCOF != 0,
            lfxt1: bits & LFOF != 0,
            xt1: bits & XT1OF != 0,
            xt2: bits & XT2OF != 0,
        }
    }

    pub fn any(&self) -> bool {
        self.dco || self.lfxt1 || self.xt1 || self.xt2
    }
}

/// FLL+ clock module
pub struct Fll<B> {
    bus: B,
    base: u16,
}

impl<B: RegisterBus> Fll<B> {
    /// Create a handle for the FLL+ block starting at `base` (SCFI0)
    pub const fn new(bus: B, base: u16) -> Self {
        Self { bus, base }
    }

    /// Program range, load capacitance and multiplier
    ///
    /// The loop starts tracking as soon as SCFQCTL is written; there is no
    /// lock indication beyond the fault flags.
    pub fn configure(&mut self, config: &FllConfig) {
        let range = config.dco_range.bits() | config.loop_divider.bits();
        self.bus
            .modify8(self.base + SCFI0, |v| (v & !(FN_MASK | FLLD_MASK)) | range);

        let dco_plus = if config.dco_plus { DCOPLUS } else { 0 };
        let ctl0 = config.load_capacitance.bits() | dco_plus;
        self.bus
            .modify8(self.base + FLL_CTL0, |v| (v & !(XCAP_MASK | DCOPLUS)) | ctl0);

        self.bus
            .write8(self.base + SCFQCTL, config.multiplier & SCFQ_N_MASK);
    }

    /// Multiplier currently programmed
    pub fn multiplier(&self) -> u8 {
        self.bus.read8(self.base + SCFQCTL) & SCFQ_N_MASK
    }

    /// Read the oscillator fault flags
    pub fn faults(&self) -> OscillatorFaults {
        OscillatorFaults::from_bits(self.bus.read8(self.base + FLL_CTL0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::f41x;
    use msp430_demos_hal::RegisterFile;

    // Power-up values of SCFI0, SCFQCTL and FLL_CTL0
    fn reset_state() -> RegisterFile {
        let mut regs = RegisterFile::new();
        regs.preset8(f41x::FLL_BASE + SCFI0, 0x40);
        regs.preset8(f41x::FLL_BASE + SCFQCTL, 0x1F);
        regs.preset8(f41x::FLL_BASE + FLL_CTL0, 0x03);
        regs
    }

    #[test]
    fn test_default_runs_mclk_at_2_45mhz() {
        let config = FllConfig::default();
        assert_eq!(config.mclk_hz(), 75 * 32_768);
        assert_eq!(config.mclk_hz(), 2_457_600);
        assert_eq!(config.dco_hz(), 4_915_200);
        assert_eq!(config.aclk_hz(), 32_768);
    }

    #[test]
    fn test_dco_plus_feeds_mclk_from_dco() {
        let config = FllConfig {
            dco_plus: true,
            loop_divider: LoopDivider::Div4,
            ..FllConfig::default()
        };
        assert_eq!(config.mclk_hz(), 4 * 75 * 32_768);
        assert_eq!(config.mclk_hz(), config.dco_hz());
    }

    #[test]
    fn test_frequencies_saturate() {
        let config = FllConfig {
            crystal_hz: 1 << 25,
            multiplier: MULTIPLIER_MAX,
            loop_divider: LoopDivider::Div8,
            dco_plus: true,
            ..FllConfig::default()
        };
        assert_eq!(config.dco_hz(), u32::MAX);
        assert_eq!(config.mclk_hz(), u32::MAX);
        assert!(!DcoRange::Fn8.covers(config.dco_hz()));
    }

    #[test]
    fn test_configure_writes_vendor_sequence() {
        let mut regs = reset_state();
        Fll::new(&mut regs, f41x::FLL_BASE).configure(&FllConfig::default());

        // SCFI0 |= FN_2 on top of the FLLD_2 reset value
        assert_eq!(regs.read8(0x0050), 0x44);
        // FLL_CTL0 |= XCAP18PF, fault flags untouched
        assert_eq!(regs.read8(0x0053), 0x33);
        // SCFQCTL = 74
        assert_eq!(regs.read8(0x0052), 74);

        let order: heapless::Vec<u16, 4> = regs.writes().iter().map(|w| w.addr).collect();
        assert_eq!(order.as_slice(), &[0x0050, 0x0053, 0x0052]);
    }

    #[test]
    fn test_configure_replaces_previous_range() {
        let mut regs = reset_state();
        regs.preset8(f41x::FLL_BASE + SCFI0, 0x40 | DcoRange::Fn8.bits());

        let mut fll = Fll::new(&mut regs, f41x::FLL_BASE);
        fll.configure(&FllConfig {
            dco_range: DcoRange::Fn3,
            loop_divider: LoopDivider::Div1,
            multiplier: 121,
            ..FllConfig::default()
        });
        assert_eq!(fll.multiplier(), 121);

        assert_eq!(regs.read8(0x0050), 0x08);
    }

    #[test]
    fn test_faults_decode() {
        let mut regs = reset_state();
        let fll = Fll::new(&mut regs, f41x::FLL_BASE);

        let faults = fll.faults();
        assert!(faults.dco);
        assert!(faults.lfxt1);
        assert!(!faults.xt1);
        assert!(faults.any());
    }

    #[test]
    fn test_range_covers() {
        assert!(DcoRange::Fn2.covers(FllConfig::default().dco_hz()));
        assert!(!DcoRange::Fn0.covers(7_000_000));
        assert!(DcoRange::Fn8.covers(40_000_000));
    }
}
