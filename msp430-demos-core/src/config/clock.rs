//! FLL clock demo settings

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::clock::fll::{
    DcoRange, FllConfig, LoadCapacitance, LoopDivider, CRYSTAL_MAX_HZ, CRYSTAL_MIN_HZ,
    MULTIPLIER_MAX, WATCH_CRYSTAL_HZ,
};
use crate::device::f41x;

/// Contents of `clock.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockSettings {
    pub crystal_hz: u32,
    pub multiplier: u8,
    pub dco_range: DcoRange,
    pub load_capacitance: LoadCapacitance,
    pub loop_divider: LoopDivider,
    pub dco_plus: bool,
    /// Drive MCLK out on P1.1
    pub output_mclk: bool,
    /// Drive ACLK out on P1.5
    pub output_aclk: bool,
}

impl Default for ClockSettings {
    fn default() -> Self {
        let fll = FllConfig::default();
        Self {
            crystal_hz: WATCH_CRYSTAL_HZ,
            multiplier: fll.multiplier,
            dco_range: fll.dco_range,
            load_capacitance: fll.load_capacitance,
            loop_divider: fll.loop_divider,
            dco_plus: fll.dco_plus,
            output_mclk: true,
            output_aclk: true,
        }
    }
}

impl ClockSettings {
    pub fn fll_config(&self) -> FllConfig {
        FllConfig {
            crystal_hz: self.crystal_hz,
            multiplier: self.multiplier,
            dco_range: self.dco_range,
            load_capacitance: self.load_capacitance,
            loop_divider: self.loop_divider,
            dco_plus: self.dco_plus,
        }
    }

    /// Check that the FLL can actually reach the requested frequency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.multiplier == 0 || self.multiplier > MULTIPLIER_MAX {
            return Err(ConfigError::MultiplierOutOfRange(self.multiplier));
        }
        if !(CRYSTAL_MIN_HZ..=CRYSTAL_MAX_HZ).contains(&self.crystal_hz) {
            return Err(ConfigError::CrystalOutOfRange(self.crystal_hz));
        }

        let fll = self.fll_config();
        let dco = fll.dco_hz();
        if !self.dco_range.covers(dco) {
            return Err(ConfigError::DcoOutOfRange(dco));
        }

        let mclk = fll.mclk_hz();
        if mclk > f41x::MCLK_MAX_HZ {
            return Err(ConfigError::MclkTooFast(mclk));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ClockSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.fll_config(), FllConfig::default());
    }

    #[test]
    fn test_multiplier_bounds() {
        let zero = ClockSettings {
            multiplier: 0,
            ..ClockSettings::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::MultiplierOutOfRange(0)));

        let wide = ClockSettings {
            multiplier: 200,
            ..ClockSettings::default()
        };
        assert_eq!(wide.validate(), Err(ConfigError::MultiplierOutOfRange(200)));
    }

    #[test]
    fn test_crystal_bounds() {
        let fast = ClockSettings {
            crystal_hz: 40_000_000,
            ..ClockSettings::default()
        };
        assert_eq!(fast.validate(), Err(ConfigError::CrystalOutOfRange(40_000_000)));

        let none = ClockSettings {
            crystal_hz: 0,
            ..ClockSettings::default()
        };
        assert_eq!(none.validate(), Err(ConfigError::CrystalOutOfRange(0)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_huge_crystal_rejected_not_wrapped() {
        // 2^25 × 128 × 8 is 2^35: wraps to 0 in u32
        let settings: ClockSettings = toml::from_str(
            "crystal_hz = 33554432\nmultiplier = 127\nloop_divider = \"div8\"",
        )
        .unwrap();
        assert_eq!(
            settings.validate(),
            Err(ConfigError::CrystalOutOfRange(33_554_432))
        );
    }

    #[test]
    fn test_dco_must_fit_range() {
        // 2 × 122 × 32768 ≈ 8 MHz DCO is beyond FN_0
        let settings = ClockSettings {
            multiplier: 121,
            dco_range: DcoRange::Fn0,
            ..ClockSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DcoOutOfRange(_))
        ));
    }

    #[test]
    fn test_mclk_rating() {
        // DCOPLUS with /4: MCLK = 4 × 75 × 32768 ≈ 9.8 MHz
        let settings = ClockSettings {
            dco_plus: true,
            loop_divider: LoopDivider::Div4,
            dco_range: DcoRange::Fn3,
            ..ClockSettings::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::MclkTooFast(9_830_400)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_shipped_clock_toml_is_valid() {
        let settings: ClockSettings =
            toml::from_str(include_str!("../../../fll-clock-fw/clock.toml")).unwrap();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.fll_config().mclk_hz(), 2_457_600);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: ClockSettings = toml::from_str("multiplier = 121").unwrap();
        assert_eq!(settings.multiplier, 121);
        assert_eq!(settings.dco_range, DcoRange::Fn2);
        assert!(settings.output_mclk);
    }
}
