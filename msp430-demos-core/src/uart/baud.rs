//! USCI_A baud-rate divider
//!
//! With `N = f_BRCLK / baud`:
//!
//! - Oversampling (UCOS16 = 1): `UCBRx = INT(N / 16)`,
//!   `UCBRFx = round((N / 16 - INT(N / 16)) × 16)`, needs `N >= 16`.
//! - Low frequency (UCOS16 = 0): `UCBRx = INT(N)`,
//!   `UCBRSx = round((N - INT(N)) × 8)`.
//!
//! Everything is integer arithmetic; the fractional parts are carried as
//! the remainder of the integer division.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::UartError;

// UCAxMCTL fields
const UCOS16: u8 = 0x01;
const UCBRS_SHIFT: u8 = 1;
const UCBRF_SHIFT: u8 = 4;

const UCBRF_MAX: u64 = 15;
const UCBRS_MAX: u64 = 7;

/// Baud clock generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BaudGeneration {
    /// Sample at 16× the bit rate (UCOS16 = 1)
    #[default]
    Oversampling,
    /// Sample directly from BRCLK (UCOS16 = 0)
    LowFrequency,
}

/// Computed UCAxBRW / UCAxMCTL values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudDivider {
    /// UCBRx prescaler
    pub prescaler: u16,
    /// UCBRFx first-stage modulation (oversampling only)
    pub first_stage: u8,
    /// UCBRSx second-stage modulation (low-frequency only)
    pub second_stage: u8,
    /// UCOS16
    pub oversampling: bool,
    clock_hz: u32,
}

impl BaudDivider {
    /// Compute the divider for `baud` from a `clock_hz` bit clock
    pub fn compute(
        clock_hz: u32,
        baud: u32,
        generation: BaudGeneration,
    ) -> Result<Self, UartError> {
        if baud == 0 {
            return Err(UartError::InvalidBaudRate);
        }
        if clock_hz == 0 {
            return Err(UartError::NoClock);
        }

        let clock = clock_hz as u64;
        let baud = baud as u64;

        let (prescaler, first_stage, second_stage, oversampling) = match generation {
            BaudGeneration::Oversampling => {
                let prescaler = clock / (16 * baud);
                let remainder = clock - prescaler * 16 * baud;
                let first_stage = ((2 * remainder + baud) / (2 * baud)).min(UCBRF_MAX);
                (prescaler, first_stage as u8, 0, true)
            }
            BaudGeneration::LowFrequency => {
                let prescaler = clock / baud;
                let remainder = clock - prescaler * baud;
                let second_stage = ((16 * remainder + baud) / (2 * baud)).min(UCBRS_MAX);
                (prescaler, 0, second_stage as u8, false)
            }
        };

        if prescaler == 0 || prescaler > u16::MAX as u64 {
            return Err(UartError::DividerOutOfRange);
        }

        Ok(Self {
            prescaler: prescaler as u16,
            first_stage,
            second_stage,
            oversampling,
            clock_hz,
        })
    }

    /// Value for UCAxMCTL
    pub const fn mctl(&self) -> u8 {
        let os16 = if self.oversampling { UCOS16 } else { 0 };
        (self.first_stage << UCBRF_SHIFT) | (self.second_stage << UCBRS_SHIFT) | os16
    }

    /// Bit rate the divider actually produces (averaged over modulation)
    pub fn effective_baud(&self) -> u32 {
        let clock = self.clock_hz as u64;
        let rate = if self.oversampling {
            clock / (16 * self.prescaler as u64 + self.first_stage as u64)
        } else {
            clock * 8 / (8 * self.prescaler as u64 + self.second_stage as u64)
        };
        rate as u32
    }

    /// Deviation of the effective rate from `baud`, in parts per thousand
    pub fn error_permille(&self, baud: u32) -> u32 {
        if baud == 0 {
            return u32::MAX;
        }
        let effective = self.effective_baud() as u64;
        let baud = baud as u64;
        (effective.abs_diff(baud) * 1000 / baud) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_9600_from_default_smclk() {
        let divider =
            BaudDivider::compute(1_048_576, 9600, BaudGeneration::Oversampling).unwrap();
        assert_eq!(divider.prescaler, 6);
        assert_eq!(divider.first_stage, 13);
        assert_eq!(divider.second_stage, 0);
        assert_eq!(divider.mctl(), 0xD1);
        assert!(divider.error_permille(9600) <= 3);
    }

    #[test]
    fn test_9600_from_aclk_low_frequency() {
        let divider =
            BaudDivider::compute(32_768, 9600, BaudGeneration::LowFrequency).unwrap();
        assert_eq!(divider.prescaler, 3);
        assert_eq!(divider.second_stage, 3);
        assert_eq!(divider.mctl(), 0x06);
        // 32768 × 8 / (8 × 3 + 3)
        assert_eq!(divider.effective_baud(), 9709);
    }

    #[test]
    fn test_oversampling_needs_sixteen_clocks_per_bit() {
        assert_eq!(
            BaudDivider::compute(32_768, 9600, BaudGeneration::Oversampling),
            Err(UartError::DividerOutOfRange)
        );
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert_eq!(
            BaudDivider::compute(1_048_576, 0, BaudGeneration::Oversampling),
            Err(UartError::InvalidBaudRate)
        );
        assert_eq!(
            BaudDivider::compute(0, 9600, BaudGeneration::LowFrequency),
            Err(UartError::NoClock)
        );
    }

    #[test]
    fn test_prescaler_overflow_rejected() {
        assert_eq!(
            BaudDivider::compute(25_000_000, 300, BaudGeneration::LowFrequency),
            Err(UartError::DividerOutOfRange)
        );
    }

    proptest! {
        #[test]
        fn oversampling_divider_within_one_step(
            clock in 1_000_000u32..25_000_000,
            baud in 300u32..60_000,
        ) {
            prop_assume!(clock / baud >= 16 && clock / (16 * baud) <= u16::MAX as u32);
            let d = BaudDivider::compute(clock, baud, BaudGeneration::Oversampling).unwrap();
            let steps = 16 * d.prescaler as u64 + d.first_stage as u64;
            prop_assert!((steps * baud as u64).abs_diff(clock as u64) <= baud as u64);
        }

        #[test]
        fn low_frequency_divider_within_one_step(
            clock in 32_768u32..25_000_000,
            baud in 300u32..115_200,
        ) {
            prop_assume!(clock >= baud && clock / baud <= u16::MAX as u32);
            let d = BaudDivider::compute(clock, baud, BaudGeneration::LowFrequency).unwrap();
            let eighths = 8 * d.prescaler as u64 + d.second_stage as u64;
            prop_assert!((eighths * baud as u64).abs_diff(8 * clock as u64) <= baud as u64);
        }
    }
}
