//! Build-time demo settings
//!
//! Each firmware crate carries a TOML file next to its `Cargo.toml`. The
//! build script parses it into one of these types, validates it on the
//! host and embeds the postcard encoding in the image; the firmware decodes
//! it at boot with [`decode`].

pub mod clock;
pub mod echo;

use core::fmt;

pub use clock::ClockSettings;
pub use echo::EchoSettings;

use crate::uart::UartError;

/// Largest baud deviation accepted by validation, in parts per thousand
pub const MAX_BAUD_ERROR_PERMILLE: u32 = 30;

/// Settings validation and decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Embedded settings blob could not be decoded
    Decode,
    /// FLL multiplier outside 1..=127
    MultiplierOutOfRange(u8),
    /// Reference crystal outside the LFXT1 low-frequency range (Hz)
    CrystalOutOfRange(u32),
    /// DCO target outside the selected range's typical span (Hz)
    DcoOutOfRange(u32),
    /// MCLK above the family's rating (Hz)
    MclkTooFast(u32),
    /// Baud divider could not be computed
    Baud(UartError),
    /// Achievable baud rate too far from the requested one (‰)
    BaudErrorTooLarge(u32),
}

impl From<UartError> for ConfigError {
    fn from(e: UartError) -> Self {
        ConfigError::Baud(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Decode => write!(f, "settings blob is corrupt"),
            ConfigError::MultiplierOutOfRange(n) => {
                write!(f, "multiplier {} is outside 1..=127", n)
            }
            ConfigError::CrystalOutOfRange(hz) => {
                write!(f, "crystal at {} Hz is outside 10 kHz..=50 kHz", hz)
            }
            ConfigError::DcoOutOfRange(hz) => {
                write!(f, "DCO at {} Hz is outside the selected dco_range", hz)
            }
            ConfigError::MclkTooFast(hz) => write!(f, "MCLK at {} Hz exceeds 8 MHz", hz),
            ConfigError::Baud(e) => write!(f, "{}", e),
            ConfigError::BaudErrorTooLarge(permille) => {
                write!(f, "baud rate off by {}‰ (limit {}‰)", permille, MAX_BAUD_ERROR_PERMILLE)
            }
        }
    }
}

/// Decode settings embedded by a firmware build script
#[cfg(feature = "serde")]
pub fn decode<'a, T: serde::Deserialize<'a>>(blob: &'a [u8]) -> Result<T, ConfigError> {
    postcard::from_bytes(blob).map_err(|_| ConfigError::Decode)
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_trip_of_defaults() {
        let blob = postcard::to_stdvec(&EchoSettings::default()).unwrap();
        let decoded: EchoSettings = decode(&blob).unwrap();
        assert_eq!(decoded, EchoSettings::default());
    }

    #[test]
    fn test_decode_rejects_truncated_blob() {
        let blob = postcard::to_stdvec(&ClockSettings::default()).unwrap();
        let result: Result<ClockSettings, _> = decode(&blob[..1]);
        assert_eq!(result, Err(ConfigError::Decode));
    }
}
