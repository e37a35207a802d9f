//! Clock modules
//!
//! - [`fll`] - FLL+ on the 4xx family, configured by the clock demo
//! - [`ucs`] - Unified Clock System on 5xx/6xx, queried by the UART demo

pub mod fll;
pub mod ucs;

pub use fll::{DcoRange, Fll, FllConfig, LoadCapacitance, LoopDivider, OscillatorFaults};
pub use ucs::{ClockSignal, ClockSources, Ucs};
