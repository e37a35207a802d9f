//! msp430-demos Hardware Abstraction Layer
//!
//! This crate defines the small set of traits the demo drivers are written
//! against. The drivers in `msp430-demos-core` only ever talk to a
//! [`RegisterBus`], so the same register sequences run on silicon (through
//! `msp430-demos-hal-msp430`) and on the host (through [`RegisterFile`]).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fll-clock-fw / uart-echo-fw            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  msp430-demos-core (register drivers)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  msp430-demos-hal (this crate - traits) │
//! └─────────────────────────────────────────┘
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ msp430-demos- │       │ RegisterFile  │
//! │  hal-msp430   │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::RegisterBus`] - 8/16-bit peripheral register access
//! - [`uart::UartTx`], [`uart::UartRx`] - Byte-level serial access

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod register;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::Pins;
#[cfg(any(test, feature = "mock"))]
pub use register::RegisterFile;
pub use register::RegisterBus;
pub use uart::{UartRx, UartTx};
