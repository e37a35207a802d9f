//! Board-agnostic logic for the msp430-demos firmware images
//!
//! This crate contains everything that does not need the msp430 target:
//!
//! - Register maps for the two demo chips
//! - Watchdog, port, FLL+, UCS and USCI_A register drivers
//! - Baud-rate divider math
//! - The UART echo state shared between `main` and the receive ISR
//! - Build-time settings types and their validation
//! - The bring-up sequence of each image
//!
//! Drivers are generic over [`msp430_demos_hal::RegisterBus`], so every
//! register sequence here is exercised on the host against a
//! `RegisterFile`.

#![no_std]
#![deny(unsafe_code)]

pub mod boot;
pub mod clock;
pub mod config;
pub mod device;
pub mod echo;
pub mod gpio;
pub mod uart;
pub mod watchdog;
