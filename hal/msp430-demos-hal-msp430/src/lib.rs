//! MSP430-specific HAL for the msp430-demos firmware
//!
//! Implements [`msp430_demos_hal::RegisterBus`] over real memory-mapped
//! registers and supplies what a peripheral access crate normally would:
//! the interrupt vector table and `device.x` for msp430-rt.
//!
//! # Features
//!
//! - `msp430f41x` - Vector table for the MSP430F41x (FLL clock demo)
//! - `msp430f5438a` - Vector table for the MSP430F5438A (UART echo demo)
//! - `defmt` - Enable debug formatting support in `msp430-demos-hal`

#![no_std]
#![cfg_attr(
    target_arch = "msp430",
    feature(abi_msp430_interrupt, asm_experimental_arch)
)]

pub mod bus;
pub mod lpm;
#[cfg(target_arch = "msp430")]
pub mod vectors;

pub use bus::Mmio;

#[cfg(all(target_arch = "msp430", any(feature = "msp430f41x", feature = "msp430f5438a")))]
pub use vectors::Interrupt;
// Same name in the type and macro namespaces: `use hal::interrupt;` brings
// in both, which is what `#[interrupt]` expects to find.
#[cfg(all(target_arch = "msp430", any(feature = "msp430f41x", feature = "msp430f5438a")))]
pub use vectors::Interrupt as interrupt;
#[cfg(target_arch = "msp430")]
pub use msp430_rt_macros::interrupt;
