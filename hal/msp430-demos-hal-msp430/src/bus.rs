//! Memory-mapped register bus

use msp430_demos_hal::RegisterBus;

/// Direct volatile access to the peripheral address space
///
/// Zero-sized and `Copy`: every driver handle, including ones created inside
/// an interrupt handler, can own its own `Mmio`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mmio;

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read8(&self, addr: u16) -> u8 {
        // SAFETY: drivers only pass addresses from the device register maps
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline(always)]
    fn write8(&mut self, addr: u16, value: u8) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }

    #[inline(always)]
    fn read16(&self, addr: u16) -> u16 {
        // SAFETY: as above; word registers are even-aligned
        unsafe { core::ptr::read_volatile(addr as usize as *const u16) }
    }

    #[inline(always)]
    fn write16(&mut self, addr: u16, value: u16) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(addr as usize as *mut u16, value) }
    }
}
