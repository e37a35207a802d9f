//! Low-power modes
//!
//! Entering an LPM sets status-register bits; the CPU stops on the same
//! instruction. Interrupt handlers return into the same mode because the
//! saved SR is restored on RETI, so `main` only continues past the sleep
//! if a handler clears the bits on the stack.

/// SR.GIE
pub const GIE: u16 = 0x0008;
/// SR.CPUOFF
pub const CPUOFF: u16 = 0x0010;
/// SR.SCG0
pub const SCG0: u16 = 0x0040;
/// SR.SCG1
pub const SCG1: u16 = 0x0080;

/// LPM3: CPU, MCLK, SMCLK, DCO off; ACLK running
pub const LPM3_BITS: u16 = SCG1 | SCG0 | CPUOFF;

/// Enter LPM3 with interrupts enabled
///
/// Returns only if an interrupt handler wakes the CPU.
#[inline(always)]
pub fn enter_lpm3_with_interrupts() {
    #[cfg(target_arch = "msp430")]
    // SAFETY: sets SR bits only; wakeup is the interrupt handlers' business
    unsafe {
        core::arch::asm!("bis.w #{bits}, r2", bits = const LPM3_BITS | GIE);
    };
}

/// Stop here for good with interrupts disabled
pub fn halt() -> ! {
    msp430::interrupt::disable();
    loop {
        msp430::asm::nop();
    }
}
