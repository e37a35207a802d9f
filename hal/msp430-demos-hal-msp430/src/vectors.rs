//! Interrupt vector tables
//!
//! msp430-rt places `__INTERRUPTS` in the vector region declared by the
//! image's `memory.x` and resolves every named handler through
//! `device.x`, defaulting to `DefaultHandler`. The reset vector is owned by
//! msp430-rt and is not part of these tables.

/// One vector table slot
#[doc(hidden)]
pub union Vector {
    _handler: unsafe extern "msp430-interrupt" fn(),
    _reserved: u16,
}

/// MSP430F41x: 16 vectors at 0xFFE0, reset excluded
#[cfg(feature = "msp430f41x")]
pub mod f41x {
    use super::Vector;

    extern "msp430-interrupt" {
        fn BASICTIMER();
        fn PORT2();
        fn PORT1();
        fn TIMERA1();
        fn TIMERA0();
        fn WDT();
        fn COMPARATORA();
        fn NMI();
    }

    #[doc(hidden)]
    #[link_section = ".vector_table.interrupts"]
    #[no_mangle]
    #[used]
    pub static __INTERRUPTS: [Vector; 15] = [
        Vector { _handler: BASICTIMER },
        Vector { _handler: PORT2 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _handler: PORT1 },
        Vector { _handler: TIMERA1 },
        Vector { _handler: TIMERA0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _handler: WDT },
        Vector { _handler: COMPARATORA },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _handler: NMI },
    ];

    /// Interrupt sources, numbered by vector slot
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[allow(non_camel_case_types)]
    pub enum Interrupt {
        BASICTIMER = 0,
        PORT2 = 1,
        PORT1 = 4,
        TIMERA1 = 5,
        TIMERA0 = 6,
        WDT = 10,
        COMPARATORA = 11,
        NMI = 14,
    }
}

/// MSP430F5438A: 64 vectors at 0xFF80, reset excluded
#[cfg(feature = "msp430f5438a")]
pub mod f5438a {
    use super::Vector;

    extern "msp430-interrupt" {
        fn RTC_A();
        fn PORT2();
        fn USCI_B3();
        fn USCI_A3();
        fn USCI_B1();
        fn USCI_A1();
        fn PORT1();
        fn TIMER1_A1();
        fn TIMER1_A0();
        fn DMA();
        fn USCI_B2();
        fn USCI_A2();
        fn TIMER0_A1();
        fn TIMER0_A0();
        fn ADC12_A();
        fn USCI_B0();
        fn USCI_A0();
        fn WDT();
        fn TIMER0_B1();
        fn TIMER0_B0();
        fn UNMI();
        fn SYSNMI();
    }

    #[doc(hidden)]
    #[link_section = ".vector_table.interrupts"]
    #[no_mangle]
    #[used]
    pub static __INTERRUPTS: [Vector; 63] = [
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _reserved: 0 },
        Vector { _handler: RTC_A },
        Vector { _handler: PORT2 },
        Vector { _handler: USCI_B3 },
        Vector { _handler: USCI_A3 },
        Vector { _handler: USCI_B1 },
        Vector { _handler: USCI_A1 },
        Vector { _handler: PORT1 },
        Vector { _handler: TIMER1_A1 },
        Vector { _handler: TIMER1_A0 },
        Vector { _handler: DMA },
        Vector { _handler: USCI_B2 },
        Vector { _handler: USCI_A2 },
        Vector { _handler: TIMER0_A1 },
        Vector { _handler: TIMER0_A0 },
        Vector { _handler: ADC12_A },
        Vector { _handler: USCI_B0 },
        Vector { _handler: USCI_A0 },
        Vector { _handler: WDT },
        Vector { _handler: TIMER0_B1 },
        Vector { _handler: TIMER0_B0 },
        Vector { _handler: UNMI },
        Vector { _handler: SYSNMI },
    ];

    /// Interrupt sources, numbered by vector slot
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[allow(non_camel_case_types)]
    pub enum Interrupt {
        RTC_A = 41,
        PORT2 = 42,
        USCI_B3 = 43,
        USCI_A3 = 44,
        USCI_B1 = 45,
        USCI_A1 = 46,
        PORT1 = 47,
        TIMER1_A1 = 48,
        TIMER1_A0 = 49,
        DMA = 50,
        USCI_B2 = 51,
        USCI_A2 = 52,
        TIMER0_A1 = 53,
        TIMER0_A0 = 54,
        ADC12_A = 55,
        USCI_B0 = 56,
        USCI_A0 = 57,
        WDT = 58,
        TIMER0_B1 = 59,
        TIMER0_B0 = 60,
        UNMI = 61,
        SYSNMI = 62,
    }
}

#[cfg(feature = "msp430f41x")]
pub use f41x::Interrupt;
#[cfg(feature = "msp430f5438a")]
pub use f5438a::Interrupt;
