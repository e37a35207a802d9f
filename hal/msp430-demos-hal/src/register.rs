//! Peripheral register access
//!
//! MSP430 peripherals live in a flat 16-bit address space and are accessed
//! with byte or word instructions. Drivers go through [`RegisterBus`] so the
//! backing store can be real MMIO or a plain byte array.

/// Byte and word access to memory-mapped peripheral registers
pub trait RegisterBus {
    /// Read an 8-bit register
    fn read8(&self, addr: u16) -> u8;

    /// Write an 8-bit register
    fn write8(&mut self, addr: u16, value: u8);

    /// Read a 16-bit register (little-endian, word aligned)
    fn read16(&self, addr: u16) -> u16;

    /// Write a 16-bit register (little-endian, word aligned)
    fn write16(&mut self, addr: u16, value: u16);

    /// Read-modify-write an 8-bit register
    fn modify8<F: FnOnce(u8) -> u8>(&mut self, addr: u16, f: F) {
        let value = f(self.read8(addr));
        self.write8(addr, value);
    }

    /// Read-modify-write a 16-bit register
    fn modify16<F: FnOnce(u16) -> u16>(&mut self, addr: u16, f: F) {
        let value = f(self.read16(addr));
        self.write16(addr, value);
    }

    /// `*addr |= mask`
    fn set_bits8(&mut self, addr: u16, mask: u8) {
        self.modify8(addr, |v| v | mask);
    }

    /// `*addr &= !mask`
    fn clear_bits8(&mut self, addr: u16, mask: u8) {
        self.modify8(addr, |v| v & !mask);
    }

    /// `*addr |= mask` on a word register
    fn set_bits16(&mut self, addr: u16, mask: u16) {
        self.modify16(addr, |v| v | mask);
    }

    /// `*addr &= !mask` on a word register
    fn clear_bits16(&mut self, addr: u16, mask: u16) {
        self.modify16(addr, |v| v & !mask);
    }
}

impl<B: RegisterBus> RegisterBus for &mut B {
    fn read8(&self, addr: u16) -> u8 {
        (**self).read8(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        (**self).write8(addr, value)
    }

    fn read16(&self, addr: u16) -> u16 {
        (**self).read16(addr)
    }

    fn write16(&mut self, addr: u16, value: u16) {
        (**self).write16(addr, value)
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::{RegisterFile, WriteRecord, REGISTER_SPACE};

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::RegisterBus;
    use heapless::Vec;

    /// Size of the emulated peripheral space (0x0000..0x0800)
    ///
    /// Covers the special-function, peripheral-8 and peripheral-16 regions
    /// of both demo chips.
    pub const REGISTER_SPACE: usize = 0x0800;

    /// Maximum number of writes kept in the journal
    const JOURNAL_DEPTH: usize = 64;

    /// One journaled register write
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WriteRecord {
        /// Register address
        pub addr: u16,
        /// Value written
        pub value: u16,
        /// True for a word write
        pub wide: bool,
    }

    /// Plain byte array standing in for the peripheral address space
    ///
    /// Reads return whatever was last written (or preset). Nothing changes
    /// on its own: flags such as TXIFG must be set by the test.
    pub struct RegisterFile {
        memory: [u8; REGISTER_SPACE],
        journal: Vec<WriteRecord, JOURNAL_DEPTH>,
    }

    impl Default for RegisterFile {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RegisterFile {
        /// Create a zeroed register file
        pub fn new() -> Self {
            Self {
                memory: [0; REGISTER_SPACE],
                journal: Vec::new(),
            }
        }

        /// Set a byte register without journaling it
        pub fn preset8(&mut self, addr: u16, value: u8) {
            self.memory[addr as usize] = value;
        }

        /// Set a word register without journaling it
        pub fn preset16(&mut self, addr: u16, value: u16) {
            let [lo, hi] = value.to_le_bytes();
            self.memory[addr as usize] = lo;
            self.memory[addr as usize + 1] = hi;
        }

        /// Writes performed so far, oldest first
        ///
        /// Writes past the journal depth are dropped.
        pub fn writes(&self) -> &[WriteRecord] {
            &self.journal
        }

        /// Index of the first journaled write to `addr`
        pub fn first_write_to(&self, addr: u16) -> Option<usize> {
            self.journal.iter().position(|w| w.addr == addr)
        }

        /// Forget journaled writes
        pub fn clear_journal(&mut self) {
            self.journal.clear();
        }

        fn record(&mut self, addr: u16, value: u16, wide: bool) {
            let _ = self.journal.push(WriteRecord { addr, value, wide });
        }
    }

    impl RegisterBus for RegisterFile {
        fn read8(&self, addr: u16) -> u8 {
            self.memory[addr as usize]
        }

        fn write8(&mut self, addr: u16, value: u8) {
            self.memory[addr as usize] = value;
            self.record(addr, value as u16, false);
        }

        fn read16(&self, addr: u16) -> u16 {
            u16::from_le_bytes([self.memory[addr as usize], self.memory[addr as usize + 1]])
        }

        fn write16(&mut self, addr: u16, value: u16) {
            self.preset16(addr, value);
            self.record(addr, value, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_access_is_little_endian() {
        let mut regs = RegisterFile::new();
        regs.write16(0x05C6, 0x1234);
        assert_eq!(regs.read8(0x05C6), 0x34);
        assert_eq!(regs.read8(0x05C7), 0x12);
        assert_eq!(regs.read16(0x05C6), 0x1234);
    }

    #[test]
    fn test_set_and_clear_bits() {
        let mut regs = RegisterFile::new();
        regs.preset8(0x0050, 0x40);
        regs.set_bits8(0x0050, 0x04);
        assert_eq!(regs.read8(0x0050), 0x44);
        regs.clear_bits8(0x0050, 0x40);
        assert_eq!(regs.read8(0x0050), 0x04);
    }

    #[test]
    fn test_journal_keeps_order_and_skips_presets() {
        let mut regs = RegisterFile::new();
        regs.preset8(0x0022, 0xFF);
        regs.write8(0x0026, 0x22);
        regs.write16(0x0120, 0x5A80);

        let writes = regs.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], WriteRecord { addr: 0x0026, value: 0x22, wide: false });
        assert_eq!(writes[1], WriteRecord { addr: 0x0120, value: 0x5A80, wide: true });
        assert_eq!(regs.first_write_to(0x0120), Some(1));
        assert_eq!(regs.first_write_to(0x0022), None);
    }

    #[test]
    fn test_bus_through_mutable_reference() {
        fn poke<B: RegisterBus>(mut bus: B) {
            bus.set_bits8(0x0021, 0xA5);
        }

        let mut regs = RegisterFile::new();
        poke(&mut regs);
        assert_eq!(regs.read8(0x0021), 0xA5);
    }
}
