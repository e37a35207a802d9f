//! Register maps for the demo chips
//!
//! Only the registers the demos touch are listed. Addresses come from the
//! device datasheets; bit definitions shared by every family live with the
//! driver that uses them.

pub mod f41x;
pub mod f5438a;

/// Addresses of the registers a port driver needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRegisters {
    /// PxDIR
    pub dir: u16,
    /// PxSEL
    pub sel: u16,
}
