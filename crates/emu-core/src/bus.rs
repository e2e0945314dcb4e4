//! Memory and I/O bus interface.

use std::convert::Infallible;

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding, mirroring and peripheral side effects; a CPU
/// treats every address the same way and calls the bus exactly once per
/// access it declares.
///
/// Buses are never owned by the components that use them. They are lent
/// for the duration of a single tick so that the host can share one bus
/// between the CPU and its sibling chips.
pub trait Bus {
    /// Failure raised by an access. Buses that cannot fail use
    /// [`Infallible`].
    type Error;

    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> Result<u8, Self::Error>;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8) -> Result<(), Self::Error>;
}

/// Flat 64K RAM with no mapping or side effects.
///
/// Useful for tests and for hosts that only need plain memory.
#[derive(Clone)]
pub struct SimpleBus {
    ram: Vec<u8>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all 64K zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: vec![0; 0x1_0000],
        }
    }

    /// Copy `data` into RAM starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Inspect a byte without going through the [`Bus`] trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }
}

impl Bus for SimpleBus {
    type Error = Infallible;

    fn read(&mut self, address: u16) -> Result<u8, Infallible> {
        Ok(self.ram[address as usize])
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), Infallible> {
        self.ram[address as usize] = value;
        Ok(())
    }
}
