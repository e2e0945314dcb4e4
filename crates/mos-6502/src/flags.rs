//! 6502 processor status register (P).
//!
//! Bit positions match the silicon; software reads P directly after PHP, so
//! they are part of the ROM-visible contract.
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//!  N V U B D I Z C
//! ```

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable - when set, IRQ interrupts are ignored.
pub const I: u8 = 0x04;

/// Decimal mode - enables BCD arithmetic for ADC/SBC.
pub const D: u8 = 0x08;

/// Break flag - only exists in copies of P pushed to the stack.
/// Set when BRK/PHP push status, clear when IRQ/NMI push status.
pub const B: u8 = 0x10;

/// Unused bit - always pushed as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status register.
///
/// A plain byte. Nothing here forces B or U on or off except the stack
/// conversions, so the host may store any pattern and instructions that do
/// not touch a bit leave it exactly as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Value pushed by BRK and PHP (break and unused both set).
    #[must_use]
    pub const fn to_byte_brk(self) -> u8 {
        self.0 | U | B
    }

    /// Value pushed by IRQ and NMI (unused set, break clear).
    #[must_use]
    pub const fn to_byte_irq(self) -> u8 {
        (self.0 | U) & !B
    }

    /// Status pulled by PLP and RTI. B has no latch so it is dropped.
    #[must_use]
    pub const fn from_stack(value: u8) -> Self {
        Self((value | U) & !B)
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Update N and Z from a result byte.
    pub fn update_nz(&mut self, value: u8) {
        self.set_if(N, value & 0x80 != 0);
        self.set_if(Z, value == 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_nz_recomputes_both() {
        let mut p = Status(N | Z | C);
        p.update_nz(0x01);
        assert_eq!(p, Status(C));

        p.update_nz(0x00);
        assert_eq!(p, Status(C | Z));

        p.update_nz(0x80);
        assert_eq!(p, Status(C | N));
    }

    #[test]
    fn set_if_leaves_other_bits() {
        let mut p = Status(0xFF);
        p.set_if(D, false);
        assert_eq!(p.0, 0xF7);

        let mut p = Status(0x00);
        p.set_if(D, true);
        assert_eq!(p.0, 0x08);
    }

    #[test]
    fn stack_conversions() {
        assert_eq!(Status(C).to_byte_brk(), C | U | B);
        assert_eq!(Status(C | B).to_byte_irq(), C | U);
        assert_eq!(Status::from_stack(0xFF), Status(0xEF));
        assert_eq!(Status::from_stack(0x00), Status(U));
    }
}
