//! 6502 CPU registers.

use crate::Status;
use crate::flags::{I, U};

/// 6502 CPU register set.
///
/// The whole programmer-visible machine state:
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: 8-bit processor status
///
/// `Default` is all zeroes, which is what tests usually want to start from.
/// Use [`Registers::power_on`] for the state the chip wakes up in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    /// Program counter. Always the address of the next byte to consume.
    pub pc: u16,
    /// Stack pointer (points to next free location, stack at $0100-$01FF).
    pub sp: u8,
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Processor status flags.
    pub p: Status,
}

impl Registers {
    /// Registers as the chip leaves them at power-on.
    ///
    /// - A, X, Y are undefined (we use 0)
    /// - SP is $FD, the value left by the reset sequence's three
    ///   suppressed pushes from $00
    /// - PC is loaded from the reset vector later (we use 0)
    /// - I is set; other flags are undefined, so only U and I are set
    #[must_use]
    pub const fn power_on() -> Self {
        Self {
            pc: 0,
            sp: 0xFD,
            a: 0,
            x: 0,
            y: 0,
            p: Status(U | I),
        }
    }

    /// Address the next push writes: SP points at the next free slot.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.sp as u16)
    }

    /// Address the next pull reads, one above SP.
    #[must_use]
    pub const fn pull_addr(&self) -> u16 {
        0x0100 | (self.sp.wrapping_add(1) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_wraps_within_page_one() {
        let mut regs = Registers::default();
        assert_eq!(regs.stack_addr(), 0x0100);
        assert_eq!(regs.pull_addr(), 0x0101);

        regs.sp = 0xFF;
        assert_eq!(regs.stack_addr(), 0x01FF);
        assert_eq!(regs.pull_addr(), 0x0100);
    }

    #[test]
    fn power_on_state() {
        let regs = Registers::power_on();
        assert_eq!(regs.sp, 0xFD);
        assert_eq!(regs.p, Status(0x24));
    }
}
