//! CPU core trait.

use crate::{Bus, Ticks};

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. The bus is
/// passed into every tick rather than owned, so it can be shared with the
/// other components that run on the same clock.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Failure raised by a tick, wrapping the bus error type `E`.
    type Error<E>;

    /// Advance the CPU by exactly one clock cycle.
    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error<B::Error>>;

    /// Advance the CPU by `count` cycles, stopping at the first error.
    ///
    /// Equivalent to calling [`Cpu::tick`] `count` times.
    fn tick_n<B: Bus>(&mut self, bus: &mut B, count: Ticks) -> Result<(), Self::Error<B::Error>> {
        for _ in 0..count.get() {
            self.tick(bus)?;
        }
        Ok(())
    }

    /// Returns the current program counter.
    ///
    /// Returns `u32` so cores with wider address buses fit the same trait.
    /// 16-bit CPUs zero-extend.
    fn pc(&self) -> u32;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU has stopped and needs a reset.
    fn is_halted(&self) -> bool;

    /// Request an interrupt. Returns true if accepted.
    fn interrupt(&mut self) -> bool;

    /// Request a non-maskable interrupt.
    fn nmi(&mut self);

    /// Reset the CPU.
    fn reset(&mut self);
}
