//! Cycle-stepped MOS 6502 CPU core.
//!
//! Each `step()` advances exactly one clock cycle and performs at most one
//! bus access. Instructions take multiple cycles; the CPU tracks where it
//! is between them, so a host can interleave other chips cycle by cycle.
//!
//! Instructions are looked up in a [`DispatchTable`] built per
//! [`Variant`]. The 151 documented opcodes are present; any other byte
//! jams the CPU with [`CpuError::InvalidOpcode`] until it is reset.

mod cpu;
mod error;
pub mod flags;
mod instruction;
pub mod opcodes;
mod ops;
mod registers;
mod table;
mod variant;

pub use cpu::Mos6502;
pub use error::CpuError;
pub use flags::Status;
pub use instruction::{AddressingMode, Instruction, Operation};
pub use registers::Registers;
pub use table::DispatchTable;
pub use variant::Variant;
