//! Dispatch table entries.
//!
//! An opcode selects an [`Instruction`]: what it does ([`Operation`]),
//! where its operand comes from ([`AddressingMode`]) and how many cycles it
//! takes. The scheduler combines the first two into a per-cycle sequence.

use std::fmt;

use crate::{Registers, Status};

/// Where an instruction's operand comes from.
///
/// The 6502 has 13 addressing modes:
/// - Implied: No operand (e.g., CLC, RTS)
/// - Accumulator: Operates on A register (e.g., ASL A)
/// - Immediate: #$nn (literal value)
/// - Zero Page: $nn (8-bit address in page zero)
/// - Zero Page,X / Zero Page,Y: $nn,X / $nn,Y (wraps in page zero)
/// - Absolute: $nnnn (16-bit address)
/// - Absolute,X / Absolute,Y: $nnnn,X / $nnnn,Y (may cross page)
/// - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
/// - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
/// - Indirect Indexed: ($nn),Y (zero page pointer + Y)
/// - Relative: Branch offset (-128 to +127)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

/// What an instruction does, with its semantic handler.
///
/// Handler-carrying variants are grouped by how they use the bus; the
/// addressing mode then decides which cycles perform that access.
#[derive(Clone, Copy)]
pub enum Operation {
    /// Register-only effect (flag changes, transfers, register inc/dec).
    Implied(fn(&mut Registers)),
    /// Consumes one operand byte.
    Read(fn(&mut Registers, u8)),
    /// Produces one byte to store.
    Write(fn(&Registers) -> u8),
    /// Read-modify-write, on memory or on A in accumulator mode.
    Modify(fn(&mut Registers, u8) -> u8),
    /// Conditional relative branch.
    Branch(fn(Status) -> bool),
    /// Pushes one byte.
    Push(fn(&Registers) -> u8),
    /// Pulls one byte.
    Pull(fn(&mut Registers, u8)),
    /// JMP, absolute or indirect.
    Jump,
    /// JSR.
    JumpSubroutine,
    /// RTS.
    ReturnFromSubroutine,
    /// RTI.
    ReturnFromInterrupt,
    /// BRK.
    Break,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Implied(_) => "Implied",
            Self::Read(_) => "Read",
            Self::Write(_) => "Write",
            Self::Modify(_) => "Modify",
            Self::Branch(_) => "Branch",
            Self::Push(_) => "Push",
            Self::Pull(_) => "Pull",
            Self::Jump => "Jump",
            Self::JumpSubroutine => "JumpSubroutine",
            Self::ReturnFromSubroutine => "ReturnFromSubroutine",
            Self::ReturnFromInterrupt => "ReturnFromInterrupt",
            Self::Break => "Break",
        };
        f.write_str(name)
    }
}

/// One dispatch table entry.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    /// Assembler mnemonic, for logs.
    pub mnemonic: &'static str,
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Base cycle count including the opcode fetch. Page-crossing and
    /// taken-branch penalties come on top.
    pub cycles: u8,
}

impl Instruction {
    /// Whether an indexed read can take one extra cycle on a page cross.
    #[must_use]
    pub const fn has_page_penalty(&self) -> bool {
        let indexed = matches!(
            self.mode,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectIndexed
        );
        indexed && matches!(self.operation, Operation::Read(_))
    }
}
