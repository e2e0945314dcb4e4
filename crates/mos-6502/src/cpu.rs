//! 6502 CPU implementation.
//!
//! Cycle-accurate emulation where each `step()` advances exactly one clock
//! cycle and performs at most one bus access. Instructions come from the
//! dispatch table; their addressing mode decides what each cycle does and
//! their semantic handler runs on the commit cycle.
//!
//! Dummy accesses the silicon makes (index fix-up reads, the unmodified
//! write-back of read-modify-write, stack and branch reads) go to the bus
//! with their value discarded. Implied and accumulator instructions are the
//! exception: their second cycle is idle.

use emu_core::{Bus, Cpu, Ticks};

use crate::flags::I;
use crate::instruction::{AddressingMode, Instruction, Operation};
use crate::table::DispatchTable;
use crate::{CpuError, Registers, Status, Variant};

/// Internal state tracking instruction execution.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Next cycle fetches an opcode (or starts a pending interrupt).
    FetchOpcode,
    /// Executing the cycles of a fetched instruction.
    Execute(Instruction),
    /// Running a reset or interrupt sequence.
    Interrupt(Sequence),
    /// Fetched a byte with no table entry. Only a reset leaves this state.
    Jammed { opcode: u8, pc: u16 },
}

/// The seven-cycle sequences that load PC from a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sequence {
    Break,
    Irq,
    Nmi,
    Reset,
}

impl Sequence {
    const fn vector(self) -> u16 {
        match self {
            Self::Nmi => 0xFFFA,
            Self::Reset => 0xFFFC,
            Self::Break | Self::Irq => 0xFFFE,
        }
    }
}

/// The MOS 6502 CPU.
///
/// Registers are public so the host sees the same state the core works on.
/// The bus is lent to each [`Mos6502::step`] call and never stored.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,

    /// Opcode table for the configured variant.
    table: Box<DispatchTable>,

    variant: Variant,

    /// Current execution state.
    state: State,

    /// Cycle within the current instruction (0 = opcode fetch).
    cycle: u8,

    /// Effective address, or branch target once computed.
    addr: u16,

    /// Set once `addr` is final for the current instruction.
    resolved: bool,

    /// Indexing carried into the high byte; `addr` still needs fixing.
    page_crossed: bool,

    /// Progress through the data phase of read-modify-write.
    phase: u8,

    /// Temporary data register.
    data: u8,

    /// Zero-page pointer for indexed and indirect modes.
    pointer: u8,

    /// NMI edge detector - set when an NMI has been signalled.
    nmi_pending: bool,

    /// IRQ accepted and waiting for the next instruction boundary.
    irq_pending: bool,

    /// Total cycles completed.
    total_cycles: Ticks,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new(Registers::power_on())
    }
}

impl Mos6502 {
    /// Create an NMOS 6502 that will fetch its first opcode at `regs.pc`.
    #[must_use]
    pub fn new(regs: Registers) -> Self {
        Self::with_variant(regs, Variant::default())
    }

    /// Create a CPU modelling a specific family member.
    #[must_use]
    pub fn with_variant(regs: Registers, variant: Variant) -> Self {
        Self {
            regs,
            table: Box::new(DispatchTable::new(variant)),
            variant,
            state: State::FetchOpcode,
            cycle: 0,
            addr: 0,
            resolved: false,
            page_crossed: false,
            phase: 0,
            data: 0,
            pointer: 0,
            nmi_pending: false,
            irq_pending: false,
            total_cycles: Ticks::ZERO,
        }
    }

    /// The family member this CPU models.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Dispatch table entry for an opcode, `None` for undocumented bytes.
    #[must_use]
    pub fn instruction(&self, opcode: u8) -> Option<&Instruction> {
        self.table.get(opcode)
    }

    /// True between instructions, when the next cycle will fetch.
    #[must_use]
    pub const fn is_instruction_complete(&self) -> bool {
        matches!(self.state, State::FetchOpcode)
    }

    /// Cycles completed since construction.
    #[must_use]
    pub const fn cycles(&self) -> Ticks {
        self.total_cycles
    }

    /// Execute one CPU cycle.
    ///
    /// A bus error aborts the cycle before anything is mutated, so the
    /// same cycle can be retried.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.state {
            State::FetchOpcode => self.begin_instruction(bus)?,
            State::Execute(instr) => self.execute_instruction(bus, instr)?,
            State::Interrupt(seq) => self.sequence_cycle(bus, seq)?,
            State::Jammed { opcode, pc } => return Err(CpuError::InvalidOpcode { opcode, pc }),
        }
        self.total_cycles += Ticks::new(1);
        Ok(())
    }

    /// Instruction boundary: service interrupts, else fetch and decode.
    fn begin_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        if self.nmi_pending {
            self.nmi_pending = false;
            return self.begin_sequence(bus, Sequence::Nmi);
        }
        if self.irq_pending && !self.regs.p.is_set(I) {
            self.irq_pending = false;
            return self.begin_sequence(bus, Sequence::Irq);
        }

        let pc = self.regs.pc;
        let opcode = read(bus, pc)?;
        let Some(&instr) = self.table.get(opcode) else {
            log::warn!("invalid opcode ${opcode:02X} at ${pc:04X}, CPU jammed");
            self.state = State::Jammed { opcode, pc };
            return Err(CpuError::InvalidOpcode { opcode, pc });
        };
        log::trace!("${pc:04X}: {} (${opcode:02X})", instr.mnemonic);

        self.regs.pc = pc.wrapping_add(1);
        self.cycle = 1;
        self.resolved = false;
        self.page_crossed = false;
        self.phase = 0;
        self.state = State::Execute(instr);
        Ok(())
    }

    fn begin_sequence<B: Bus>(
        &mut self,
        bus: &mut B,
        seq: Sequence,
    ) -> Result<(), CpuError<B::Error>> {
        log::debug!("{seq:?} at ${:04X}", self.regs.pc);
        self.state = State::Interrupt(seq);
        self.cycle = 0;
        self.sequence_cycle(bus, seq)
    }

    /// Finish current instruction and return to opcode fetch.
    fn finish(&mut self) {
        self.state = State::FetchOpcode;
        self.cycle = 0;
    }

    /// Execute one cycle of the current instruction.
    fn execute_instruction<B: Bus>(
        &mut self,
        bus: &mut B,
        instr: Instruction,
    ) -> Result<(), CpuError<B::Error>> {
        match instr.operation {
            Operation::Implied(op) => {
                self.commit_on_last_cycle(instr, op);
                Ok(())
            }
            Operation::Modify(op) if instr.mode == AddressingMode::Accumulator => {
                self.commit_on_last_cycle(instr, |regs| {
                    let a = regs.a;
                    regs.a = op(regs, a);
                });
                Ok(())
            }
            Operation::Read(_) | Operation::Write(_) | Operation::Modify(_) => {
                self.memory_cycle(bus, instr)
            }
            Operation::Branch(taken) => self.branch_cycle(bus, taken),
            Operation::Push(value) => self.push_cycle(bus, value),
            Operation::Pull(op) => self.pull_cycle(bus, op),
            Operation::Jump if instr.mode == AddressingMode::Indirect => self.jmp_ind_cycle(bus),
            Operation::Jump => self.jmp_abs_cycle(bus),
            Operation::JumpSubroutine => self.jsr_cycle(bus),
            Operation::ReturnFromSubroutine => self.rts_cycle(bus),
            Operation::ReturnFromInterrupt => self.rti_cycle(bus),
            Operation::Break => self.sequence_cycle(bus, Sequence::Break),
        }
    }

    /// Implied and accumulator instructions: idle until the last declared
    /// cycle, then apply the effect in one go.
    fn commit_on_last_cycle(&mut self, instr: Instruction, effect: impl FnOnce(&mut Registers)) {
        if self.cycle + 1 < instr.cycles {
            self.cycle += 1;
        } else {
            effect(&mut self.regs);
            self.finish();
        }
    }

    // ========================================================================
    // Bus helpers
    // ========================================================================

    /// Read the byte at PC and advance PC.
    fn fetch_operand<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError<B::Error>> {
        let value = read(bus, self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) -> Result<(), CpuError<B::Error>> {
        write(bus, self.regs.stack_addr(), value)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError<B::Error>> {
        let value = read(bus, self.regs.pull_addr())?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        Ok(value)
    }

    // ========================================================================
    // Memory operands
    // ========================================================================

    /// One cycle of a read, write or read-modify-write instruction.
    fn memory_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        instr: Instruction,
    ) -> Result<(), CpuError<B::Error>> {
        if !self.resolved {
            // Only reads may skip the index fix-up cycle.
            let fix_always = !matches!(instr.operation, Operation::Read(_));
            if self.resolve_step(bus, instr.mode, fix_always)? {
                self.cycle += 1;
                return Ok(());
            }
        }

        match instr.operation {
            Operation::Read(op) => {
                let value = read(bus, self.addr)?;
                if instr.mode == AddressingMode::Immediate {
                    self.regs.pc = self.regs.pc.wrapping_add(1);
                }
                op(&mut self.regs, value);
                self.finish();
            }
            Operation::Write(value) => {
                write(bus, self.addr, value(&self.regs))?;
                self.finish();
            }
            Operation::Modify(op) => match self.phase {
                0 => {
                    self.data = read(bus, self.addr)?;
                    self.phase = 1;
                    self.cycle += 1;
                }
                1 => {
                    // Unmodified byte goes back first.
                    write(bus, self.addr, self.data)?;
                    self.phase = 2;
                    self.cycle += 1;
                }
                _ => {
                    let mut next = self.regs;
                    let value = op(&mut next, self.data);
                    write(bus, self.addr, value)?;
                    self.regs = next;
                    self.finish();
                }
            },
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Advance effective address computation by one cycle.
    ///
    /// Returns false without using the cycle when the address is already
    /// known (immediate mode), so the data access happens this cycle.
    fn resolve_step<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: AddressingMode,
        fix_always: bool,
    ) -> Result<bool, CpuError<B::Error>> {
        use AddressingMode as M;

        match (mode, self.cycle) {
            (M::Immediate, _) => {
                self.addr = self.regs.pc;
                self.resolved = true;
                return Ok(false);
            }
            (M::ZeroPage, _) => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                self.resolved = true;
            }

            (M::ZeroPageX | M::ZeroPageY | M::IndexedIndirect | M::IndirectIndexed, 1) => {
                self.pointer = self.fetch_operand(bus)?;
            }
            // Zero page indexing wraps within page zero. The unindexed
            // pointer is read while the index is added.
            (M::ZeroPageX, _) => {
                read(bus, u16::from(self.pointer))?;
                self.addr = u16::from(self.pointer.wrapping_add(self.regs.x));
                self.resolved = true;
            }
            (M::ZeroPageY, _) => {
                read(bus, u16::from(self.pointer))?;
                self.addr = u16::from(self.pointer.wrapping_add(self.regs.y));
                self.resolved = true;
            }

            (M::Absolute | M::AbsoluteX | M::AbsoluteY, 1) => {
                self.addr = u16::from(self.fetch_operand(bus)?);
            }
            (M::Absolute, _) => {
                self.addr |= u16::from(self.fetch_operand(bus)?) << 8;
                self.resolved = true;
            }
            (M::AbsoluteX | M::AbsoluteY, 2) => {
                let hi = self.fetch_operand(bus)?;
                let index = if mode == M::AbsoluteX { self.regs.x } else { self.regs.y };
                self.index_low_byte(hi, index, fix_always);
            }
            (M::AbsoluteX | M::AbsoluteY, _) => self.fix_page(bus)?,

            // Pointer bytes wrap within page zero.
            (M::IndexedIndirect, 2) => {
                read(bus, u16::from(self.pointer))?;
                self.pointer = self.pointer.wrapping_add(self.regs.x);
            }
            (M::IndexedIndirect, 3) => {
                self.addr = u16::from(read(bus, u16::from(self.pointer))?);
            }
            (M::IndexedIndirect, _) => {
                let hi = read(bus, u16::from(self.pointer.wrapping_add(1)))?;
                self.addr |= u16::from(hi) << 8;
                self.resolved = true;
            }

            (M::IndirectIndexed, 2) => {
                self.addr = u16::from(read(bus, u16::from(self.pointer))?);
            }
            (M::IndirectIndexed, 3) => {
                let hi = read(bus, u16::from(self.pointer.wrapping_add(1)))?;
                self.index_low_byte(hi, self.regs.y, fix_always);
            }
            (M::IndirectIndexed, _) => self.fix_page(bus)?,

            _ => unreachable!("{mode:?} has no memory operand"),
        }
        Ok(true)
    }

    /// Add the index to the low byte only, as the silicon does first.
    fn index_low_byte(&mut self, hi: u8, index: u8, fix_always: bool) {
        let (lo, crossed) = (self.addr as u8).overflowing_add(index);
        self.addr = u16::from_le_bytes([lo, hi]);
        self.page_crossed = crossed;
        self.resolved = !crossed && !fix_always;
    }

    /// Read the address as indexed so far, then carry into the high byte.
    fn fix_page<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        read(bus, self.addr)?;
        if self.page_crossed {
            self.addr = self.addr.wrapping_add(0x100);
        }
        self.resolved = true;
        Ok(())
    }

    // ========================================================================
    // Control flow and stack
    // ========================================================================

    fn branch_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        taken: fn(Status) -> bool,
    ) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 => {
                let offset = self.fetch_operand(bus)?;
                if taken(self.regs.p) {
                    self.data = offset;
                    self.cycle = 2;
                } else {
                    self.finish();
                }
            }
            2 => {
                read(bus, self.regs.pc)?;
                let target = self.regs.pc.wrapping_add_signed(i16::from(self.data as i8));
                if (target ^ self.regs.pc) & 0xFF00 == 0 {
                    self.regs.pc = target;
                    self.finish();
                } else {
                    // Page crossed - one more cycle to fix PCH.
                    self.addr = target;
                    self.cycle = 3;
                }
            }
            3 => {
                // PCH is still the old page here.
                read(bus, (self.regs.pc & 0xFF00) | (self.addr & 0x00FF))?;
                self.regs.pc = self.addr;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn push_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        value: fn(&Registers) -> u8,
    ) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 => {
                read(bus, self.regs.pc)?;
                self.cycle = 2;
            }
            2 => {
                self.push(bus, value(&self.regs))?;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn pull_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        op: fn(&mut Registers, u8),
    ) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 | 2 => self.stack_dummy_read(bus)?,
            3 => {
                let value = self.pull(bus)?;
                op(&mut self.regs, value);
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn jmp_abs_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                self.cycle = 2;
            }
            2 => {
                let hi = read(bus, self.regs.pc)?;
                self.regs.pc = self.addr | (u16::from(hi) << 8);
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn jmp_ind_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                self.cycle = 2;
            }
            2 => {
                self.addr |= u16::from(self.fetch_operand(bus)?) << 8;
                self.cycle = 3;
            }
            3 => {
                self.data = read(bus, self.addr)?;
                self.cycle = 4;
            }
            4 => {
                // 6502 bug: the pointer's high byte never carries.
                let hi_addr = (self.addr & 0xFF00) | (self.addr.wrapping_add(1) & 0x00FF);
                let hi = read(bus, hi_addr)?;
                self.regs.pc = u16::from_le_bytes([self.data, hi]);
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn jsr_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                self.cycle = 2;
            }
            2 => {
                read(bus, self.regs.stack_addr())?;
                self.cycle = 3;
            }
            // The pushed return address is the last byte of the JSR.
            3 => {
                self.push(bus, (self.regs.pc >> 8) as u8)?;
                self.cycle = 4;
            }
            4 => {
                self.push(bus, self.regs.pc as u8)?;
                self.cycle = 5;
            }
            5 => {
                let hi = read(bus, self.regs.pc)?;
                self.regs.pc = self.addr | (u16::from(hi) << 8);
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn rts_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 | 2 => self.stack_dummy_read(bus)?,
            3 => {
                self.addr = u16::from(self.pull(bus)?);
                self.cycle = 4;
            }
            4 => {
                self.addr |= u16::from(self.pull(bus)?) << 8;
                self.cycle = 5;
            }
            5 => {
                // Step past the last byte of the JSR.
                read(bus, self.addr)?;
                self.regs.pc = self.addr.wrapping_add(1);
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn rti_cycle<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            1 | 2 => self.stack_dummy_read(bus)?,
            3 => {
                let p = self.pull(bus)?;
                self.regs.p = Status::from_stack(p);
                self.cycle = 4;
            }
            4 => {
                self.addr = u16::from(self.pull(bus)?);
                self.cycle = 5;
            }
            5 => {
                self.addr |= u16::from(self.pull(bus)?) << 8;
                self.regs.pc = self.addr;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Cycles 1 and 2 of the pull sequences: PC is read, then the stack
    /// slot SP points at.
    fn stack_dummy_read<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        let addr = if self.cycle == 1 {
            self.regs.pc
        } else {
            self.regs.stack_addr()
        };
        read(bus, addr)?;
        self.cycle += 1;
        Ok(())
    }

    /// BRK, IRQ, NMI and reset share one seven-cycle shape: two reads of
    /// PC, three pushes, two vector reads. BRK's opcode fetch is its cycle
    /// 0. Reset reads the stack instead of writing it but still moves SP.
    fn sequence_cycle<B: Bus>(
        &mut self,
        bus: &mut B,
        seq: Sequence,
    ) -> Result<(), CpuError<B::Error>> {
        match self.cycle {
            0 => {
                read(bus, self.regs.pc)?;
            }
            1 => {
                read(bus, self.regs.pc)?;
                if seq == Sequence::Break {
                    // Skip the padding byte after BRK.
                    self.regs.pc = self.regs.pc.wrapping_add(1);
                }
            }
            2 | 3 | 4 if seq == Sequence::Reset => {
                read(bus, self.regs.stack_addr())?;
                self.regs.sp = self.regs.sp.wrapping_sub(1);
            }
            2 => self.push(bus, (self.regs.pc >> 8) as u8)?,
            3 => self.push(bus, self.regs.pc as u8)?,
            4 => {
                let p = if seq == Sequence::Break {
                    self.regs.p.to_byte_brk()
                } else {
                    self.regs.p.to_byte_irq()
                };
                self.push(bus, p)?;
            }
            5 => self.data = read(bus, seq.vector())?,
            6 => {
                let hi = read(bus, seq.vector() + 1)?;
                self.regs.pc = u16::from_le_bytes([self.data, hi]);
                self.regs.p.set(I);
                if seq != Sequence::Break {
                    log::debug!("{seq:?} complete, PC=${:04X}", self.regs.pc);
                }
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }
}

fn read<B: Bus>(bus: &mut B, addr: u16) -> Result<u8, CpuError<B::Error>> {
    bus.read(addr).map_err(CpuError::Bus)
}

fn write<B: Bus>(bus: &mut B, addr: u16, value: u8) -> Result<(), CpuError<B::Error>> {
    bus.write(addr, value).map_err(CpuError::Bus)
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error<E> = CpuError<E>;

    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError<B::Error>> {
        self.step(bus)
    }

    fn pc(&self) -> u32 {
        u32::from(self.regs.pc)
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        matches!(self.state, State::Jammed { .. })
    }

    fn interrupt(&mut self) -> bool {
        if self.regs.p.is_set(I) {
            false
        } else {
            self.irq_pending = true;
            true
        }
    }

    fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Abandon the current instruction and run the reset sequence. A, X
    /// and Y survive; SP drops by three; PC comes from $FFFC.
    fn reset(&mut self) {
        log::debug!("reset requested at ${:04X}", self.regs.pc);
        self.state = State::Interrupt(Sequence::Reset);
        self.cycle = 0;
        self.nmi_pending = false;
        self.irq_pending = false;
    }
}
