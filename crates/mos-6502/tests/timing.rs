//! Cycle counts and bus access patterns.
//!
//! Every populated table entry is staged with zero operands and run to
//! completion on a bus that counts accesses per step.

use std::convert::Infallible;

use emu_core::{Bus, Cpu};
use mos_6502::{Mos6502, Operation, Registers, Status, Variant, opcodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read(u16, u8),
    Write(u16, u8),
}

/// Flat 64KB RAM bus that records every access it sees.
struct TestBus {
    ram: Vec<u8>,
    reads: u32,
    writes: u32,
    log: Vec<Access>,
}

impl TestBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x10000],
            reads: 0,
            writes: 0,
            log: Vec::new(),
        }
    }

    fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.ram[usize::from(addr) + i] = byte;
        }
    }

    fn accesses(&self) -> u32 {
        self.reads + self.writes
    }
}

impl Bus for TestBus {
    type Error = Infallible;

    fn read(&mut self, address: u16) -> Result<u8, Infallible> {
        let value = self.ram[usize::from(address)];
        self.reads += 1;
        self.log.push(Access::Read(address, value));
        Ok(value)
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), Infallible> {
        self.writes += 1;
        self.log.push(Access::Write(address, value));
        self.ram[usize::from(address)] = value;
        Ok(())
    }
}

/// Step until the instruction completes, asserting one access at most per
/// step. Returns the number of steps.
fn run_counted(cpu: &mut Mos6502, bus: &mut TestBus) -> u32 {
    let mut steps = 0;
    loop {
        let before = bus.accesses();
        cpu.step(bus).unwrap();
        steps += 1;
        let made = bus.accesses() - before;
        assert!(made <= 1, "step {steps} made {made} accesses");
        if cpu.is_instruction_complete() {
            return steps;
        }
        assert!(steps < 10, "instruction did not complete");
    }
}

fn cpu_at(pc: u16, regs: Registers) -> Mos6502 {
    Mos6502::new(Registers { pc, ..regs })
}

#[test]
fn every_opcode_takes_its_declared_cycles() {
    let reference = Mos6502::default();

    for opcode in 0..=0xFF_u8 {
        let Some(instr) = reference.instruction(opcode) else {
            continue;
        };

        let mut bus = TestBus::new();
        bus.load(0x0200, &[opcode, 0x00, 0x00]);
        let regs = Registers {
            sp: 0xFD,
            ..Registers::default()
        };
        let mut cpu = cpu_at(0x0200, regs);

        // Zero offset branches land on the same page.
        let expected = match instr.operation {
            Operation::Branch(taken) if taken(Status(0)) => u32::from(instr.cycles) + 1,
            _ => u32::from(instr.cycles),
        };

        let steps = run_counted(&mut cpu, &mut bus);
        assert_eq!(
            steps, expected,
            "{} (${opcode:02X}) took {steps} cycles, expected {expected}",
            instr.mnemonic
        );
    }
}

#[test]
fn pc_advances_past_the_operand() {
    let reference = Mos6502::default();

    for opcode in 0..=0xFF_u8 {
        let Some(instr) = reference.instruction(opcode) else {
            continue;
        };
        // These load PC themselves.
        if matches!(
            instr.operation,
            Operation::Jump
                | Operation::JumpSubroutine
                | Operation::ReturnFromSubroutine
                | Operation::ReturnFromInterrupt
                | Operation::Break
        ) {
            continue;
        }

        let mut bus = TestBus::new();
        bus.load(0x0200, &[opcode, 0x00, 0x00]);
        let mut cpu = cpu_at(0x0200, Registers::default());
        run_counted(&mut cpu, &mut bus);

        let expected = 0x0201 + instr.mode.operand_len();
        assert_eq!(cpu.regs.pc, expected, "{} (${opcode:02X})", instr.mnemonic);
    }
}

#[test]
fn ricoh_variant_has_same_timing() {
    let nmos = Mos6502::default();
    let ricoh = Mos6502::with_variant(Registers::power_on(), Variant::Ricoh2A03);

    for opcode in 0..=0xFF_u8 {
        let a = nmos.instruction(opcode).map(|instr| (instr.mnemonic, instr.cycles));
        let b = ricoh.instruction(opcode).map(|instr| (instr.mnemonic, instr.cycles));
        assert_eq!(a, b, "${opcode:02X}");
    }
}

#[test]
fn indexed_read_page_cross_costs_one_cycle() {
    let regs = Registers {
        x: 0x01,
        y: 0x01,
        ..Registers::default()
    };

    // LDA $02FF,X -> $0300
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::LDA_ABX, 0xFF, 0x02]);
    bus.load(0x0300, &[0x42]);
    let mut cpu = cpu_at(0x0200, regs);
    assert_eq!(run_counted(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x42);

    // LDA $02FE,Y -> $02FF, same page
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::LDA_ABY, 0xFE, 0x02]);
    let mut cpu = cpu_at(0x0200, regs);
    assert_eq!(run_counted(&mut cpu, &mut bus), 4);

    // LDA ($10),Y with pointer $03FF -> $0400
    let mut bus = TestBus::new();
    bus.load(0x0010, &[0xFF, 0x03]);
    bus.load(0x0400, &[0x24]);
    bus.load(0x0200, &[opcodes::LDA_IZY, 0x10]);
    let mut cpu = cpu_at(0x0200, regs);
    assert_eq!(run_counted(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.a, 0x24);
}

#[test]
fn indexed_writes_always_take_the_fix_cycle() {
    let regs = Registers {
        a: 0x99,
        x: 0x01,
        ..Registers::default()
    };

    // No page cross, still five cycles.
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::STA_ABX, 0x00, 0x03]);
    let mut cpu = cpu_at(0x0200, regs);
    assert_eq!(run_counted(&mut cpu, &mut bus), 5);
    assert_eq!(bus.ram[0x0301], 0x99);
    // Opcode, two operand bytes, the fix-up read; one write.
    assert_eq!(bus.reads, 4);
    assert_eq!(bus.writes, 1);

    // Read-modify-write with a page cross is still seven.
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::INC_ABX, 0xFF, 0x03]);
    bus.load(0x0400, &[0x41]);
    let mut cpu = cpu_at(0x0200, regs);
    assert_eq!(run_counted(&mut cpu, &mut bus), 7);
    assert_eq!(bus.ram[0x0400], 0x42);
}

#[test]
fn branch_penalties() {
    // (P, offset, BNE address, expected cycles, expected PC)
    let cases = [
        // Not taken
        (Status(0x02), 0x10, 0x0200, 2, 0x0202),
        // Taken, same page
        (Status(0x00), 0x10, 0x0200, 3, 0x0212),
        // Taken backwards, same page
        (Status(0x00), 0xFE, 0x0200, 3, 0x0200),
        // Taken across a page boundary
        (Status(0x00), 0x10, 0x02FD, 4, 0x030F),
        // Taken backwards across a page boundary
        (Status(0x00), 0x80, 0x0210, 4, 0x0192),
    ];

    for (p, offset, at, cycles, target) in cases {
        let mut bus = TestBus::new();
        bus.load(at, &[opcodes::BNE, offset]);
        let regs = Registers {
            p,
            ..Registers::default()
        };
        let mut cpu = cpu_at(at, regs);

        let case = format!("BNE ${offset:02X} at ${at:04X}");
        assert_eq!(run_counted(&mut cpu, &mut bus), cycles, "{case}");
        assert_eq!(cpu.regs.pc, target, "{case}");
    }
}

#[test]
fn implied_instructions_only_fetch() {
    for opcode in [opcodes::CLC, opcodes::INX, opcodes::TAX, opcodes::LSR_A, opcodes::NOP] {
        let mut bus = TestBus::new();
        bus.load(0x0200, &[opcode]);
        let mut cpu = cpu_at(0x0200, Registers::default());

        assert_eq!(run_counted(&mut cpu, &mut bus), 2);
        assert_eq!(bus.reads, 1, "${opcode:02X}");
        assert_eq!(bus.writes, 0, "${opcode:02X}");
    }
}

#[test]
fn read_modify_write_accesses() {
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::ASL_ZP, 0x10]);
    bus.load(0x0010, &[0x21]);
    let mut cpu = cpu_at(0x0200, Registers::default());

    assert_eq!(run_counted(&mut cpu, &mut bus), 5);
    // Opcode, operand, data; the old value goes back before the new one.
    assert_eq!(bus.reads, 3);
    assert_eq!(bus.writes, 2);
    assert_eq!(bus.ram[0x0010], 0x42);
}

#[test]
fn inc_absolute_bus_sequence() {
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::INC_ABS, 0x00, 0x60]);
    bus.load(0x6000, &[0x41]);
    let mut cpu = cpu_at(0x0200, Registers::default());

    assert_eq!(run_counted(&mut cpu, &mut bus), 6);
    assert_eq!(
        bus.log,
        [
            Access::Read(0x0200, opcodes::INC_ABS),
            Access::Read(0x0201, 0x00),
            Access::Read(0x0202, 0x60),
            Access::Read(0x6000, 0x41),
            Access::Write(0x6000, 0x41),
            Access::Write(0x6000, 0x42),
        ]
    );
}

#[test]
fn indexed_page_cross_reads_the_unfixed_address() {
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::LDA_ABX, 0xFF, 0x20]);
    bus.load(0x2000, &[0x11]);
    bus.load(0x2100, &[0x22]);
    let regs = Registers {
        x: 0x01,
        ..Registers::default()
    };
    let mut cpu = cpu_at(0x0200, regs);

    assert_eq!(run_counted(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x22);
    assert_eq!(
        bus.log[3..],
        [Access::Read(0x2000, 0x11), Access::Read(0x2100, 0x22)]
    );
}

#[test]
fn branch_across_page_reads_old_page() {
    let mut bus = TestBus::new();
    bus.load(0x02FD, &[opcodes::BNE, 0x10]);
    let mut cpu = cpu_at(0x02FD, Registers::default());

    assert_eq!(run_counted(&mut cpu, &mut bus), 4);
    assert_eq!(
        bus.log[2..],
        [Access::Read(0x02FF, 0x00), Access::Read(0x020F, 0x00)]
    );
}

#[test]
fn reset_reads_the_stack_without_writing() {
    let mut bus = TestBus::new();
    bus.load(0xFFFC, &[0x00, 0x80]);
    let mut cpu = cpu_at(0x0200, Registers::power_on());

    cpu.reset();
    assert_eq!(run_counted(&mut cpu, &mut bus), 7);
    assert_eq!(bus.writes, 0);
    assert_eq!(
        bus.log[2..5],
        [
            Access::Read(0x01FD, 0x00),
            Access::Read(0x01FC, 0x00),
            Access::Read(0x01FB, 0x00),
        ]
    );
    assert_eq!(cpu.regs.pc, 0x8000);
}

#[test]
fn cycle_counter_accumulates() {
    let mut bus = TestBus::new();
    bus.load(0x0200, &[opcodes::LDA_IMM, 0x01]);
    bus.load(0x0202, &[opcodes::STA_ABS, 0x00, 0x03]);
    bus.load(0x0205, &[opcodes::NOP]);
    let mut cpu = cpu_at(0x0200, Registers::default());

    for _ in 0..3 {
        run_counted(&mut cpu, &mut bus);
    }

    assert_eq!(cpu.cycles().get(), 2 + 4 + 2);
}
