//! Opcode dispatch table.
//!
//! Built once per CPU from the documented instruction set and read-only
//! afterwards. Adding an opcode is adding a row; the scheduler never
//! matches on opcode bytes.

use crate::instruction::{AddressingMode as M, Instruction, Operation};
use crate::opcodes::*;
use crate::ops;
use crate::{Registers, Status, Variant};

/// Opcode byte to instruction mapping. Empty slots are the undocumented
/// opcodes, which the core rejects.
#[derive(Debug)]
pub struct DispatchTable {
    entries: [Option<Instruction>; 256],
}

impl DispatchTable {
    /// Build the table for a family member.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        let mut table = Self {
            entries: [None; 256],
        };

        let arithmetic: [fn(&mut Registers, u8); 2] = if variant.has_decimal_mode() {
            [ops::adc, ops::sbc]
        } else {
            [ops::adc_binary, ops::sbc_binary]
        };
        let [adc, sbc] = arithmetic;

        // Load/store
        table.read_group(
            "LDA",
            ops::lda,
            [
                LDA_IMM, LDA_ZP, LDA_ZPX, LDA_ABS, LDA_ABX, LDA_ABY, LDA_IZX, LDA_IZY,
            ],
        );
        table.add(
            "LDX",
            Operation::Read(ops::ldx),
            &[
                (LDX_IMM, M::Immediate, 2),
                (LDX_ZP, M::ZeroPage, 3),
                (LDX_ZPY, M::ZeroPageY, 4),
                (LDX_ABS, M::Absolute, 4),
                (LDX_ABY, M::AbsoluteY, 4),
            ],
        );
        table.add(
            "LDY",
            Operation::Read(ops::ldy),
            &[
                (LDY_IMM, M::Immediate, 2),
                (LDY_ZP, M::ZeroPage, 3),
                (LDY_ZPX, M::ZeroPageX, 4),
                (LDY_ABS, M::Absolute, 4),
                (LDY_ABX, M::AbsoluteX, 4),
            ],
        );
        table.add(
            "STA",
            Operation::Write(ops::sta),
            &[
                (STA_ZP, M::ZeroPage, 3),
                (STA_ZPX, M::ZeroPageX, 4),
                (STA_ABS, M::Absolute, 4),
                (STA_ABX, M::AbsoluteX, 5),
                (STA_ABY, M::AbsoluteY, 5),
                (STA_IZX, M::IndexedIndirect, 6),
                (STA_IZY, M::IndirectIndexed, 6),
            ],
        );
        table.add(
            "STX",
            Operation::Write(ops::stx),
            &[
                (STX_ZP, M::ZeroPage, 3),
                (STX_ZPY, M::ZeroPageY, 4),
                (STX_ABS, M::Absolute, 4),
            ],
        );
        table.add(
            "STY",
            Operation::Write(ops::sty),
            &[
                (STY_ZP, M::ZeroPage, 3),
                (STY_ZPX, M::ZeroPageX, 4),
                (STY_ABS, M::Absolute, 4),
            ],
        );

        // Transfers
        table.implied("TAX", TAX, ops::tax);
        table.implied("TAY", TAY, ops::tay);
        table.implied("TSX", TSX, ops::tsx);
        table.implied("TXA", TXA, ops::txa);
        table.implied("TXS", TXS, ops::txs);
        table.implied("TYA", TYA, ops::tya);

        // Stack
        table.add("PHA", Operation::Push(ops::pha), &[(PHA, M::Implied, 3)]);
        table.add("PHP", Operation::Push(ops::php), &[(PHP, M::Implied, 3)]);
        table.add("PLA", Operation::Pull(ops::pla), &[(PLA, M::Implied, 4)]);
        table.add("PLP", Operation::Pull(ops::plp), &[(PLP, M::Implied, 4)]);

        // Logic and arithmetic
        table.read_group(
            "AND",
            ops::and,
            [
                AND_IMM, AND_ZP, AND_ZPX, AND_ABS, AND_ABX, AND_ABY, AND_IZX, AND_IZY,
            ],
        );
        table.read_group(
            "ORA",
            ops::ora,
            [
                ORA_IMM, ORA_ZP, ORA_ZPX, ORA_ABS, ORA_ABX, ORA_ABY, ORA_IZX, ORA_IZY,
            ],
        );
        table.read_group(
            "EOR",
            ops::eor,
            [
                EOR_IMM, EOR_ZP, EOR_ZPX, EOR_ABS, EOR_ABX, EOR_ABY, EOR_IZX, EOR_IZY,
            ],
        );
        table.read_group(
            "ADC",
            adc,
            [
                ADC_IMM, ADC_ZP, ADC_ZPX, ADC_ABS, ADC_ABX, ADC_ABY, ADC_IZX, ADC_IZY,
            ],
        );
        table.read_group(
            "SBC",
            sbc,
            [
                SBC_IMM, SBC_ZP, SBC_ZPX, SBC_ABS, SBC_ABX, SBC_ABY, SBC_IZX, SBC_IZY,
            ],
        );
        table.read_group(
            "CMP",
            ops::cmp,
            [
                CMP_IMM, CMP_ZP, CMP_ZPX, CMP_ABS, CMP_ABX, CMP_ABY, CMP_IZX, CMP_IZY,
            ],
        );
        table.add(
            "BIT",
            Operation::Read(ops::bit),
            &[(BIT_ZP, M::ZeroPage, 3), (BIT_ABS, M::Absolute, 4)],
        );
        table.add(
            "CPX",
            Operation::Read(ops::cpx),
            &[
                (CPX_IMM, M::Immediate, 2),
                (CPX_ZP, M::ZeroPage, 3),
                (CPX_ABS, M::Absolute, 4),
            ],
        );
        table.add(
            "CPY",
            Operation::Read(ops::cpy),
            &[
                (CPY_IMM, M::Immediate, 2),
                (CPY_ZP, M::ZeroPage, 3),
                (CPY_ABS, M::Absolute, 4),
            ],
        );

        // Increment/decrement
        table.modify_group("INC", ops::inc, None, [INC_ZP, INC_ZPX, INC_ABS, INC_ABX]);
        table.modify_group("DEC", ops::dec, None, [DEC_ZP, DEC_ZPX, DEC_ABS, DEC_ABX]);
        table.implied("INX", INX, ops::inx);
        table.implied("INY", INY, ops::iny);
        table.implied("DEX", DEX, ops::dex);
        table.implied("DEY", DEY, ops::dey);

        // Shifts
        table.modify_group(
            "ASL",
            ops::asl,
            Some(ASL_A),
            [ASL_ZP, ASL_ZPX, ASL_ABS, ASL_ABX],
        );
        table.modify_group(
            "LSR",
            ops::lsr,
            Some(LSR_A),
            [LSR_ZP, LSR_ZPX, LSR_ABS, LSR_ABX],
        );
        table.modify_group(
            "ROL",
            ops::rol,
            Some(ROL_A),
            [ROL_ZP, ROL_ZPX, ROL_ABS, ROL_ABX],
        );
        table.modify_group(
            "ROR",
            ops::ror,
            Some(ROR_A),
            [ROR_ZP, ROR_ZPX, ROR_ABS, ROR_ABX],
        );

        // Jumps and calls
        table.add(
            "JMP",
            Operation::Jump,
            &[(JMP_ABS, M::Absolute, 3), (JMP_IND, M::Indirect, 5)],
        );
        table.add("JSR", Operation::JumpSubroutine, &[(JSR, M::Absolute, 6)]);
        table.add(
            "RTS",
            Operation::ReturnFromSubroutine,
            &[(RTS, M::Implied, 6)],
        );
        table.add(
            "RTI",
            Operation::ReturnFromInterrupt,
            &[(RTI, M::Implied, 6)],
        );
        table.add("BRK", Operation::Break, &[(BRK, M::Implied, 7)]);

        // Branches
        table.branch("BPL", BPL, ops::bpl);
        table.branch("BMI", BMI, ops::bmi);
        table.branch("BVC", BVC, ops::bvc);
        table.branch("BVS", BVS, ops::bvs);
        table.branch("BCC", BCC, ops::bcc);
        table.branch("BCS", BCS, ops::bcs);
        table.branch("BNE", BNE, ops::bne);
        table.branch("BEQ", BEQ, ops::beq);

        // Flags
        table.implied("CLC", CLC, ops::clc);
        table.implied("SEC", SEC, ops::sec);
        table.implied("CLI", CLI, ops::cli);
        table.implied("SEI", SEI, ops::sei);
        table.implied("CLV", CLV, ops::clv);
        table.implied("CLD", CLD, ops::cld);
        table.implied("SED", SED, ops::sed);

        table.implied("NOP", NOP, ops::nop);

        table
    }

    /// Look up an opcode.
    #[must_use]
    pub fn get(&self, opcode: u8) -> Option<&Instruction> {
        self.entries[opcode as usize].as_ref()
    }

    /// Number of populated opcodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated entries in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Instruction)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(opcode, entry)| Some((opcode as u8, entry.as_ref()?)))
    }

    fn add(&mut self, mnemonic: &'static str, operation: Operation, modes: &[(u8, M, u8)]) {
        for &(opcode, mode, cycles) in modes {
            let slot = &mut self.entries[opcode as usize];
            debug_assert!(slot.is_none(), "opcode {opcode:#04X} registered twice");
            *slot = Some(Instruction {
                mnemonic,
                operation,
                mode,
                cycles,
            });
        }
    }

    fn implied(&mut self, mnemonic: &'static str, opcode: u8, op: fn(&mut Registers)) {
        self.add(mnemonic, Operation::Implied(op), &[(opcode, M::Implied, 2)]);
    }

    fn branch(&mut self, mnemonic: &'static str, opcode: u8, cond: fn(Status) -> bool) {
        self.add(
            mnemonic,
            Operation::Branch(cond),
            &[(opcode, M::Relative, 2)],
        );
    }

    /// The eight-mode ALU family, opcodes in the order
    /// imm, zp, zp,X, abs, abs,X, abs,Y, (zp,X), (zp),Y.
    fn read_group(&mut self, mnemonic: &'static str, op: fn(&mut Registers, u8), opcodes: [u8; 8]) {
        let [imm, zp, zpx, abs, abx, aby, izx, izy] = opcodes;
        self.add(
            mnemonic,
            Operation::Read(op),
            &[
                (imm, M::Immediate, 2),
                (zp, M::ZeroPage, 3),
                (zpx, M::ZeroPageX, 4),
                (abs, M::Absolute, 4),
                (abx, M::AbsoluteX, 4),
                (aby, M::AbsoluteY, 4),
                (izx, M::IndexedIndirect, 6),
                (izy, M::IndirectIndexed, 5),
            ],
        );
    }

    /// Read-modify-write family, memory opcodes in the order
    /// zp, zp,X, abs, abs,X, plus the accumulator form when there is one.
    fn modify_group(
        &mut self,
        mnemonic: &'static str,
        op: fn(&mut Registers, u8) -> u8,
        accumulator: Option<u8>,
        opcodes: [u8; 4],
    ) {
        let [zp, zpx, abs, abx] = opcodes;
        if let Some(opcode) = accumulator {
            self.add(
                mnemonic,
                Operation::Modify(op),
                &[(opcode, M::Accumulator, 2)],
            );
        }
        self.add(
            mnemonic,
            Operation::Modify(op),
            &[
                (zp, M::ZeroPage, 5),
                (zpx, M::ZeroPageX, 6),
                (abs, M::Absolute, 6),
                (abx, M::AbsoluteX, 7),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count() {
        let table = DispatchTable::new(Variant::Nmos6502);
        assert_eq!(table.len(), 151);
    }

    #[test]
    fn core_implied_opcodes() {
        let table = DispatchTable::new(Variant::Nmos6502);
        for (opcode, mnemonic) in [
            (0x18, "CLC"),
            (0x38, "SEC"),
            (0xD8, "CLD"),
            (0xF8, "SED"),
            (0xEA, "NOP"),
            (0xE8, "INX"),
        ] {
            let instr = table.get(opcode).expect("documented opcode");
            assert_eq!(instr.mnemonic, mnemonic);
            assert_eq!(instr.mode, M::Implied);
            assert_eq!(instr.cycles, 2);
        }

        let lsr = table.get(0x4A).expect("LSR A");
        assert_eq!(lsr.mnemonic, "LSR");
        assert_eq!(lsr.mode, M::Accumulator);
        assert_eq!(lsr.cycles, 2);
    }

    #[test]
    fn undocumented_opcodes_are_absent() {
        let table = DispatchTable::new(Variant::Nmos6502);
        for opcode in [0x02, 0x03, 0x04, 0x0B, 0x1A, 0x80, 0xA3, 0xEB, 0xFF] {
            assert!(table.get(opcode).is_none(), "{opcode:#04X} should be empty");
        }
    }

    #[test]
    fn iter_is_in_opcode_order() {
        let table = DispatchTable::new(Variant::Ricoh2A03);
        let opcodes: Vec<u8> = table.iter().map(|(opcode, _)| opcode).collect();
        assert_eq!(opcodes.len(), 151);
        assert!(opcodes.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(opcodes[0], BRK);
        assert_eq!(opcodes[150], INC_ABX);
    }

    #[test]
    fn page_penalty_only_on_indexed_reads() {
        let table = DispatchTable::new(Variant::Nmos6502);
        let penalised = |opcode| table.get(opcode).expect("documented").has_page_penalty();
        assert!(penalised(LDA_ABX));
        assert!(penalised(LDA_IZY));
        assert!(!penalised(STA_ABX));
        assert!(!penalised(ASL_ABX));
        assert!(!penalised(LDA_ZPX));
    }
}
