//! Per-instruction semantics.
//!
//! Every handler is a plain function over [`Registers`] so the dispatch
//! table can hold it as a function pointer and tests can call it without a
//! bus. Handlers run on the instruction's commit cycle; addressing and
//! timing live in the scheduler.
//!
//! Rule shared by every data-producing handler: N and Z are recomputed from
//! the result byte, never inherited. Flags an instruction does not affect
//! are left alone.

use crate::flags::{C, D, I, N, V, Z};
use crate::{Registers, Status};

// ============================================================================
// Implied: register-only effects
// ============================================================================

pub fn clc(regs: &mut Registers) {
    regs.p.clear(C);
}

pub fn sec(regs: &mut Registers) {
    regs.p.set(C);
}

pub fn cli(regs: &mut Registers) {
    regs.p.clear(I);
}

pub fn sei(regs: &mut Registers) {
    regs.p.set(I);
}

pub fn clv(regs: &mut Registers) {
    regs.p.clear(V);
}

pub fn cld(regs: &mut Registers) {
    regs.p.clear(D);
}

pub fn sed(regs: &mut Registers) {
    regs.p.set(D);
}

pub fn nop(_regs: &mut Registers) {}

pub fn inx(regs: &mut Registers) {
    regs.x = regs.x.wrapping_add(1);
    regs.p.update_nz(regs.x);
}

pub fn iny(regs: &mut Registers) {
    regs.y = regs.y.wrapping_add(1);
    regs.p.update_nz(regs.y);
}

pub fn dex(regs: &mut Registers) {
    regs.x = regs.x.wrapping_sub(1);
    regs.p.update_nz(regs.x);
}

pub fn dey(regs: &mut Registers) {
    regs.y = regs.y.wrapping_sub(1);
    regs.p.update_nz(regs.y);
}

pub fn tax(regs: &mut Registers) {
    regs.x = regs.a;
    regs.p.update_nz(regs.x);
}

pub fn tay(regs: &mut Registers) {
    regs.y = regs.a;
    regs.p.update_nz(regs.y);
}

pub fn txa(regs: &mut Registers) {
    regs.a = regs.x;
    regs.p.update_nz(regs.a);
}

pub fn tya(regs: &mut Registers) {
    regs.a = regs.y;
    regs.p.update_nz(regs.a);
}

pub fn tsx(regs: &mut Registers) {
    regs.x = regs.sp;
    regs.p.update_nz(regs.x);
}

/// TXS is the only transfer that leaves the flags alone.
pub fn txs(regs: &mut Registers) {
    regs.sp = regs.x;
}

// ============================================================================
// Read: consume an operand byte
// ============================================================================

pub fn lda(regs: &mut Registers, val: u8) {
    regs.a = val;
    regs.p.update_nz(val);
}

pub fn ldx(regs: &mut Registers, val: u8) {
    regs.x = val;
    regs.p.update_nz(val);
}

pub fn ldy(regs: &mut Registers, val: u8) {
    regs.y = val;
    regs.p.update_nz(val);
}

pub fn ora(regs: &mut Registers, val: u8) {
    regs.a |= val;
    regs.p.update_nz(regs.a);
}

pub fn and(regs: &mut Registers, val: u8) {
    regs.a &= val;
    regs.p.update_nz(regs.a);
}

pub fn eor(regs: &mut Registers, val: u8) {
    regs.a ^= val;
    regs.p.update_nz(regs.a);
}

/// BIT: Z from `A & M`, N and V copied from bits 7 and 6 of M.
pub fn bit(regs: &mut Registers, val: u8) {
    regs.p.set_if(Z, regs.a & val == 0);
    regs.p.set_if(N, val & 0x80 != 0);
    regs.p.set_if(V, val & 0x40 != 0);
}

fn compare(p: &mut Status, reg: u8, val: u8) {
    p.set_if(C, reg >= val);
    p.update_nz(reg.wrapping_sub(val));
}

pub fn cmp(regs: &mut Registers, val: u8) {
    compare(&mut regs.p, regs.a, val);
}

pub fn cpx(regs: &mut Registers, val: u8) {
    compare(&mut regs.p, regs.x, val);
}

pub fn cpy(regs: &mut Registers, val: u8) {
    compare(&mut regs.p, regs.y, val);
}

/// ADC honouring the D flag (NMOS 6502).
pub fn adc(regs: &mut Registers, val: u8) {
    if regs.p.is_set(D) {
        adc_decimal(regs, val);
    } else {
        adc_binary(regs, val);
    }
}

/// SBC honouring the D flag (NMOS 6502).
pub fn sbc(regs: &mut Registers, val: u8) {
    if regs.p.is_set(D) {
        sbc_decimal(regs, val);
    } else {
        sbc_binary(regs, val);
    }
}

/// ADC with binary arithmetic regardless of D (Ricoh 2A03).
pub fn adc_binary(regs: &mut Registers, val: u8) {
    let a = regs.a;
    let carry = u16::from(regs.p.is_set(C));
    let sum = u16::from(a) + u16::from(val) + carry;
    let result = sum as u8;

    regs.p.set_if(C, sum > 0xFF);
    regs.p.set_if(V, (a ^ result) & (val ^ result) & 0x80 != 0);
    regs.a = result;
    regs.p.update_nz(result);
}

/// SBC with binary arithmetic regardless of D (Ricoh 2A03).
///
/// Subtraction is addition of the one's complement with carry as
/// not-borrow.
pub fn sbc_binary(regs: &mut Registers, val: u8) {
    adc_binary(regs, !val);
}

// NMOS decimal mode: Z comes from the binary sum, N and V from the high
// nibble before its decimal adjust.
fn adc_decimal(regs: &mut Registers, val: u8) {
    let a = regs.a;
    let carry = u8::from(regs.p.is_set(C));

    let mut lo = (a & 0x0F) + (val & 0x0F) + carry;
    if lo > 9 {
        lo += 6;
    }
    let mut hi = (a >> 4) + (val >> 4) + u8::from(lo > 0x0F);

    let binary = a.wrapping_add(val).wrapping_add(carry);
    regs.p.set_if(Z, binary == 0);
    regs.p.set_if(N, hi & 0x08 != 0);
    regs.p.set_if(V, !(a ^ val) & (a ^ (hi << 4)) & 0x80 != 0);

    if hi > 9 {
        hi += 6;
    }
    regs.p.set_if(C, hi > 0x0F);
    regs.a = (hi << 4) | (lo & 0x0F);
}

// NMOS decimal mode: every flag comes from the binary difference; only the
// accumulator is decimal-adjusted.
fn sbc_decimal(regs: &mut Registers, val: u8) {
    let a = regs.a;
    let borrow = u8::from(!regs.p.is_set(C));

    let diff = u16::from(a)
        .wrapping_sub(u16::from(val))
        .wrapping_sub(u16::from(borrow));

    let mut lo = (a & 0x0F).wrapping_sub(val & 0x0F).wrapping_sub(borrow);
    let lo_borrow = lo & 0x80 != 0;
    if lo_borrow {
        lo = lo.wrapping_sub(6);
    }
    let mut hi = (a >> 4)
        .wrapping_sub(val >> 4)
        .wrapping_sub(u8::from(lo_borrow));

    let result = diff as u8;
    regs.p.set_if(Z, result == 0);
    regs.p.set_if(N, result & 0x80 != 0);
    regs.p.set_if(V, (a ^ val) & (a ^ result) & 0x80 != 0);
    regs.p.set_if(C, diff & 0xFF00 == 0);

    if hi & 0x80 != 0 {
        hi = hi.wrapping_sub(6);
    }
    regs.a = (hi << 4) | (lo & 0x0F);
}

// ============================================================================
// Write: produce the byte to store
// ============================================================================

pub fn sta(regs: &Registers) -> u8 {
    regs.a
}

pub fn stx(regs: &Registers) -> u8 {
    regs.x
}

pub fn sty(regs: &Registers) -> u8 {
    regs.y
}

// ============================================================================
// Modify: read-modify-write on memory or the accumulator
// ============================================================================

pub fn asl(regs: &mut Registers, val: u8) -> u8 {
    regs.p.set_if(C, val & 0x80 != 0);
    let result = val << 1;
    regs.p.update_nz(result);
    result
}

/// LSR: bit 0 goes to C, bit 7 is fed a zero, so N always ends up clear.
pub fn lsr(regs: &mut Registers, val: u8) -> u8 {
    regs.p.set_if(C, val & 0x01 != 0);
    let result = val >> 1;
    regs.p.update_nz(result);
    result
}

pub fn rol(regs: &mut Registers, val: u8) -> u8 {
    let carry = u8::from(regs.p.is_set(C));
    regs.p.set_if(C, val & 0x80 != 0);
    let result = (val << 1) | carry;
    regs.p.update_nz(result);
    result
}

pub fn ror(regs: &mut Registers, val: u8) -> u8 {
    let carry = if regs.p.is_set(C) { 0x80 } else { 0 };
    regs.p.set_if(C, val & 0x01 != 0);
    let result = (val >> 1) | carry;
    regs.p.update_nz(result);
    result
}

pub fn inc(regs: &mut Registers, val: u8) -> u8 {
    let result = val.wrapping_add(1);
    regs.p.update_nz(result);
    result
}

pub fn dec(regs: &mut Registers, val: u8) -> u8 {
    let result = val.wrapping_sub(1);
    regs.p.update_nz(result);
    result
}

// ============================================================================
// Stack
// ============================================================================

pub fn pha(regs: &Registers) -> u8 {
    regs.a
}

pub fn php(regs: &Registers) -> u8 {
    regs.p.to_byte_brk()
}

pub fn pla(regs: &mut Registers, val: u8) {
    regs.a = val;
    regs.p.update_nz(val);
}

pub fn plp(regs: &mut Registers, val: u8) {
    regs.p = Status::from_stack(val);
}

// ============================================================================
// Branch conditions
// ============================================================================

pub fn bpl(p: Status) -> bool {
    !p.is_set(N)
}

pub fn bmi(p: Status) -> bool {
    p.is_set(N)
}

pub fn bvc(p: Status) -> bool {
    !p.is_set(V)
}

pub fn bvs(p: Status) -> bool {
    p.is_set(V)
}

pub fn bcc(p: Status) -> bool {
    !p.is_set(C)
}

pub fn bcs(p: Status) -> bool {
    p.is_set(C)
}

pub fn bne(p: Status) -> bool {
    !p.is_set(Z)
}

pub fn beq(p: Status) -> bool {
    p.is_set(Z)
}
