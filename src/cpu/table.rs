/*!
table.rs - Declarative opcode table: the single source of truth for decode,
operand shapes, PC increments and cycle accounting.

Each record carries the numeric code (CB-page opcodes are encoded as
0xCBnn), the operator, the ordered operand list, the operand width in bits,
the instruction size in bytes (the PC increment) and the timing cost in
cycles - a scalar, or a taken/not-taken pair for conditional branches.

Dispatch never infers timing or size from handler code; it reads both from
here. `Decoder::new` builds the two 256-entry lookup pages from this list
and validates it; a malformed table is fatal at construction.

Notes on individual entries:
- `jp (hl)` (0xE9) branches to the value of HL; the parenthesised mnemonic
  is historical.
- SLA/SRA/SRL and DAA are declared so they decode and fault as
  "unimplemented" rather than "bad opcode".
- The eleven holes (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB..0xED, 0xF4, 0xFC,
  0xFD) have no entry; reaching one is the fatal bad-opcode condition.
*/

use crate::cpu::operand::{Cond, Operand, Reg8, Reg16};
use crate::error::CoreError;

use Operator::*;

/// The 0xCB prefix byte introducing the bit-manipulation page.
pub const CB_PREFIX: u8 = 0xCB;

/// Instruction operator mnemonics, one per dispatch template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Nop,
    Ld,
    Ldi,
    Ldd,
    Ldhl,
    Push,
    Pop,
    Inc,
    Dec,
    Add,
    AddSp,
    Adc,
    Sub,
    Sbc,
    Cp,
    And,
    Or,
    Xor,
    Cpl,
    Ccf,
    Scf,
    Swap,
    Rlc,
    Rl,
    Rrc,
    Rr,
    Rlca,
    Rla,
    Rrca,
    Rra,
    Sla,
    Sra,
    Srl,
    Daa,
    Bit,
    Set,
    Res,
    Jp,
    Jr,
    Call,
    Ret,
    Reti,
    Rst,
    Halt,
    Stop,
    Di,
    Ei,
}

/// Cycle cost: scalar, or a two-arm pair for conditional branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Fixed(u32),
    Branch { taken: u32, not_taken: u32 },
}

/// One declarative instruction record.
#[derive(Debug)]
pub struct OpDesc {
    pub code: u16,
    pub op: Operator,
    pub operands: &'static [Operand],
    pub bits: u8,
    pub size: u16,
    pub time: Timing,
    pub mnemonic: &'static str,
}

impl OpDesc {
    /// The unconditional (or taken-arm) cycle cost.
    #[inline]
    pub fn scalar_time(&self) -> u32 {
        match self.time {
            Timing::Fixed(t) => t,
            Timing::Branch { taken, .. } => taken,
        }
    }

    /// True when the record declares two-arm conditional timing.
    #[inline]
    pub fn is_conditional(&self) -> bool {
        matches!(self.time, Timing::Branch { .. })
    }
}

// ---------------------------------------------------------------------
// Operand shorthands for the table below
// ---------------------------------------------------------------------

const A: Operand = Operand::Reg8(Reg8::A);
const B: Operand = Operand::Reg8(Reg8::B);
const C: Operand = Operand::Reg8(Reg8::C);
const D: Operand = Operand::Reg8(Reg8::D);
const E: Operand = Operand::Reg8(Reg8::E);
const H: Operand = Operand::Reg8(Reg8::H);
const L: Operand = Operand::Reg8(Reg8::L);

const AF: Operand = Operand::Reg16(Reg16::AF);
const BC: Operand = Operand::Reg16(Reg16::BC);
const DE: Operand = Operand::Reg16(Reg16::DE);
const HL: Operand = Operand::Reg16(Reg16::HL);
const SP: Operand = Operand::Reg16(Reg16::SP);

const D8: Operand = Operand::Imm8;
const D16: Operand = Operand::Imm16;
const R8: Operand = Operand::Rel8;

const Z: Operand = Operand::Cond(Cond::Z);
const NZ: Operand = Operand::Cond(Cond::Nz);
const CF: Operand = Operand::Cond(Cond::Cf);
const NC: Operand = Operand::Cond(Cond::Nc);

const AT_BC: Operand = Operand::Mem(&BC);
const AT_DE: Operand = Operand::Mem(&DE);
const AT_HL: Operand = Operand::Mem(&HL);
const AT_A16: Operand = Operand::Mem(&D16);
/// (0xFF00+C)
const HIGH_C: Operand = Operand::Mem(&Operand::Sum(&[Operand::Lit(0xFF00), C]));
/// (0xFF00+a8)
const HIGH_A8: Operand = Operand::Mem(&Operand::Sum(&[Operand::Lit(0xFF00), D8]));

const fn lit(v: u16) -> Operand {
    Operand::Lit(v)
}

const fn fixed(
    code: u16,
    op: Operator,
    operands: &'static [Operand],
    bits: u8,
    size: u16,
    time: u32,
    mnemonic: &'static str,
) -> OpDesc {
    OpDesc {
        code,
        op,
        operands,
        bits,
        size,
        time: Timing::Fixed(time),
        mnemonic,
    }
}

const fn branch(
    code: u16,
    op: Operator,
    operands: &'static [Operand],
    bits: u8,
    size: u16,
    taken: u32,
    not_taken: u32,
    mnemonic: &'static str,
) -> OpDesc {
    OpDesc {
        code,
        op,
        operands,
        bits,
        size,
        time: Timing::Branch { taken, not_taken },
        mnemonic,
    }
}

/// The declarative table. Order is by opcode for readability; the decoder
/// indexes it, so order carries no meaning.
pub static TABLE: &[OpDesc] = &[
    // 0x00-0x3F: loads, 16-bit arithmetic, rotates on A, relative jumps
    fixed(0x00, Nop, &[], 8, 1, 4, "nop"),
    fixed(0x01, Ld, &[BC, D16], 16, 3, 12, "ld bc,d16"),
    fixed(0x02, Ld, &[AT_BC, A], 8, 1, 8, "ld (bc),a"),
    fixed(0x03, Inc, &[BC], 16, 1, 8, "inc bc"),
    fixed(0x04, Inc, &[B], 8, 1, 4, "inc b"),
    fixed(0x05, Dec, &[B], 8, 1, 4, "dec b"),
    fixed(0x06, Ld, &[B, D8], 8, 2, 8, "ld b,d8"),
    fixed(0x07, Rlca, &[], 8, 1, 4, "rlca"),
    fixed(0x08, Ld, &[AT_A16, SP], 16, 3, 20, "ld (a16),sp"),
    fixed(0x09, Add, &[HL, BC], 16, 1, 8, "add hl,bc"),
    fixed(0x0a, Ld, &[A, AT_BC], 8, 1, 8, "ld a,(bc)"),
    fixed(0x0b, Dec, &[BC], 16, 1, 8, "dec bc"),
    fixed(0x0c, Inc, &[C], 8, 1, 4, "inc c"),
    fixed(0x0d, Dec, &[C], 8, 1, 4, "dec c"),
    fixed(0x0e, Ld, &[C, D8], 8, 2, 8, "ld c,d8"),
    fixed(0x0f, Rrca, &[], 8, 1, 4, "rrca"),
    fixed(0x10, Stop, &[], 8, 2, 4, "stop"),
    fixed(0x11, Ld, &[DE, D16], 16, 3, 12, "ld de,d16"),
    fixed(0x12, Ld, &[AT_DE, A], 8, 1, 8, "ld (de),a"),
    fixed(0x13, Inc, &[DE], 16, 1, 8, "inc de"),
    fixed(0x14, Inc, &[D], 8, 1, 4, "inc d"),
    fixed(0x15, Dec, &[D], 8, 1, 4, "dec d"),
    fixed(0x16, Ld, &[D, D8], 8, 2, 8, "ld d,d8"),
    fixed(0x17, Rla, &[], 8, 1, 4, "rla"),
    fixed(0x18, Jr, &[R8], 8, 2, 12, "jr r8"),
    fixed(0x19, Add, &[HL, DE], 16, 1, 8, "add hl,de"),
    fixed(0x1a, Ld, &[A, AT_DE], 8, 1, 8, "ld a,(de)"),
    fixed(0x1b, Dec, &[DE], 16, 1, 8, "dec de"),
    fixed(0x1c, Inc, &[E], 8, 1, 4, "inc e"),
    fixed(0x1d, Dec, &[E], 8, 1, 4, "dec e"),
    fixed(0x1e, Ld, &[E, D8], 8, 2, 8, "ld e,d8"),
    fixed(0x1f, Rra, &[], 8, 1, 4, "rra"),
    branch(0x20, Jr, &[NZ, R8], 8, 2, 12, 8, "jr nz,r8"),
    fixed(0x21, Ld, &[HL, D16], 16, 3, 12, "ld hl,d16"),
    fixed(0x22, Ldi, &[AT_HL, A], 8, 1, 8, "ldi (hl),a"),
    fixed(0x23, Inc, &[HL], 16, 1, 8, "inc hl"),
    fixed(0x24, Inc, &[H], 8, 1, 4, "inc h"),
    fixed(0x25, Dec, &[H], 8, 1, 4, "dec h"),
    fixed(0x26, Ld, &[H, D8], 8, 2, 8, "ld h,d8"),
    fixed(0x27, Daa, &[], 8, 1, 4, "daa"),
    branch(0x28, Jr, &[Z, R8], 8, 2, 12, 8, "jr z,r8"),
    fixed(0x29, Add, &[HL, HL], 16, 1, 8, "add hl,hl"),
    fixed(0x2a, Ldi, &[A, AT_HL], 8, 1, 8, "ldi a,(hl)"),
    fixed(0x2b, Dec, &[HL], 16, 1, 8, "dec hl"),
    fixed(0x2c, Inc, &[L], 8, 1, 4, "inc l"),
    fixed(0x2d, Dec, &[L], 8, 1, 4, "dec l"),
    fixed(0x2e, Ld, &[L, D8], 8, 2, 8, "ld l,d8"),
    fixed(0x2f, Cpl, &[], 8, 1, 4, "cpl"),
    branch(0x30, Jr, &[NC, R8], 8, 2, 12, 8, "jr nc,r8"),
    fixed(0x31, Ld, &[SP, D16], 16, 3, 12, "ld sp,d16"),
    fixed(0x32, Ldd, &[AT_HL, A], 8, 1, 8, "ldd (hl),a"),
    fixed(0x33, Inc, &[SP], 16, 1, 8, "inc sp"),
    fixed(0x34, Inc, &[AT_HL], 8, 1, 12, "inc (hl)"),
    fixed(0x35, Dec, &[AT_HL], 8, 1, 12, "dec (hl)"),
    fixed(0x36, Ld, &[AT_HL, D8], 8, 2, 12, "ld (hl),d8"),
    fixed(0x37, Scf, &[], 8, 1, 4, "scf"),
    branch(0x38, Jr, &[CF, R8], 8, 2, 12, 8, "jr c,r8"),
    fixed(0x39, Add, &[HL, SP], 16, 1, 8, "add hl,sp"),
    fixed(0x3a, Ldd, &[A, AT_HL], 8, 1, 8, "ldd a,(hl)"),
    fixed(0x3b, Dec, &[SP], 16, 1, 8, "dec sp"),
    fixed(0x3c, Inc, &[A], 8, 1, 4, "inc a"),
    fixed(0x3d, Dec, &[A], 8, 1, 4, "dec a"),
    fixed(0x3e, Ld, &[A, D8], 8, 2, 8, "ld a,d8"),
    fixed(0x3f, Ccf, &[], 8, 1, 4, "ccf"),
    // 0x40-0x7F: register-to-register loads (0x76 is HALT)
    fixed(0x40, Ld, &[B, B], 8, 1, 4, "ld b,b"),
    fixed(0x41, Ld, &[B, C], 8, 1, 4, "ld b,c"),
    fixed(0x42, Ld, &[B, D], 8, 1, 4, "ld b,d"),
    fixed(0x43, Ld, &[B, E], 8, 1, 4, "ld b,e"),
    fixed(0x44, Ld, &[B, H], 8, 1, 4, "ld b,h"),
    fixed(0x45, Ld, &[B, L], 8, 1, 4, "ld b,l"),
    fixed(0x46, Ld, &[B, AT_HL], 8, 1, 8, "ld b,(hl)"),
    fixed(0x47, Ld, &[B, A], 8, 1, 4, "ld b,a"),
    fixed(0x48, Ld, &[C, B], 8, 1, 4, "ld c,b"),
    fixed(0x49, Ld, &[C, C], 8, 1, 4, "ld c,c"),
    fixed(0x4a, Ld, &[C, D], 8, 1, 4, "ld c,d"),
    fixed(0x4b, Ld, &[C, E], 8, 1, 4, "ld c,e"),
    fixed(0x4c, Ld, &[C, H], 8, 1, 4, "ld c,h"),
    fixed(0x4d, Ld, &[C, L], 8, 1, 4, "ld c,l"),
    fixed(0x4e, Ld, &[C, AT_HL], 8, 1, 8, "ld c,(hl)"),
    fixed(0x4f, Ld, &[C, A], 8, 1, 4, "ld c,a"),
    fixed(0x50, Ld, &[D, B], 8, 1, 4, "ld d,b"),
    fixed(0x51, Ld, &[D, C], 8, 1, 4, "ld d,c"),
    fixed(0x52, Ld, &[D, D], 8, 1, 4, "ld d,d"),
    fixed(0x53, Ld, &[D, E], 8, 1, 4, "ld d,e"),
    fixed(0x54, Ld, &[D, H], 8, 1, 4, "ld d,h"),
    fixed(0x55, Ld, &[D, L], 8, 1, 4, "ld d,l"),
    fixed(0x56, Ld, &[D, AT_HL], 8, 1, 8, "ld d,(hl)"),
    fixed(0x57, Ld, &[D, A], 8, 1, 4, "ld d,a"),
    fixed(0x58, Ld, &[E, B], 8, 1, 4, "ld e,b"),
    fixed(0x59, Ld, &[E, C], 8, 1, 4, "ld e,c"),
    fixed(0x5a, Ld, &[E, D], 8, 1, 4, "ld e,d"),
    fixed(0x5b, Ld, &[E, E], 8, 1, 4, "ld e,e"),
    fixed(0x5c, Ld, &[E, H], 8, 1, 4, "ld e,h"),
    fixed(0x5d, Ld, &[E, L], 8, 1, 4, "ld e,l"),
    fixed(0x5e, Ld, &[E, AT_HL], 8, 1, 8, "ld e,(hl)"),
    fixed(0x5f, Ld, &[E, A], 8, 1, 4, "ld e,a"),
    fixed(0x60, Ld, &[H, B], 8, 1, 4, "ld h,b"),
    fixed(0x61, Ld, &[H, C], 8, 1, 4, "ld h,c"),
    fixed(0x62, Ld, &[H, D], 8, 1, 4, "ld h,d"),
    fixed(0x63, Ld, &[H, E], 8, 1, 4, "ld h,e"),
    fixed(0x64, Ld, &[H, H], 8, 1, 4, "ld h,h"),
    fixed(0x65, Ld, &[H, L], 8, 1, 4, "ld h,l"),
    fixed(0x66, Ld, &[H, AT_HL], 8, 1, 8, "ld h,(hl)"),
    fixed(0x67, Ld, &[H, A], 8, 1, 4, "ld h,a"),
    fixed(0x68, Ld, &[L, B], 8, 1, 4, "ld l,b"),
    fixed(0x69, Ld, &[L, C], 8, 1, 4, "ld l,c"),
    fixed(0x6a, Ld, &[L, D], 8, 1, 4, "ld l,d"),
    fixed(0x6b, Ld, &[L, E], 8, 1, 4, "ld l,e"),
    fixed(0x6c, Ld, &[L, H], 8, 1, 4, "ld l,h"),
    fixed(0x6d, Ld, &[L, L], 8, 1, 4, "ld l,l"),
    fixed(0x6e, Ld, &[L, AT_HL], 8, 1, 8, "ld l,(hl)"),
    fixed(0x6f, Ld, &[L, A], 8, 1, 4, "ld l,a"),
    fixed(0x70, Ld, &[AT_HL, B], 8, 1, 8, "ld (hl),b"),
    fixed(0x71, Ld, &[AT_HL, C], 8, 1, 8, "ld (hl),c"),
    fixed(0x72, Ld, &[AT_HL, D], 8, 1, 8, "ld (hl),d"),
    fixed(0x73, Ld, &[AT_HL, E], 8, 1, 8, "ld (hl),e"),
    fixed(0x74, Ld, &[AT_HL, H], 8, 1, 8, "ld (hl),h"),
    fixed(0x75, Ld, &[AT_HL, L], 8, 1, 8, "ld (hl),l"),
    fixed(0x76, Halt, &[], 8, 1, 4, "halt"),
    fixed(0x77, Ld, &[AT_HL, A], 8, 1, 8, "ld (hl),a"),
    fixed(0x78, Ld, &[A, B], 8, 1, 4, "ld a,b"),
    fixed(0x79, Ld, &[A, C], 8, 1, 4, "ld a,c"),
    fixed(0x7a, Ld, &[A, D], 8, 1, 4, "ld a,d"),
    fixed(0x7b, Ld, &[A, E], 8, 1, 4, "ld a,e"),
    fixed(0x7c, Ld, &[A, H], 8, 1, 4, "ld a,h"),
    fixed(0x7d, Ld, &[A, L], 8, 1, 4, "ld a,l"),
    fixed(0x7e, Ld, &[A, AT_HL], 8, 1, 8, "ld a,(hl)"),
    fixed(0x7f, Ld, &[A, A], 8, 1, 4, "ld a,a"),
    // 0x80-0xBF: 8-bit arithmetic and logic on A
    fixed(0x80, Add, &[A, B], 8, 1, 4, "add a,b"),
    fixed(0x81, Add, &[A, C], 8, 1, 4, "add a,c"),
    fixed(0x82, Add, &[A, D], 8, 1, 4, "add a,d"),
    fixed(0x83, Add, &[A, E], 8, 1, 4, "add a,e"),
    fixed(0x84, Add, &[A, H], 8, 1, 4, "add a,h"),
    fixed(0x85, Add, &[A, L], 8, 1, 4, "add a,l"),
    fixed(0x86, Add, &[A, AT_HL], 8, 1, 8, "add a,(hl)"),
    fixed(0x87, Add, &[A, A], 8, 1, 4, "add a,a"),
    fixed(0x88, Adc, &[A, B], 8, 1, 4, "adc a,b"),
    fixed(0x89, Adc, &[A, C], 8, 1, 4, "adc a,c"),
    fixed(0x8a, Adc, &[A, D], 8, 1, 4, "adc a,d"),
    fixed(0x8b, Adc, &[A, E], 8, 1, 4, "adc a,e"),
    fixed(0x8c, Adc, &[A, H], 8, 1, 4, "adc a,h"),
    fixed(0x8d, Adc, &[A, L], 8, 1, 4, "adc a,l"),
    fixed(0x8e, Adc, &[A, AT_HL], 8, 1, 8, "adc a,(hl)"),
    fixed(0x8f, Adc, &[A, A], 8, 1, 4, "adc a,a"),
    fixed(0x90, Sub, &[B], 8, 1, 4, "sub b"),
    fixed(0x91, Sub, &[C], 8, 1, 4, "sub c"),
    fixed(0x92, Sub, &[D], 8, 1, 4, "sub d"),
    fixed(0x93, Sub, &[E], 8, 1, 4, "sub e"),
    fixed(0x94, Sub, &[H], 8, 1, 4, "sub h"),
    fixed(0x95, Sub, &[L], 8, 1, 4, "sub l"),
    fixed(0x96, Sub, &[AT_HL], 8, 1, 8, "sub (hl)"),
    fixed(0x97, Sub, &[A], 8, 1, 4, "sub a"),
    fixed(0x98, Sbc, &[A, B], 8, 1, 4, "sbc a,b"),
    fixed(0x99, Sbc, &[A, C], 8, 1, 4, "sbc a,c"),
    fixed(0x9a, Sbc, &[A, D], 8, 1, 4, "sbc a,d"),
    fixed(0x9b, Sbc, &[A, E], 8, 1, 4, "sbc a,e"),
    fixed(0x9c, Sbc, &[A, H], 8, 1, 4, "sbc a,h"),
    fixed(0x9d, Sbc, &[A, L], 8, 1, 4, "sbc a,l"),
    fixed(0x9e, Sbc, &[A, AT_HL], 8, 1, 8, "sbc a,(hl)"),
    fixed(0x9f, Sbc, &[A, A], 8, 1, 4, "sbc a,a"),
    fixed(0xa0, And, &[B], 8, 1, 4, "and b"),
    fixed(0xa1, And, &[C], 8, 1, 4, "and c"),
    fixed(0xa2, And, &[D], 8, 1, 4, "and d"),
    fixed(0xa3, And, &[E], 8, 1, 4, "and e"),
    fixed(0xa4, And, &[H], 8, 1, 4, "and h"),
    fixed(0xa5, And, &[L], 8, 1, 4, "and l"),
    fixed(0xa6, And, &[AT_HL], 8, 1, 8, "and (hl)"),
    fixed(0xa7, And, &[A], 8, 1, 4, "and a"),
    fixed(0xa8, Xor, &[B], 8, 1, 4, "xor b"),
    fixed(0xa9, Xor, &[C], 8, 1, 4, "xor c"),
    fixed(0xaa, Xor, &[D], 8, 1, 4, "xor d"),
    fixed(0xab, Xor, &[E], 8, 1, 4, "xor e"),
    fixed(0xac, Xor, &[H], 8, 1, 4, "xor h"),
    fixed(0xad, Xor, &[L], 8, 1, 4, "xor l"),
    fixed(0xae, Xor, &[AT_HL], 8, 1, 8, "xor (hl)"),
    fixed(0xaf, Xor, &[A], 8, 1, 4, "xor a"),
    fixed(0xb0, Or, &[B], 8, 1, 4, "or b"),
    fixed(0xb1, Or, &[C], 8, 1, 4, "or c"),
    fixed(0xb2, Or, &[D], 8, 1, 4, "or d"),
    fixed(0xb3, Or, &[E], 8, 1, 4, "or e"),
    fixed(0xb4, Or, &[H], 8, 1, 4, "or h"),
    fixed(0xb5, Or, &[L], 8, 1, 4, "or l"),
    fixed(0xb6, Or, &[AT_HL], 8, 1, 8, "or (hl)"),
    fixed(0xb7, Or, &[A], 8, 1, 4, "or a"),
    fixed(0xb8, Cp, &[B], 8, 1, 4, "cp b"),
    fixed(0xb9, Cp, &[C], 8, 1, 4, "cp c"),
    fixed(0xba, Cp, &[D], 8, 1, 4, "cp d"),
    fixed(0xbb, Cp, &[E], 8, 1, 4, "cp e"),
    fixed(0xbc, Cp, &[H], 8, 1, 4, "cp h"),
    fixed(0xbd, Cp, &[L], 8, 1, 4, "cp l"),
    fixed(0xbe, Cp, &[AT_HL], 8, 1, 8, "cp (hl)"),
    fixed(0xbf, Cp, &[A], 8, 1, 4, "cp a"),
    // 0xC0-0xFF: stack, calls, returns, restarts, high-page loads
    branch(0xc0, Ret, &[NZ], 16, 1, 20, 8, "ret nz"),
    fixed(0xc1, Pop, &[BC], 16, 1, 12, "pop bc"),
    branch(0xc2, Jp, &[NZ, D16], 16, 3, 16, 12, "jp nz,a16"),
    fixed(0xc3, Jp, &[D16], 16, 3, 16, "jp a16"),
    branch(0xc4, Call, &[NZ, D16], 16, 3, 24, 12, "call nz,a16"),
    fixed(0xc5, Push, &[BC], 16, 1, 16, "push bc"),
    fixed(0xc6, Add, &[A, D8], 8, 2, 8, "add a,d8"),
    fixed(0xc7, Rst, &[lit(0x00)], 16, 1, 16, "rst 00h"),
    branch(0xc8, Ret, &[Z], 16, 1, 20, 8, "ret z"),
    fixed(0xc9, Ret, &[], 16, 1, 16, "ret"),
    branch(0xca, Jp, &[Z, D16], 16, 3, 16, 12, "jp z,a16"),
    branch(0xcc, Call, &[Z, D16], 16, 3, 24, 12, "call z,a16"),
    fixed(0xcd, Call, &[D16], 16, 3, 24, "call a16"),
    fixed(0xce, Adc, &[A, D8], 8, 2, 8, "adc a,d8"),
    fixed(0xcf, Rst, &[lit(0x08)], 16, 1, 16, "rst 08h"),
    branch(0xd0, Ret, &[NC], 16, 1, 20, 8, "ret nc"),
    fixed(0xd1, Pop, &[DE], 16, 1, 12, "pop de"),
    branch(0xd2, Jp, &[NC, D16], 16, 3, 16, 12, "jp nc,a16"),
    branch(0xd4, Call, &[NC, D16], 16, 3, 24, 12, "call nc,a16"),
    fixed(0xd5, Push, &[DE], 16, 1, 16, "push de"),
    fixed(0xd6, Sub, &[D8], 8, 2, 8, "sub d8"),
    fixed(0xd7, Rst, &[lit(0x10)], 16, 1, 16, "rst 10h"),
    branch(0xd8, Ret, &[CF], 16, 1, 20, 8, "ret c"),
    fixed(0xd9, Reti, &[], 16, 1, 16, "reti"),
    branch(0xda, Jp, &[CF, D16], 16, 3, 16, 12, "jp c,a16"),
    branch(0xdc, Call, &[CF, D16], 16, 3, 24, 12, "call c,a16"),
    fixed(0xde, Sbc, &[A, D8], 8, 2, 8, "sbc a,d8"),
    fixed(0xdf, Rst, &[lit(0x18)], 16, 1, 16, "rst 18h"),
    fixed(0xe0, Ld, &[HIGH_A8, A], 8, 2, 12, "ldh (a8),a"),
    fixed(0xe1, Pop, &[HL], 16, 1, 12, "pop hl"),
    fixed(0xe2, Ld, &[HIGH_C, A], 8, 1, 8, "ld (c),a"),
    fixed(0xe5, Push, &[HL], 16, 1, 16, "push hl"),
    fixed(0xe6, And, &[D8], 8, 2, 8, "and d8"),
    fixed(0xe7, Rst, &[lit(0x20)], 16, 1, 16, "rst 20h"),
    fixed(0xe8, AddSp, &[SP, R8], 16, 2, 16, "add sp,r8"),
    fixed(0xe9, Jp, &[HL], 16, 1, 4, "jp (hl)"),
    fixed(0xea, Ld, &[AT_A16, A], 8, 3, 16, "ld (a16),a"),
    fixed(0xee, Xor, &[D8], 8, 2, 8, "xor d8"),
    fixed(0xef, Rst, &[lit(0x28)], 16, 1, 16, "rst 28h"),
    fixed(0xf0, Ld, &[A, HIGH_A8], 8, 2, 12, "ldh a,(a8)"),
    fixed(0xf1, Pop, &[AF], 16, 1, 12, "pop af"),
    fixed(0xf2, Ld, &[A, HIGH_C], 8, 1, 8, "ld a,(c)"),
    fixed(0xf3, Di, &[], 8, 1, 4, "di"),
    fixed(0xf5, Push, &[AF], 16, 1, 16, "push af"),
    fixed(0xf6, Or, &[D8], 8, 2, 8, "or d8"),
    fixed(0xf7, Rst, &[lit(0x30)], 16, 1, 16, "rst 30h"),
    fixed(0xf8, Ldhl, &[SP, R8], 16, 2, 12, "ldhl sp,r8"),
    fixed(0xf9, Ld, &[SP, HL], 16, 1, 8, "ld sp,hl"),
    fixed(0xfa, Ld, &[A, AT_A16], 8, 3, 16, "ld a,(a16)"),
    fixed(0xfb, Ei, &[], 8, 1, 4, "ei"),
    fixed(0xfe, Cp, &[D8], 8, 2, 8, "cp d8"),
    fixed(0xff, Rst, &[lit(0x38)], 16, 1, 16, "rst 38h"),
    // 0xCB00-0xCBFF: bit-manipulation page (two-byte opcodes)
    fixed(0xCB00 | 0x00, Rlc, &[B], 8, 2, 8, "rlc b"),
    fixed(0xCB00 | 0x01, Rlc, &[C], 8, 2, 8, "rlc c"),
    fixed(0xCB00 | 0x02, Rlc, &[D], 8, 2, 8, "rlc d"),
    fixed(0xCB00 | 0x03, Rlc, &[E], 8, 2, 8, "rlc e"),
    fixed(0xCB00 | 0x04, Rlc, &[H], 8, 2, 8, "rlc h"),
    fixed(0xCB00 | 0x05, Rlc, &[L], 8, 2, 8, "rlc l"),
    fixed(0xCB00 | 0x06, Rlc, &[AT_HL], 8, 2, 16, "rlc (hl)"),
    fixed(0xCB00 | 0x07, Rlc, &[A], 8, 2, 8, "rlc a"),
    fixed(0xCB00 | 0x08, Rrc, &[B], 8, 2, 8, "rrc b"),
    fixed(0xCB00 | 0x09, Rrc, &[C], 8, 2, 8, "rrc c"),
    fixed(0xCB00 | 0x0a, Rrc, &[D], 8, 2, 8, "rrc d"),
    fixed(0xCB00 | 0x0b, Rrc, &[E], 8, 2, 8, "rrc e"),
    fixed(0xCB00 | 0x0c, Rrc, &[H], 8, 2, 8, "rrc h"),
    fixed(0xCB00 | 0x0d, Rrc, &[L], 8, 2, 8, "rrc l"),
    fixed(0xCB00 | 0x0e, Rrc, &[AT_HL], 8, 2, 16, "rrc (hl)"),
    fixed(0xCB00 | 0x0f, Rrc, &[A], 8, 2, 8, "rrc a"),
    fixed(0xCB00 | 0x10, Rl, &[B], 8, 2, 8, "rl b"),
    fixed(0xCB00 | 0x11, Rl, &[C], 8, 2, 8, "rl c"),
    fixed(0xCB00 | 0x12, Rl, &[D], 8, 2, 8, "rl d"),
    fixed(0xCB00 | 0x13, Rl, &[E], 8, 2, 8, "rl e"),
    fixed(0xCB00 | 0x14, Rl, &[H], 8, 2, 8, "rl h"),
    fixed(0xCB00 | 0x15, Rl, &[L], 8, 2, 8, "rl l"),
    fixed(0xCB00 | 0x16, Rl, &[AT_HL], 8, 2, 16, "rl (hl)"),
    fixed(0xCB00 | 0x17, Rl, &[A], 8, 2, 8, "rl a"),
    fixed(0xCB00 | 0x18, Rr, &[B], 8, 2, 8, "rr b"),
    fixed(0xCB00 | 0x19, Rr, &[C], 8, 2, 8, "rr c"),
    fixed(0xCB00 | 0x1a, Rr, &[D], 8, 2, 8, "rr d"),
    fixed(0xCB00 | 0x1b, Rr, &[E], 8, 2, 8, "rr e"),
    fixed(0xCB00 | 0x1c, Rr, &[H], 8, 2, 8, "rr h"),
    fixed(0xCB00 | 0x1d, Rr, &[L], 8, 2, 8, "rr l"),
    fixed(0xCB00 | 0x1e, Rr, &[AT_HL], 8, 2, 16, "rr (hl)"),
    fixed(0xCB00 | 0x1f, Rr, &[A], 8, 2, 8, "rr a"),
    fixed(0xCB00 | 0x20, Sla, &[B], 8, 2, 8, "sla b"),
    fixed(0xCB00 | 0x21, Sla, &[C], 8, 2, 8, "sla c"),
    fixed(0xCB00 | 0x22, Sla, &[D], 8, 2, 8, "sla d"),
    fixed(0xCB00 | 0x23, Sla, &[E], 8, 2, 8, "sla e"),
    fixed(0xCB00 | 0x24, Sla, &[H], 8, 2, 8, "sla h"),
    fixed(0xCB00 | 0x25, Sla, &[L], 8, 2, 8, "sla l"),
    fixed(0xCB00 | 0x26, Sla, &[AT_HL], 8, 2, 16, "sla (hl)"),
    fixed(0xCB00 | 0x27, Sla, &[A], 8, 2, 8, "sla a"),
    fixed(0xCB00 | 0x28, Sra, &[B], 8, 2, 8, "sra b"),
    fixed(0xCB00 | 0x29, Sra, &[C], 8, 2, 8, "sra c"),
    fixed(0xCB00 | 0x2a, Sra, &[D], 8, 2, 8, "sra d"),
    fixed(0xCB00 | 0x2b, Sra, &[E], 8, 2, 8, "sra e"),
    fixed(0xCB00 | 0x2c, Sra, &[H], 8, 2, 8, "sra h"),
    fixed(0xCB00 | 0x2d, Sra, &[L], 8, 2, 8, "sra l"),
    fixed(0xCB00 | 0x2e, Sra, &[AT_HL], 8, 2, 16, "sra (hl)"),
    fixed(0xCB00 | 0x2f, Sra, &[A], 8, 2, 8, "sra a"),
    fixed(0xCB00 | 0x30, Swap, &[B], 8, 2, 8, "swap b"),
    fixed(0xCB00 | 0x31, Swap, &[C], 8, 2, 8, "swap c"),
    fixed(0xCB00 | 0x32, Swap, &[D], 8, 2, 8, "swap d"),
    fixed(0xCB00 | 0x33, Swap, &[E], 8, 2, 8, "swap e"),
    fixed(0xCB00 | 0x34, Swap, &[H], 8, 2, 8, "swap h"),
    fixed(0xCB00 | 0x35, Swap, &[L], 8, 2, 8, "swap l"),
    fixed(0xCB00 | 0x36, Swap, &[AT_HL], 8, 2, 16, "swap (hl)"),
    fixed(0xCB00 | 0x37, Swap, &[A], 8, 2, 8, "swap a"),
    fixed(0xCB00 | 0x38, Srl, &[B], 8, 2, 8, "srl b"),
    fixed(0xCB00 | 0x39, Srl, &[C], 8, 2, 8, "srl c"),
    fixed(0xCB00 | 0x3a, Srl, &[D], 8, 2, 8, "srl d"),
    fixed(0xCB00 | 0x3b, Srl, &[E], 8, 2, 8, "srl e"),
    fixed(0xCB00 | 0x3c, Srl, &[H], 8, 2, 8, "srl h"),
    fixed(0xCB00 | 0x3d, Srl, &[L], 8, 2, 8, "srl l"),
    fixed(0xCB00 | 0x3e, Srl, &[AT_HL], 8, 2, 16, "srl (hl)"),
    fixed(0xCB00 | 0x3f, Srl, &[A], 8, 2, 8, "srl a"),
    fixed(0xCB00 | 0x40, Bit, &[lit(0), B], 8, 2, 8, "bit 0,b"),
    fixed(0xCB00 | 0x41, Bit, &[lit(0), C], 8, 2, 8, "bit 0,c"),
    fixed(0xCB00 | 0x42, Bit, &[lit(0), D], 8, 2, 8, "bit 0,d"),
    fixed(0xCB00 | 0x43, Bit, &[lit(0), E], 8, 2, 8, "bit 0,e"),
    fixed(0xCB00 | 0x44, Bit, &[lit(0), H], 8, 2, 8, "bit 0,h"),
    fixed(0xCB00 | 0x45, Bit, &[lit(0), L], 8, 2, 8, "bit 0,l"),
    fixed(0xCB00 | 0x46, Bit, &[lit(0), AT_HL], 8, 2, 16, "bit 0,(hl)"),
    fixed(0xCB00 | 0x47, Bit, &[lit(0), A], 8, 2, 8, "bit 0,a"),
    fixed(0xCB00 | 0x48, Bit, &[lit(1), B], 8, 2, 8, "bit 1,b"),
    fixed(0xCB00 | 0x49, Bit, &[lit(1), C], 8, 2, 8, "bit 1,c"),
    fixed(0xCB00 | 0x4a, Bit, &[lit(1), D], 8, 2, 8, "bit 1,d"),
    fixed(0xCB00 | 0x4b, Bit, &[lit(1), E], 8, 2, 8, "bit 1,e"),
    fixed(0xCB00 | 0x4c, Bit, &[lit(1), H], 8, 2, 8, "bit 1,h"),
    fixed(0xCB00 | 0x4d, Bit, &[lit(1), L], 8, 2, 8, "bit 1,l"),
    fixed(0xCB00 | 0x4e, Bit, &[lit(1), AT_HL], 8, 2, 16, "bit 1,(hl)"),
    fixed(0xCB00 | 0x4f, Bit, &[lit(1), A], 8, 2, 8, "bit 1,a"),
    fixed(0xCB00 | 0x50, Bit, &[lit(2), B], 8, 2, 8, "bit 2,b"),
    fixed(0xCB00 | 0x51, Bit, &[lit(2), C], 8, 2, 8, "bit 2,c"),
    fixed(0xCB00 | 0x52, Bit, &[lit(2), D], 8, 2, 8, "bit 2,d"),
    fixed(0xCB00 | 0x53, Bit, &[lit(2), E], 8, 2, 8, "bit 2,e"),
    fixed(0xCB00 | 0x54, Bit, &[lit(2), H], 8, 2, 8, "bit 2,h"),
    fixed(0xCB00 | 0x55, Bit, &[lit(2), L], 8, 2, 8, "bit 2,l"),
    fixed(0xCB00 | 0x56, Bit, &[lit(2), AT_HL], 8, 2, 16, "bit 2,(hl)"),
    fixed(0xCB00 | 0x57, Bit, &[lit(2), A], 8, 2, 8, "bit 2,a"),
    fixed(0xCB00 | 0x58, Bit, &[lit(3), B], 8, 2, 8, "bit 3,b"),
    fixed(0xCB00 | 0x59, Bit, &[lit(3), C], 8, 2, 8, "bit 3,c"),
    fixed(0xCB00 | 0x5a, Bit, &[lit(3), D], 8, 2, 8, "bit 3,d"),
    fixed(0xCB00 | 0x5b, Bit, &[lit(3), E], 8, 2, 8, "bit 3,e"),
    fixed(0xCB00 | 0x5c, Bit, &[lit(3), H], 8, 2, 8, "bit 3,h"),
    fixed(0xCB00 | 0x5d, Bit, &[lit(3), L], 8, 2, 8, "bit 3,l"),
    fixed(0xCB00 | 0x5e, Bit, &[lit(3), AT_HL], 8, 2, 16, "bit 3,(hl)"),
    fixed(0xCB00 | 0x5f, Bit, &[lit(3), A], 8, 2, 8, "bit 3,a"),
    fixed(0xCB00 | 0x60, Bit, &[lit(4), B], 8, 2, 8, "bit 4,b"),
    fixed(0xCB00 | 0x61, Bit, &[lit(4), C], 8, 2, 8, "bit 4,c"),
    fixed(0xCB00 | 0x62, Bit, &[lit(4), D], 8, 2, 8, "bit 4,d"),
    fixed(0xCB00 | 0x63, Bit, &[lit(4), E], 8, 2, 8, "bit 4,e"),
    fixed(0xCB00 | 0x64, Bit, &[lit(4), H], 8, 2, 8, "bit 4,h"),
    fixed(0xCB00 | 0x65, Bit, &[lit(4), L], 8, 2, 8, "bit 4,l"),
    fixed(0xCB00 | 0x66, Bit, &[lit(4), AT_HL], 8, 2, 16, "bit 4,(hl)"),
    fixed(0xCB00 | 0x67, Bit, &[lit(4), A], 8, 2, 8, "bit 4,a"),
    fixed(0xCB00 | 0x68, Bit, &[lit(5), B], 8, 2, 8, "bit 5,b"),
    fixed(0xCB00 | 0x69, Bit, &[lit(5), C], 8, 2, 8, "bit 5,c"),
    fixed(0xCB00 | 0x6a, Bit, &[lit(5), D], 8, 2, 8, "bit 5,d"),
    fixed(0xCB00 | 0x6b, Bit, &[lit(5), E], 8, 2, 8, "bit 5,e"),
    fixed(0xCB00 | 0x6c, Bit, &[lit(5), H], 8, 2, 8, "bit 5,h"),
    fixed(0xCB00 | 0x6d, Bit, &[lit(5), L], 8, 2, 8, "bit 5,l"),
    fixed(0xCB00 | 0x6e, Bit, &[lit(5), AT_HL], 8, 2, 16, "bit 5,(hl)"),
    fixed(0xCB00 | 0x6f, Bit, &[lit(5), A], 8, 2, 8, "bit 5,a"),
    fixed(0xCB00 | 0x70, Bit, &[lit(6), B], 8, 2, 8, "bit 6,b"),
    fixed(0xCB00 | 0x71, Bit, &[lit(6), C], 8, 2, 8, "bit 6,c"),
    fixed(0xCB00 | 0x72, Bit, &[lit(6), D], 8, 2, 8, "bit 6,d"),
    fixed(0xCB00 | 0x73, Bit, &[lit(6), E], 8, 2, 8, "bit 6,e"),
    fixed(0xCB00 | 0x74, Bit, &[lit(6), H], 8, 2, 8, "bit 6,h"),
    fixed(0xCB00 | 0x75, Bit, &[lit(6), L], 8, 2, 8, "bit 6,l"),
    fixed(0xCB00 | 0x76, Bit, &[lit(6), AT_HL], 8, 2, 16, "bit 6,(hl)"),
    fixed(0xCB00 | 0x77, Bit, &[lit(6), A], 8, 2, 8, "bit 6,a"),
    fixed(0xCB00 | 0x78, Bit, &[lit(7), B], 8, 2, 8, "bit 7,b"),
    fixed(0xCB00 | 0x79, Bit, &[lit(7), C], 8, 2, 8, "bit 7,c"),
    fixed(0xCB00 | 0x7a, Bit, &[lit(7), D], 8, 2, 8, "bit 7,d"),
    fixed(0xCB00 | 0x7b, Bit, &[lit(7), E], 8, 2, 8, "bit 7,e"),
    fixed(0xCB00 | 0x7c, Bit, &[lit(7), H], 8, 2, 8, "bit 7,h"),
    fixed(0xCB00 | 0x7d, Bit, &[lit(7), L], 8, 2, 8, "bit 7,l"),
    fixed(0xCB00 | 0x7e, Bit, &[lit(7), AT_HL], 8, 2, 16, "bit 7,(hl)"),
    fixed(0xCB00 | 0x7f, Bit, &[lit(7), A], 8, 2, 8, "bit 7,a"),
    fixed(0xCB00 | 0x80, Res, &[lit(0), B], 8, 2, 8, "res 0,b"),
    fixed(0xCB00 | 0x81, Res, &[lit(0), C], 8, 2, 8, "res 0,c"),
    fixed(0xCB00 | 0x82, Res, &[lit(0), D], 8, 2, 8, "res 0,d"),
    fixed(0xCB00 | 0x83, Res, &[lit(0), E], 8, 2, 8, "res 0,e"),
    fixed(0xCB00 | 0x84, Res, &[lit(0), H], 8, 2, 8, "res 0,h"),
    fixed(0xCB00 | 0x85, Res, &[lit(0), L], 8, 2, 8, "res 0,l"),
    fixed(0xCB00 | 0x86, Res, &[lit(0), AT_HL], 8, 2, 16, "res 0,(hl)"),
    fixed(0xCB00 | 0x87, Res, &[lit(0), A], 8, 2, 8, "res 0,a"),
    fixed(0xCB00 | 0x88, Res, &[lit(1), B], 8, 2, 8, "res 1,b"),
    fixed(0xCB00 | 0x89, Res, &[lit(1), C], 8, 2, 8, "res 1,c"),
    fixed(0xCB00 | 0x8a, Res, &[lit(1), D], 8, 2, 8, "res 1,d"),
    fixed(0xCB00 | 0x8b, Res, &[lit(1), E], 8, 2, 8, "res 1,e"),
    fixed(0xCB00 | 0x8c, Res, &[lit(1), H], 8, 2, 8, "res 1,h"),
    fixed(0xCB00 | 0x8d, Res, &[lit(1), L], 8, 2, 8, "res 1,l"),
    fixed(0xCB00 | 0x8e, Res, &[lit(1), AT_HL], 8, 2, 16, "res 1,(hl)"),
    fixed(0xCB00 | 0x8f, Res, &[lit(1), A], 8, 2, 8, "res 1,a"),
    fixed(0xCB00 | 0x90, Res, &[lit(2), B], 8, 2, 8, "res 2,b"),
    fixed(0xCB00 | 0x91, Res, &[lit(2), C], 8, 2, 8, "res 2,c"),
    fixed(0xCB00 | 0x92, Res, &[lit(2), D], 8, 2, 8, "res 2,d"),
    fixed(0xCB00 | 0x93, Res, &[lit(2), E], 8, 2, 8, "res 2,e"),
    fixed(0xCB00 | 0x94, Res, &[lit(2), H], 8, 2, 8, "res 2,h"),
    fixed(0xCB00 | 0x95, Res, &[lit(2), L], 8, 2, 8, "res 2,l"),
    fixed(0xCB00 | 0x96, Res, &[lit(2), AT_HL], 8, 2, 16, "res 2,(hl)"),
    fixed(0xCB00 | 0x97, Res, &[lit(2), A], 8, 2, 8, "res 2,a"),
    fixed(0xCB00 | 0x98, Res, &[lit(3), B], 8, 2, 8, "res 3,b"),
    fixed(0xCB00 | 0x99, Res, &[lit(3), C], 8, 2, 8, "res 3,c"),
    fixed(0xCB00 | 0x9a, Res, &[lit(3), D], 8, 2, 8, "res 3,d"),
    fixed(0xCB00 | 0x9b, Res, &[lit(3), E], 8, 2, 8, "res 3,e"),
    fixed(0xCB00 | 0x9c, Res, &[lit(3), H], 8, 2, 8, "res 3,h"),
    fixed(0xCB00 | 0x9d, Res, &[lit(3), L], 8, 2, 8, "res 3,l"),
    fixed(0xCB00 | 0x9e, Res, &[lit(3), AT_HL], 8, 2, 16, "res 3,(hl)"),
    fixed(0xCB00 | 0x9f, Res, &[lit(3), A], 8, 2, 8, "res 3,a"),
    fixed(0xCB00 | 0xa0, Res, &[lit(4), B], 8, 2, 8, "res 4,b"),
    fixed(0xCB00 | 0xa1, Res, &[lit(4), C], 8, 2, 8, "res 4,c"),
    fixed(0xCB00 | 0xa2, Res, &[lit(4), D], 8, 2, 8, "res 4,d"),
    fixed(0xCB00 | 0xa3, Res, &[lit(4), E], 8, 2, 8, "res 4,e"),
    fixed(0xCB00 | 0xa4, Res, &[lit(4), H], 8, 2, 8, "res 4,h"),
    fixed(0xCB00 | 0xa5, Res, &[lit(4), L], 8, 2, 8, "res 4,l"),
    fixed(0xCB00 | 0xa6, Res, &[lit(4), AT_HL], 8, 2, 16, "res 4,(hl)"),
    fixed(0xCB00 | 0xa7, Res, &[lit(4), A], 8, 2, 8, "res 4,a"),
    fixed(0xCB00 | 0xa8, Res, &[lit(5), B], 8, 2, 8, "res 5,b"),
    fixed(0xCB00 | 0xa9, Res, &[lit(5), C], 8, 2, 8, "res 5,c"),
    fixed(0xCB00 | 0xaa, Res, &[lit(5), D], 8, 2, 8, "res 5,d"),
    fixed(0xCB00 | 0xab, Res, &[lit(5), E], 8, 2, 8, "res 5,e"),
    fixed(0xCB00 | 0xac, Res, &[lit(5), H], 8, 2, 8, "res 5,h"),
    fixed(0xCB00 | 0xad, Res, &[lit(5), L], 8, 2, 8, "res 5,l"),
    fixed(0xCB00 | 0xae, Res, &[lit(5), AT_HL], 8, 2, 16, "res 5,(hl)"),
    fixed(0xCB00 | 0xaf, Res, &[lit(5), A], 8, 2, 8, "res 5,a"),
    fixed(0xCB00 | 0xb0, Res, &[lit(6), B], 8, 2, 8, "res 6,b"),
    fixed(0xCB00 | 0xb1, Res, &[lit(6), C], 8, 2, 8, "res 6,c"),
    fixed(0xCB00 | 0xb2, Res, &[lit(6), D], 8, 2, 8, "res 6,d"),
    fixed(0xCB00 | 0xb3, Res, &[lit(6), E], 8, 2, 8, "res 6,e"),
    fixed(0xCB00 | 0xb4, Res, &[lit(6), H], 8, 2, 8, "res 6,h"),
    fixed(0xCB00 | 0xb5, Res, &[lit(6), L], 8, 2, 8, "res 6,l"),
    fixed(0xCB00 | 0xb6, Res, &[lit(6), AT_HL], 8, 2, 16, "res 6,(hl)"),
    fixed(0xCB00 | 0xb7, Res, &[lit(6), A], 8, 2, 8, "res 6,a"),
    fixed(0xCB00 | 0xb8, Res, &[lit(7), B], 8, 2, 8, "res 7,b"),
    fixed(0xCB00 | 0xb9, Res, &[lit(7), C], 8, 2, 8, "res 7,c"),
    fixed(0xCB00 | 0xba, Res, &[lit(7), D], 8, 2, 8, "res 7,d"),
    fixed(0xCB00 | 0xbb, Res, &[lit(7), E], 8, 2, 8, "res 7,e"),
    fixed(0xCB00 | 0xbc, Res, &[lit(7), H], 8, 2, 8, "res 7,h"),
    fixed(0xCB00 | 0xbd, Res, &[lit(7), L], 8, 2, 8, "res 7,l"),
    fixed(0xCB00 | 0xbe, Res, &[lit(7), AT_HL], 8, 2, 16, "res 7,(hl)"),
    fixed(0xCB00 | 0xbf, Res, &[lit(7), A], 8, 2, 8, "res 7,a"),
    fixed(0xCB00 | 0xc0, Set, &[lit(0), B], 8, 2, 8, "set 0,b"),
    fixed(0xCB00 | 0xc1, Set, &[lit(0), C], 8, 2, 8, "set 0,c"),
    fixed(0xCB00 | 0xc2, Set, &[lit(0), D], 8, 2, 8, "set 0,d"),
    fixed(0xCB00 | 0xc3, Set, &[lit(0), E], 8, 2, 8, "set 0,e"),
    fixed(0xCB00 | 0xc4, Set, &[lit(0), H], 8, 2, 8, "set 0,h"),
    fixed(0xCB00 | 0xc5, Set, &[lit(0), L], 8, 2, 8, "set 0,l"),
    fixed(0xCB00 | 0xc6, Set, &[lit(0), AT_HL], 8, 2, 16, "set 0,(hl)"),
    fixed(0xCB00 | 0xc7, Set, &[lit(0), A], 8, 2, 8, "set 0,a"),
    fixed(0xCB00 | 0xc8, Set, &[lit(1), B], 8, 2, 8, "set 1,b"),
    fixed(0xCB00 | 0xc9, Set, &[lit(1), C], 8, 2, 8, "set 1,c"),
    fixed(0xCB00 | 0xca, Set, &[lit(1), D], 8, 2, 8, "set 1,d"),
    fixed(0xCB00 | 0xcb, Set, &[lit(1), E], 8, 2, 8, "set 1,e"),
    fixed(0xCB00 | 0xcc, Set, &[lit(1), H], 8, 2, 8, "set 1,h"),
    fixed(0xCB00 | 0xcd, Set, &[lit(1), L], 8, 2, 8, "set 1,l"),
    fixed(0xCB00 | 0xce, Set, &[lit(1), AT_HL], 8, 2, 16, "set 1,(hl)"),
    fixed(0xCB00 | 0xcf, Set, &[lit(1), A], 8, 2, 8, "set 1,a"),
    fixed(0xCB00 | 0xd0, Set, &[lit(2), B], 8, 2, 8, "set 2,b"),
    fixed(0xCB00 | 0xd1, Set, &[lit(2), C], 8, 2, 8, "set 2,c"),
    fixed(0xCB00 | 0xd2, Set, &[lit(2), D], 8, 2, 8, "set 2,d"),
    fixed(0xCB00 | 0xd3, Set, &[lit(2), E], 8, 2, 8, "set 2,e"),
    fixed(0xCB00 | 0xd4, Set, &[lit(2), H], 8, 2, 8, "set 2,h"),
    fixed(0xCB00 | 0xd5, Set, &[lit(2), L], 8, 2, 8, "set 2,l"),
    fixed(0xCB00 | 0xd6, Set, &[lit(2), AT_HL], 8, 2, 16, "set 2,(hl)"),
    fixed(0xCB00 | 0xd7, Set, &[lit(2), A], 8, 2, 8, "set 2,a"),
    fixed(0xCB00 | 0xd8, Set, &[lit(3), B], 8, 2, 8, "set 3,b"),
    fixed(0xCB00 | 0xd9, Set, &[lit(3), C], 8, 2, 8, "set 3,c"),
    fixed(0xCB00 | 0xda, Set, &[lit(3), D], 8, 2, 8, "set 3,d"),
    fixed(0xCB00 | 0xdb, Set, &[lit(3), E], 8, 2, 8, "set 3,e"),
    fixed(0xCB00 | 0xdc, Set, &[lit(3), H], 8, 2, 8, "set 3,h"),
    fixed(0xCB00 | 0xdd, Set, &[lit(3), L], 8, 2, 8, "set 3,l"),
    fixed(0xCB00 | 0xde, Set, &[lit(3), AT_HL], 8, 2, 16, "set 3,(hl)"),
    fixed(0xCB00 | 0xdf, Set, &[lit(3), A], 8, 2, 8, "set 3,a"),
    fixed(0xCB00 | 0xe0, Set, &[lit(4), B], 8, 2, 8, "set 4,b"),
    fixed(0xCB00 | 0xe1, Set, &[lit(4), C], 8, 2, 8, "set 4,c"),
    fixed(0xCB00 | 0xe2, Set, &[lit(4), D], 8, 2, 8, "set 4,d"),
    fixed(0xCB00 | 0xe3, Set, &[lit(4), E], 8, 2, 8, "set 4,e"),
    fixed(0xCB00 | 0xe4, Set, &[lit(4), H], 8, 2, 8, "set 4,h"),
    fixed(0xCB00 | 0xe5, Set, &[lit(4), L], 8, 2, 8, "set 4,l"),
    fixed(0xCB00 | 0xe6, Set, &[lit(4), AT_HL], 8, 2, 16, "set 4,(hl)"),
    fixed(0xCB00 | 0xe7, Set, &[lit(4), A], 8, 2, 8, "set 4,a"),
    fixed(0xCB00 | 0xe8, Set, &[lit(5), B], 8, 2, 8, "set 5,b"),
    fixed(0xCB00 | 0xe9, Set, &[lit(5), C], 8, 2, 8, "set 5,c"),
    fixed(0xCB00 | 0xea, Set, &[lit(5), D], 8, 2, 8, "set 5,d"),
    fixed(0xCB00 | 0xeb, Set, &[lit(5), E], 8, 2, 8, "set 5,e"),
    fixed(0xCB00 | 0xec, Set, &[lit(5), H], 8, 2, 8, "set 5,h"),
    fixed(0xCB00 | 0xed, Set, &[lit(5), L], 8, 2, 8, "set 5,l"),
    fixed(0xCB00 | 0xee, Set, &[lit(5), AT_HL], 8, 2, 16, "set 5,(hl)"),
    fixed(0xCB00 | 0xef, Set, &[lit(5), A], 8, 2, 8, "set 5,a"),
    fixed(0xCB00 | 0xf0, Set, &[lit(6), B], 8, 2, 8, "set 6,b"),
    fixed(0xCB00 | 0xf1, Set, &[lit(6), C], 8, 2, 8, "set 6,c"),
    fixed(0xCB00 | 0xf2, Set, &[lit(6), D], 8, 2, 8, "set 6,d"),
    fixed(0xCB00 | 0xf3, Set, &[lit(6), E], 8, 2, 8, "set 6,e"),
    fixed(0xCB00 | 0xf4, Set, &[lit(6), H], 8, 2, 8, "set 6,h"),
    fixed(0xCB00 | 0xf5, Set, &[lit(6), L], 8, 2, 8, "set 6,l"),
    fixed(0xCB00 | 0xf6, Set, &[lit(6), AT_HL], 8, 2, 16, "set 6,(hl)"),
    fixed(0xCB00 | 0xf7, Set, &[lit(6), A], 8, 2, 8, "set 6,a"),
    fixed(0xCB00 | 0xf8, Set, &[lit(7), B], 8, 2, 8, "set 7,b"),
    fixed(0xCB00 | 0xf9, Set, &[lit(7), C], 8, 2, 8, "set 7,c"),
    fixed(0xCB00 | 0xfa, Set, &[lit(7), D], 8, 2, 8, "set 7,d"),
    fixed(0xCB00 | 0xfb, Set, &[lit(7), E], 8, 2, 8, "set 7,e"),
    fixed(0xCB00 | 0xfc, Set, &[lit(7), H], 8, 2, 8, "set 7,h"),
    fixed(0xCB00 | 0xfd, Set, &[lit(7), L], 8, 2, 8, "set 7,l"),
    fixed(0xCB00 | 0xfe, Set, &[lit(7), AT_HL], 8, 2, 16, "set 7,(hl)"),
    fixed(0xCB00 | 0xff, Set, &[lit(7), A], 8, 2, 8, "set 7,a"),
];

/// Validated decode index over `TABLE`: one 256-slot page for single-byte
/// opcodes, one for the CB-prefixed page.
pub struct Decoder {
    base: [Option<&'static OpDesc>; 256],
    cb: [Option<&'static OpDesc>; 256],
}

impl Decoder {
    /// Build and validate the decode pages. A duplicate, out-of-range or
    /// structurally malformed record is fatal at construction.
    pub fn new() -> Result<Self, CoreError> {
        let mut base: [Option<&'static OpDesc>; 256] = [None; 256];
        let mut cb: [Option<&'static OpDesc>; 256] = [None; 256];

        for desc in TABLE {
            if desc.bits != 8 && desc.bits != 16 {
                return Err(CoreError::OpcodeTable(format!(
                    "opcode {:#06x}: width {} is not 8 or 16",
                    desc.code, desc.bits
                )));
            }
            if desc.size == 0 || desc.size > 3 {
                return Err(CoreError::OpcodeTable(format!(
                    "opcode {:#06x}: size {} out of range",
                    desc.code, desc.size
                )));
            }
            if desc.is_conditional() && !matches!(desc.operands.first(), Some(Operand::Cond(_))) {
                return Err(CoreError::OpcodeTable(format!(
                    "opcode {:#06x}: two-arm timing without a condition operand",
                    desc.code
                )));
            }

            let slot = match desc.code {
                0x0000..=0x00FF => &mut base[desc.code as usize],
                0xCB00..=0xCBFF => &mut cb[(desc.code & 0xFF) as usize],
                _ => {
                    return Err(CoreError::OpcodeTable(format!(
                        "opcode {:#06x}: not a one-byte or CB-page code",
                        desc.code
                    )));
                }
            };
            if slot.is_some() {
                return Err(CoreError::OpcodeTable(format!(
                    "opcode {:#06x}: duplicate entry",
                    desc.code
                )));
            }
            *slot = Some(desc);
        }

        if base[CB_PREFIX as usize].is_some() {
            return Err(CoreError::OpcodeTable(
                "0xCB is the prefix byte and cannot carry an entry".into(),
            ));
        }

        Ok(Self { base, cb })
    }

    /// Look up a composed opcode (0x00..=0xFF or 0xCB00..=0xCBFF).
    #[inline]
    pub fn lookup(&self, code: u16) -> Option<&'static OpDesc> {
        match code {
            0x0000..=0x00FF => self.base[code as usize],
            0xCB00..=0xCBFF => self.cb[(code & 0xFF) as usize],
            _ => None,
        }
    }
}
