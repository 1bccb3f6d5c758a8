/*!
load_store.rs - Load / store opcode family handler.

Covers:
    LD   - every form, 8-bit and 16-bit, register/immediate/indirect
    LDI  - LD then HL += 1 (0x22, 0x2A)
    LDD  - LD then HL -= 1 (0x32, 0x3A)
    LDHL - HL = SP + signed r8, flags from the low-byte add (0xF8)
    PUSH - SP -= 2; mem16[SP] = rr (0xC5/0xD5/0xE5/0xF5)
    POP  - rr = mem16[SP]; SP += 2 (0xC1/0xD1/0xE1/0xF1)

Plain loads change no flags. POP AF restores F through the pair view, which
masks the low nibble. Destination places are resolved before the source is
read, so a fetch-bearing destination (LDH (a8),A and friends) consumes its
operand byte exactly once.
*/

use crate::alu;
use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::operand;
use crate::cpu::state::{CARRY, CpuState, HALF_CARRY, SUBTRACT, ZERO};
use crate::cpu::table::{OpDesc, Operator};
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Result<Flow, CoreError> {
    match desc.op {
        Operator::Ld => ld(cpu, bus, desc),
        Operator::Ldi => {
            ld(cpu, bus, desc);
            cpu.set_hl(cpu.hl().wrapping_add(1));
        }
        Operator::Ldd => {
            ld(cpu, bus, desc);
            cpu.set_hl(cpu.hl().wrapping_sub(1));
        }
        Operator::Ldhl => ldhl(cpu, bus, desc),
        Operator::Push => {
            let v = operand::read16(cpu, bus, &desc.operands[0]);
            cpu.push16(bus, v);
        }
        Operator::Pop => {
            let v = cpu.pop16(bus);
            let p = operand::place(cpu, bus, &desc.operands[0]);
            operand::store16(cpu, bus, p, v);
        }
        _ => {}
    }
    Ok(Flow::Next(desc.scalar_time()))
}

fn ld(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) {
    let p = operand::place(cpu, bus, &desc.operands[0]);
    if desc.bits == 16 {
        let v = operand::read16(cpu, bus, &desc.operands[1]);
        operand::store16(cpu, bus, p, v);
    } else {
        let v = operand::read8(cpu, bus, &desc.operands[1]);
        operand::store8(cpu, bus, p, v);
    }
}

fn ldhl(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) {
    let offset = operand::read8(cpu, bus, &desc.operands[1]);
    let r = alu::add16e(cpu.sp, offset);
    cpu.set_hl(r.value);
    cpu.assign_flag(ZERO, false);
    cpu.assign_flag(SUBTRACT, false);
    cpu.assign_flag(HALF_CARRY, r.half);
    cpu.assign_flag(CARRY, r.carry);
}
