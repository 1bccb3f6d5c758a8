/*!
arithmetic.rs - Add/subtract/increment opcode family handler.

Covers:
    INC/DEC  - 8-bit forms set Z/N/H and leave C alone; 16-bit forms set
               nothing
    ADD A,x  - Z 0 H C
    ADC A,x  - as ADD with carry-in
    SUB x    - Z 1 H C
    SBC A,x  - as SUB with borrow-in
    ADD HL,rr - N cleared, H at bit 11, C at bit 15, Z untouched
    ADD SP,r8 - Z and N cleared, H/C from the low-byte add

All flag material comes from the `alu` helpers; this module only decides
which of the returned facts an operator commits.
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
        Operator::Inc => {
            if desc.bits == 16 {
                let p = operand::place(cpu, bus, &desc.operands[0]);
                let v = operand::load16(cpu, bus, p);
                operand::store16(cpu, bus, p, v.wrapping_add(1));
            } else {
                let p = operand::place(cpu, bus, &desc.operands[0]);
                let r = alu::add8(operand::load8(cpu, bus, p), 1, 0);
                operand::store8(cpu, bus, p, r.value);
                cpu.assign_flag(ZERO, r.zero);
                cpu.assign_flag(SUBTRACT, false);
                cpu.assign_flag(HALF_CARRY, r.half);
            }
        }
        Operator::Dec => {
            if desc.bits == 16 {
                let p = operand::place(cpu, bus, &desc.operands[0]);
                let v = operand::load16(cpu, bus, p);
                operand::store16(cpu, bus, p, v.wrapping_sub(1));
            } else {
                let p = operand::place(cpu, bus, &desc.operands[0]);
                let r = alu::sub8(operand::load8(cpu, bus, p), 1, 0);
                operand::store8(cpu, bus, p, r.value);
                cpu.assign_flag(ZERO, r.zero);
                cpu.assign_flag(SUBTRACT, true);
                cpu.assign_flag(HALF_CARRY, r.half);
            }
        }
        Operator::Add if desc.bits == 16 => {
            let q = operand::read16(cpu, bus, &desc.operands[1]);
            let r = alu::add16(cpu.hl(), q);
            cpu.set_hl(r.value);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, r.half);
            cpu.assign_flag(CARRY, r.carry);
        }
        Operator::Add => add_to_a(cpu, bus, desc, 0),
        Operator::Adc => {
            let c = cpu.carry_in();
            add_to_a(cpu, bus, desc, c);
        }
        Operator::AddSp => {
            let offset = operand::read8(cpu, bus, &desc.operands[1]);
            let r = alu::add16e(cpu.sp, offset);
            cpu.sp = r.value;
            cpu.assign_flag(ZERO, false);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, r.half);
            cpu.assign_flag(CARRY, r.carry);
        }
        Operator::Sub => sub_from_a(cpu, bus, desc, 0),
        Operator::Sbc => {
            let c = cpu.carry_in();
            sub_from_a(cpu, bus, desc, c);
        }
        _ => {}
    }
    Ok(Flow::Next(desc.scalar_time()))
}

fn add_to_a(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc, carry_in: u8) {
    let src = &desc.operands[desc.operands.len() - 1];
    let q = operand::read8(cpu, bus, src);
    let r = alu::add8(cpu.a, q, carry_in);
    cpu.a = r.value;
    cpu.assign_flag(ZERO, r.zero);
    cpu.assign_flag(SUBTRACT, false);
    cpu.assign_flag(HALF_CARRY, r.half);
    cpu.assign_flag(CARRY, r.carry);
}

fn sub_from_a(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc, borrow_in: u8) {
    let src = &desc.operands[desc.operands.len() - 1];
    let q = operand::read8(cpu, bus, src);
    let r = alu::sub8(cpu.a, q, borrow_in);
    cpu.a = r.value;
    cpu.assign_flag(ZERO, r.zero);
    cpu.assign_flag(SUBTRACT, true);
    cpu.assign_flag(HALF_CARRY, r.half);
    cpu.assign_flag(CARRY, r.carry);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::CARRY;
    use crate::test_utils::cpu_with_program;

    // ADD A,B across the flag space.
    #[test]
    fn add_a_b_flag_matrix() {
        let cases = [
            // (a, b, result, f)
            (0x3Au8, 0x71u8, 0xABu8, 0x00u8),
            (0x39, 0x19, 0x52, 0x20),
            (0xFB, 0xF2, 0xED, 0x10),
            (0x00, 0x00, 0x00, 0x80),
            (0x20, 0xE0, 0x00, 0x90),
            (0x2A, 0xD6, 0x00, 0xB0),
        ];
        for (a, b, result, f) in cases {
            let (mut cpu, mut bus) = cpu_with_program(&[0x80]);
            cpu.state_mut().a = a;
            cpu.state_mut().b = b;
            cpu.step(&mut bus).unwrap();
            assert_eq!(cpu.state().a, result, "a={a:#04x} b={b:#04x}");
            assert_eq!(cpu.state().f(), f, "a={a:#04x} b={b:#04x}");
        }
    }

    #[test]
    fn adc_immediate_with_carry_in() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCE, 0x3A]);
        cpu.state_mut().a = 0x71;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0xAC);
        assert_eq!(cpu.state().f(), 0x00);
    }

    #[test]
    fn sub_sets_subtract_and_borrow_flags() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x90]); // sub b
        cpu.state_mut().a = 0x30;
        cpu.state_mut().b = 0x40;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0xF0);
        assert_eq!(cpu.state().f(), 0x50); // N | C
    }

    #[test]
    fn sbc_consumes_borrow_in() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x98]); // sbc a,b
        cpu.state_mut().a = 0x10;
        cpu.state_mut().b = 0x0F;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0x00);
        assert_eq!(cpu.state().f(), 0xE0); // Z | N | H
    }

    #[test]
    fn inc8_preserves_carry() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x3C]); // inc a
        cpu.state_mut().a = 0x0F;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0x10);
        assert_eq!(cpu.state().f(), 0x30); // H set, C untouched
    }

    #[test]
    fn dec8_to_zero() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x05]); // dec b
        cpu.state_mut().b = 0x01;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().b, 0x00);
        assert_eq!(cpu.state().f(), 0xC0); // Z | N
    }

    #[test]
    fn inc16_wraps_without_flags() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x23]); // inc hl
        cpu.state_mut().set_hl(0xFFFF);
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().hl(), 0x0000);
        assert_eq!(cpu.state().f(), 0x10); // untouched
    }

    #[test]
    fn inc_hl_indirect_read_modify_write() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x34]); // inc (hl)
        cpu.state_mut().set_hl(0xC000);
        bus.write(0xC000, 0xFF);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(bus.peek(0xC000), 0x00);
        assert_eq!(cpu.state().f(), 0xA0); // Z | H
        assert_eq!(cycles, 12);
    }

    #[test]
    fn add_hl_uses_bit11_and_bit15_carries() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x09]); // add hl,bc
        cpu.state_mut().set_hl(0x0FFF);
        cpu.state_mut().set_bc(0x0001);
        cpu.state_mut().assign_flag(crate::cpu::state::ZERO, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().hl(), 0x1000);
        // H set, Z untouched.
        assert_eq!(cpu.state().f(), 0xA0);

        let (mut cpu, mut bus) = cpu_with_program(&[0x39]); // add hl,sp
        cpu.state_mut().set_hl(0xFF00);
        cpu.state_mut().sp = 0x0100;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().hl(), 0x0000);
        assert_eq!(cpu.state().f(), 0x30); // H | C
    }

    #[test]
    fn add_sp_signed_offset() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0xFE]); // add sp,-2
        cpu.state_mut().sp = 0x1000;
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().sp, 0x0FFE);
        assert_eq!(cycles, 16);
        // Flags come from the low-byte add: 0x00 + 0xFE carries nothing.
        assert_eq!(cpu.state().f(), 0x00);

        let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0x01]);
        cpu.state_mut().sp = 0x10FF;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().sp, 0x1100);
        assert_eq!(cpu.state().f(), 0x30); // H | C from the low byte
    }
}
