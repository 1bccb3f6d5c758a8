/*!
logical.rs - Bitwise-logic and flag-manipulation opcode family handler.

Covers:
    AND x - Z 0 1 0
    OR x  - Z 0 0 0
    XOR x - Z 0 0 0
    CPL   - A ^= 0xFF, N and H cleared
    CCF   - carry complemented, N and H cleared
    SCF   - carry set, N and H cleared
*/

use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::operand;
use crate::cpu::state::{CARRY, CpuState, HALF_CARRY, SUBTRACT, ZERO};
use crate::cpu::table::{OpDesc, Operator};
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Result<Flow, CoreError> {
    match desc.op {
        Operator::And => {
            let q = operand::read8(cpu, bus, &desc.operands[0]);
            cpu.a &= q;
            logic_flags(cpu, true);
        }
        Operator::Or => {
            let q = operand::read8(cpu, bus, &desc.operands[0]);
            cpu.a |= q;
            logic_flags(cpu, false);
        }
        Operator::Xor => {
            let q = operand::read8(cpu, bus, &desc.operands[0]);
            cpu.a ^= q;
            logic_flags(cpu, false);
        }
        Operator::Cpl => {
            cpu.a ^= 0xFF;
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, false);
        }
        Operator::Ccf => {
            let c = cpu.flag(CARRY);
            cpu.assign_flag(CARRY, !c);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, false);
        }
        Operator::Scf => {
            cpu.assign_flag(CARRY, true);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, false);
        }
        _ => {}
    }
    Ok(Flow::Next(desc.scalar_time()))
}

fn logic_flags(cpu: &mut CpuState, half: bool) {
    let zero = cpu.a == 0;
    cpu.assign_flag(ZERO, zero);
    cpu.assign_flag(SUBTRACT, false);
    cpu.assign_flag(HALF_CARRY, half);
    cpu.assign_flag(CARRY, false);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::CARRY;
    use crate::test_utils::cpu_with_program;

    #[test]
    fn and_sets_half_flag() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xA0]); // and b
        cpu.state_mut().a = 0b1100;
        cpu.state_mut().b = 0b1010;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0b1000);
        assert_eq!(cpu.state().f(), 0x20); // H only
    }

    #[test]
    fn and_to_zero() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xE6, 0x00]); // and d8
        cpu.state_mut().a = 0xFF;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0xA0); // Z | H, carry cleared
    }

    #[test]
    fn xor_self_clears_a() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xAF]); // xor a
        cpu.state_mut().a = 0x5C;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0);
        assert_eq!(cpu.state().f(), 0x80); // Z only
    }

    #[test]
    fn or_merges_bits() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xB1]); // or c
        cpu.state_mut().a = 0x0F;
        cpu.state_mut().c = 0xF0;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0xFF);
        assert_eq!(cpu.state().f(), 0x00);
    }

    #[test]
    fn cpl_inverts_a_and_clears_n_h() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x2F]);
        cpu.state_mut().a = 0x35;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0xCA);
        assert_eq!(cpu.state().f(), 0x10); // carry untouched
    }

    #[test]
    fn ccf_toggles_carry() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x3F, 0x3F]);
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().flag(CARRY));
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.state().flag(CARRY));
    }

    #[test]
    fn scf_sets_carry() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x37]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0x10);
    }
}
