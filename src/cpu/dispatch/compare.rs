/*!
compare.rs - CP opcode family handler.

CP x performs A - x, commits the flags (Z 1 H C) and discards the result.
*/

use crate::alu;
use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::operand;
use crate::cpu::state::{CARRY, CpuState, HALF_CARRY, SUBTRACT, ZERO};
use crate::cpu::table::OpDesc;
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Result<Flow, CoreError> {
    let src = &desc.operands[desc.operands.len() - 1];
    let q = operand::read8(cpu, bus, src);
    let r = alu::sub8(cpu.a, q, 0);
    cpu.assign_flag(ZERO, r.zero);
    cpu.assign_flag(SUBTRACT, true);
    cpu.assign_flag(HALF_CARRY, r.half);
    cpu.assign_flag(CARRY, r.carry);
    Ok(Flow::Next(desc.scalar_time()))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::cpu_with_program;

    #[test]
    fn cp_equal_sets_zero_and_keeps_a() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xFE, 0x42]); // cp d8
        cpu.state_mut().a = 0x42;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0x42);
        assert_eq!(cpu.state().f(), 0xC0); // Z | N
    }

    #[test]
    fn cp_smaller_a_sets_carry() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xB8]); // cp b
        cpu.state_mut().a = 0x30;
        cpu.state_mut().b = 0x40;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0x50); // N | C
    }

    #[test]
    fn cp_hl_indirect() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xBE]); // cp (hl)
        cpu.state_mut().a = 0x11;
        cpu.state_mut().set_hl(0xC000);
        bus.write(0xC000, 0x02);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0x60); // N | H (low-nibble borrow)
        assert_eq!(cycles, 8);
    }
}
