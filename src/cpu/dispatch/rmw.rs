/*!
rmw.rs - Read-modify-write opcode family handler: rotates, nibble swap and
single-bit operations, covering both the accumulator shorthands and the
CB-page forms.

Flag behavior:
    RLC/RL/RRC/RR r - Z 0 0 C (Z from the result)
    RLCA/RLA/RRCA/RRA - 0 0 0 C (Z forced clear on the A shorthands)
    SWAP r - Z 0 0 0
    BIT n,r - Z 0 1 - (Z set when the bit is clear)
    SET/RES n,r - no flags

SLA/SRA/SRL and DAA are reserved: decoding reaches them, executing them
raises the labelled unimplemented fault for the front end to display.

Targets are resolved to a `Place` once, so the (HL) forms perform a single
read and a single write at one effective address.
*/

use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::operand::{self, Operand};
use crate::cpu::state::{CARRY, CpuState, HALF_CARRY, SUBTRACT, ZERO};
use crate::cpu::table::{OpDesc, Operator};
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Result<Flow, CoreError> {
    match desc.op {
        Operator::Swap => {
            let p = operand::place(cpu, bus, &desc.operands[0]);
            let v = operand::load8(cpu, bus, p);
            let r = (v << 4) | (v >> 4);
            operand::store8(cpu, bus, p, r);
            cpu.assign_flag(ZERO, r == 0);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, false);
            cpu.assign_flag(CARRY, false);
        }

        Operator::Rlc => rotate(cpu, bus, &desc.operands[0], Rotation::LeftCircular, true),
        Operator::Rrc => rotate(cpu, bus, &desc.operands[0], Rotation::RightCircular, true),
        Operator::Rl => rotate(cpu, bus, &desc.operands[0], Rotation::LeftThroughCarry, true),
        Operator::Rr => rotate(cpu, bus, &desc.operands[0], Rotation::RightThroughCarry, true),

        // Accumulator shorthands force Z clear.
        Operator::Rlca => rotate_a(cpu, bus, Rotation::LeftCircular),
        Operator::Rrca => rotate_a(cpu, bus, Rotation::RightCircular),
        Operator::Rla => rotate_a(cpu, bus, Rotation::LeftThroughCarry),
        Operator::Rra => rotate_a(cpu, bus, Rotation::RightThroughCarry),

        Operator::Bit => {
            let n = bit_index(desc);
            let v = operand::read8(cpu, bus, &desc.operands[1]);
            cpu.assign_flag(ZERO, v & (1 << n) == 0);
            cpu.assign_flag(SUBTRACT, false);
            cpu.assign_flag(HALF_CARRY, true);
        }
        Operator::Set => {
            let n = bit_index(desc);
            let p = operand::place(cpu, bus, &desc.operands[1]);
            let v = operand::load8(cpu, bus, p);
            operand::store8(cpu, bus, p, v | (1 << n));
        }
        Operator::Res => {
            let n = bit_index(desc);
            let p = operand::place(cpu, bus, &desc.operands[1]);
            let v = operand::load8(cpu, bus, p);
            operand::store8(cpu, bus, p, v & !(1 << n));
        }

        Operator::Sla | Operator::Sra | Operator::Srl | Operator::Daa => {
            return Err(CoreError::Unimplemented {
                mnemonic: desc.mnemonic,
                opcode: desc.code,
                pc: cpu.pc,
            });
        }
        _ => {}
    }
    Ok(Flow::Next(desc.scalar_time()))
}

#[derive(Clone, Copy)]
enum Rotation {
    LeftCircular,
    RightCircular,
    LeftThroughCarry,
    RightThroughCarry,
}

fn bit_index(desc: &OpDesc) -> u8 {
    match desc.operands[0] {
        Operand::Lit(n) => (n & 7) as u8,
        _ => 0,
    }
}

fn rotate(cpu: &mut CpuState, bus: &mut Bus, target: &Operand, kind: Rotation, zero_from_result: bool) {
    let p = operand::place(cpu, bus, target);
    let v = operand::load8(cpu, bus, p);
    let carry_in = cpu.carry_in();
    let (r, carry_out) = match kind {
        Rotation::LeftCircular => (v.rotate_left(1), v & 0x80 != 0),
        Rotation::RightCircular => (v.rotate_right(1), v & 0x01 != 0),
        Rotation::LeftThroughCarry => ((v << 1) | carry_in, v & 0x80 != 0),
        Rotation::RightThroughCarry => ((v >> 1) | (carry_in << 7), v & 0x01 != 0),
    };
    operand::store8(cpu, bus, p, r);
    cpu.assign_flag(ZERO, zero_from_result && r == 0);
    cpu.assign_flag(SUBTRACT, false);
    cpu.assign_flag(HALF_CARRY, false);
    cpu.assign_flag(CARRY, carry_out);
}

fn rotate_a(cpu: &mut CpuState, bus: &mut Bus, kind: Rotation) {
    rotate(
        cpu,
        bus,
        &Operand::Reg8(crate::cpu::operand::Reg8::A),
        kind,
        false,
    );
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::CARRY;
    use crate::error::CoreError;
    use crate::test_utils::cpu_with_program;

    #[test]
    fn swap_exchanges_nibbles() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x37]); // swap a
        cpu.state_mut().a = 0xF1;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0x1F);
        assert_eq!(cpu.state().f(), 0x00);
    }

    #[test]
    fn swap_zero_sets_z() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x30]); // swap b
        cpu.state_mut().b = 0x00;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0x80);
    }

    #[test]
    fn rlc_rotates_bit7_into_carry_and_bit0() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x00]); // rlc b
        cpu.state_mut().b = 0x85;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().b, 0x0B);
        assert_eq!(cpu.state().f(), 0x10);
    }

    #[test]
    fn rl_shifts_carry_in() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x10]); // rl b
        cpu.state_mut().b = 0x80;
        cpu.state_mut().assign_flag(CARRY, false);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().b, 0x00);
        assert_eq!(cpu.state().f(), 0x90); // Z | C
    }

    #[test]
    fn rr_shifts_carry_into_bit7() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x19]); // rr c
        cpu.state_mut().c = 0x01;
        cpu.state_mut().assign_flag(CARRY, true);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().c, 0x80);
        assert_eq!(cpu.state().f(), 0x10);
    }

    #[test]
    fn rrc_wraps_bit0() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x09]); // rrc c
        cpu.state_mut().c = 0x01;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().c, 0x80);
        assert_eq!(cpu.state().f(), 0x10);
    }

    #[test]
    fn accumulator_rotates_force_z_clear() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x17]); // rla
        cpu.state_mut().a = 0x80;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().a, 0x00);
        assert_eq!(cpu.state().f(), 0x10); // C only: Z forced clear
    }

    #[test]
    fn rotate_hl_touches_memory_once() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x06]); // rlc (hl)
        cpu.state_mut().set_hl(0xC080);
        bus.write(0xC080, 0x81);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(bus.peek(0xC080), 0x03);
        assert_eq!(cpu.state().f(), 0x10);
        assert_eq!(cycles, 16);
    }

    #[test]
    fn bit_reports_complement_of_the_bit() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x7C, 0xCB, 0x7C]); // bit 7,h twice
        cpu.state_mut().h = 0x80;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0x20); // bit set -> Z clear, H set
        cpu.state_mut().h = 0x00;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.state().f(), 0xA0); // bit clear -> Z set
    }

    #[test]
    fn set_res_are_idempotent() {
        let (mut cpu, mut bus) =
            cpu_with_program(&[0xCB, 0xD8, 0xCB, 0xD8, 0xCB, 0x98, 0xCB, 0x98]);
        cpu.state_mut().b = 0x00;
        cpu.step(&mut bus).unwrap(); // set 3,b
        assert_eq!(cpu.state().b, 0x08);
        cpu.step(&mut bus).unwrap(); // set 3,b again
        assert_eq!(cpu.state().b, 0x08);
        cpu.step(&mut bus).unwrap(); // res 3,b
        assert_eq!(cpu.state().b, 0x00);
        cpu.step(&mut bus).unwrap(); // res 3,b again
        assert_eq!(cpu.state().b, 0x00);
    }

    #[test]
    fn set_hl_indirect() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0xFE]); // set 7,(hl)
        cpu.state_mut().set_hl(0xC000);
        bus.write(0xC000, 0x01);
        cpu.step(&mut bus).unwrap();
        assert_eq!(bus.peek(0xC000), 0x81);
    }

    #[test]
    fn reserved_shifts_raise_labelled_faults() {
        for (prog, mnemonic) in [
            (&[0xCB, 0x20][..], "sla b"),
            (&[0xCB, 0x28][..], "sra b"),
            (&[0xCB, 0x38][..], "srl b"),
            (&[0x27][..], "daa"),
        ] {
            let (mut cpu, mut bus) = cpu_with_program(prog);
            match cpu.step(&mut bus) {
                Err(CoreError::Unimplemented { mnemonic: m, .. }) => assert_eq!(m, mnemonic),
                other => panic!("expected unimplemented fault, got {other:?}"),
            }
        }
    }
}
