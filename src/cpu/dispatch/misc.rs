/*!
misc.rs - Control-latch opcode family handler (NOP/HALT/STOP/DI/EI).

HALT and STOP set their execution latches; the orchestrator idles instead of
decoding while either is up. DI and EI set pending latches consumed at the
top of the following step, so the enable change lands one instruction late
as the hardware does it.
*/

use crate::cpu::dispatch::Flow;
use crate::cpu::state::CpuState;
use crate::cpu::table::{OpDesc, Operator};
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, desc: &OpDesc) -> Result<Flow, CoreError> {
    match desc.op {
        Operator::Nop => {}
        Operator::Halt => cpu.halted = true,
        Operator::Stop => cpu.stopped = true,
        Operator::Di => cpu.di_pending = true,
        Operator::Ei => cpu.ei_pending = true,
        _ => {}
    }
    Ok(Flow::Next(desc.scalar_time()))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::cpu_with_program;

    #[test]
    fn halt_sets_latch_and_advances_pc() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x76]);
        let cycles = cpu.step(&mut bus).unwrap();
        assert!(cpu.state().halted);
        assert_eq!(cpu.state().pc, 1);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn stop_sets_latch_and_skips_its_padding_byte() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x10, 0x00]);
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().stopped);
        assert_eq!(cpu.state().pc, 2);
    }

    #[test]
    fn di_ei_set_pending_latches_only() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xFB]);
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().ei_pending);
        assert!(!cpu.state().ime);

        let (mut cpu, mut bus) = cpu_with_program(&[0xF3]);
        cpu.state_mut().ime = true;
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().di_pending);
        assert!(cpu.state().ime);
    }
}
