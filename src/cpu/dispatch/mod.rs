/*!
dispatch - Orchestrator for a single CPU step plus the per-family handlers.

Overview
========
Coordinates one decode-dispatch cycle:
1. Settle the delayed EI/DI latches (they land on the instruction after the
   one that set them).
2. If halted or stopped, charge idle cycles and return without decoding.
3. Point the fetcher at PC, fetch the opcode, compose the CB-page code when
   the prefix byte appears.
4. Look the code up in the declarative table; a miss is the fatal bad-opcode
   condition.
5. Route to the family handler for the record's operator.
6. Finalize: handlers that did not branch get PC advanced by the declared
   size; the timing they report is charged to `cpu.time` either way.

Handler contract
================
A family handler may consume operand bytes through the fetcher (only for
records declaring d8/a8/d16/a16/r8 operands). It returns `Flow::Next(t)` to
request the generic PC advance, or `Flow::Jump(t)` when it overwrote PC
itself (taken branches, calls, returns, restarts). `t` is always read from
the record's timing column, never invented.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;
use crate::cpu::table::{CB_PREFIX, Decoder, OpDesc, Operator};
use crate::error::CoreError;

pub(crate) mod arithmetic;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

/// Cycles charged per step while halted or stopped, so the GPU keeps
/// advancing. Resume-on-interrupt is reserved.
const IDLE_CYCLES: u32 = 4;

/// How a handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Generic finish: the orchestrator advances PC by the declared size.
    Next(u32),
    /// The handler set PC itself.
    Jump(u32),
}

/// Execute one CPU step and return the cycles consumed.
pub(crate) fn step(cpu: &mut CpuState, bus: &mut Bus, decoder: &Decoder) -> Result<u32, CoreError> {
    cpu.settle_interrupt_latches();

    if cpu.halted || cpu.stopped {
        cpu.add_time(IDLE_CYCLES);
        return Ok(IDLE_CYCLES);
    }

    bus.fetch_set(cpu.pc);
    let first = bus.fetch();
    let code: u16 = if first == CB_PREFIX {
        0xCB00 | bus.fetch() as u16
    } else {
        first as u16
    };

    let desc = decoder
        .lookup(code)
        .ok_or(CoreError::UndecodedOpcode { opcode: code, pc: cpu.pc })?;

    if let Some(dbg) = bus.debugger_mut() {
        dbg.on_decode(code, desc.mnemonic);
    }

    let cycles = match exec(cpu, bus, desc)? {
        Flow::Next(t) => {
            cpu.advance_pc(desc.size);
            t
        }
        Flow::Jump(t) => t,
    };
    cpu.add_time(cycles);
    Ok(cycles)
}

fn exec(cpu: &mut CpuState, bus: &mut Bus, desc: &'static OpDesc) -> Result<Flow, CoreError> {
    use Operator::*;
    match desc.op {
        Nop | Halt | Stop | Di | Ei => misc::handle(cpu, desc),
        Ld | Ldi | Ldd | Ldhl | Push | Pop => load_store::handle(cpu, bus, desc),
        Inc | Dec | Add | AddSp | Adc | Sub | Sbc => arithmetic::handle(cpu, bus, desc),
        Cp => compare::handle(cpu, bus, desc),
        And | Or | Xor | Cpl | Ccf | Scf => logical::handle(cpu, bus, desc),
        Swap | Rlc | Rl | Rrc | Rr | Rlca | Rla | Rrca | Rra | Bit | Set | Res | Sla | Sra
        | Srl | Daa => rmw::handle(cpu, bus, desc),
        Jp | Jr | Call | Ret | Reti | Rst => control_flow::handle(cpu, bus, desc),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CoreError;
    use crate::test_utils::cpu_with_program;

    #[test]
    fn nop_advances_pc_and_time() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x00, 0x00]);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cycles, 4);
        assert_eq!(cpu.state().pc, 1);
        assert_eq!(cpu.state().time, 4);
    }

    #[test]
    fn cb_page_composes_two_byte_code() {
        // SET 0,B
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0xC0]);
        cpu.state_mut().b = 0;
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cycles, 8);
        assert_eq!(cpu.state().b, 0x01);
        assert_eq!(cpu.state().pc, 2);
    }

    #[test]
    fn bad_opcode_is_fatal_and_preserves_state() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xD3]);
        cpu.state_mut().a = 0x42;
        let err = cpu.step(&mut bus).unwrap_err();
        match err {
            CoreError::UndecodedOpcode { opcode, pc } => {
                assert_eq!(opcode, 0xD3);
                assert_eq!(pc, 0);
            }
            other => panic!("expected bad opcode, got {other}"),
        }
        // Register dump still available for diagnostics.
        assert_eq!(cpu.state().a, 0x42);
    }

    #[test]
    fn halted_cpu_idles_without_decoding() {
        // HALT; then garbage that would be a bad opcode if decoded.
        let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0xD3]);
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().halted);
        let pc = cpu.state().pc;
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cycles, 4);
        assert_eq!(cpu.state().pc, pc);
    }

    #[test]
    fn ei_takes_effect_after_the_following_instruction() {
        // EI; NOP; NOP
        let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0x00, 0x00]);
        cpu.step(&mut bus).unwrap(); // EI sets the pending latch
        assert!(!cpu.state().ime);
        assert!(cpu.state().ei_pending);
        cpu.step(&mut bus).unwrap(); // latch settles at the top of this step
        assert!(cpu.state().ime);
    }

    #[test]
    fn di_clears_ime_via_latch() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xF3, 0x00]);
        cpu.state_mut().ime = true;
        cpu.step(&mut bus).unwrap();
        assert!(cpu.state().ime); // still enabled during DI itself
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.state().ime);
    }
}
