/*!
control_flow.rs - Branch opcode family handler (JP/JR/CALL/RET/RETI/RST).

These are the only handlers that may overwrite PC. The contract with the
orchestrator:
- Taken paths set PC and return `Flow::Jump` with the taken-arm cost.
- Not-taken conditional paths return `Flow::Next` with the not-taken cost,
  so the orchestrator performs the normal PC advance.
- Operand bytes are consumed from the fetcher whether or not the branch is
  taken; the declared size accounts for them.

Targets:
    JP a16  - absolute immediate; JP (HL) branches to the value of HL
    JR r8   - PC + size + sign-extended displacement
    CALL    - push PC+size, then absolute immediate
    RET     - pop PC
    RETI    - pop PC and raise the interrupt-enable latch immediately
    RST n   - push PC+size, then the fixed vector from the table
*/

use crate::bus::Bus;
use crate::cpu::dispatch::Flow;
use crate::cpu::operand;
use crate::cpu::state::CpuState;
use crate::cpu::table::{OpDesc, Operator, Timing};
use crate::error::CoreError;

pub(super) fn handle(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Result<Flow, CoreError> {
    let flow = match desc.op {
        Operator::Jp => jump(cpu, bus, desc, Target::Absolute),
        Operator::Jr => jump(cpu, bus, desc, Target::Relative),
        Operator::Call => call(cpu, bus, desc),
        Operator::Ret => ret(cpu, bus, desc),
        Operator::Reti => {
            cpu.pc = cpu.pop16(bus);
            cpu.ime = true;
            Flow::Jump(desc.scalar_time())
        }
        Operator::Rst => {
            let vector = operand::read16(cpu, bus, &desc.operands[0]);
            let ret_addr = cpu.pc.wrapping_add(desc.size);
            cpu.push16(bus, ret_addr);
            cpu.pc = vector;
            Flow::Jump(desc.scalar_time())
        }
        _ => Flow::Next(desc.scalar_time()),
    };
    Ok(flow)
}

#[derive(Clone, Copy)]
enum Target {
    Absolute,
    Relative,
}

fn resolve(cpu: &mut CpuState, bus: &mut Bus, op: &operand::Operand, kind: Target, size: u16) -> u16 {
    match kind {
        Target::Absolute => operand::read16(cpu, bus, op),
        Target::Relative => {
            // Displacement is relative to the instruction after this one.
            let disp = operand::read16(cpu, bus, op); // sign-extended r8
            cpu.pc.wrapping_add(size).wrapping_add(disp)
        }
    }
}

fn jump(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc, kind: Target) -> Flow {
    if let Timing::Branch { taken, not_taken } = desc.time {
        let take = operand::condition(cpu, &desc.operands[0]);
        let target = resolve(cpu, bus, &desc.operands[1], kind, desc.size);
        if take {
            cpu.pc = target;
            Flow::Jump(taken)
        } else {
            Flow::Next(not_taken)
        }
    } else {
        let target = resolve(cpu, bus, &desc.operands[0], kind, desc.size);
        cpu.pc = target;
        Flow::Jump(desc.scalar_time())
    }
}

fn call(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Flow {
    if let Timing::Branch { taken, not_taken } = desc.time {
        let take = operand::condition(cpu, &desc.operands[0]);
        let target = operand::read16(cpu, bus, &desc.operands[1]);
        if take {
            let ret_addr = cpu.pc.wrapping_add(desc.size);
            cpu.push16(bus, ret_addr);
            cpu.pc = target;
            Flow::Jump(taken)
        } else {
            Flow::Next(not_taken)
        }
    } else {
        let target = operand::read16(cpu, bus, &desc.operands[0]);
        let ret_addr = cpu.pc.wrapping_add(desc.size);
        cpu.push16(bus, ret_addr);
        cpu.pc = target;
        Flow::Jump(desc.scalar_time())
    }
}

fn ret(cpu: &mut CpuState, bus: &mut Bus, desc: &OpDesc) -> Flow {
    if let Timing::Branch { taken, not_taken } = desc.time {
        if operand::condition(cpu, &desc.operands[0]) {
            cpu.pc = cpu.pop16(bus);
            Flow::Jump(taken)
        } else {
            Flow::Next(not_taken)
        }
    } else {
        cpu.pc = cpu.pop16(bus);
        Flow::Jump(desc.scalar_time())
    }
}
