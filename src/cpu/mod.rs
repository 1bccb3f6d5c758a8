/*!
CPU module map:
    state    - architectural registers, flags, control latches
    table    - declarative opcode table + validated decode index
    operand  - tagged operand variants and their evaluator
    dispatch - step orchestrator and per-family instruction handlers

`Cpu` is the public facade: it owns the register state and the validated
decoder, and `step` runs exactly one decode-dispatch cycle, returning the
cycle cost the front end forwards to the GPU.
*/

pub mod dispatch;
pub mod operand;
pub mod state;
pub mod table;

use crate::bus::Bus;
use crate::error::CoreError;
use state::CpuState;
use table::Decoder;

pub struct Cpu {
    state: CpuState,
    decoder: Decoder,
}

impl Cpu {
    /// Construct a CPU with power-up register state and a validated decode
    /// index. Opcode-table validation failure is fatal here.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            state: CpuState::new(),
            decoder: Decoder::new()?,
        })
    }

    /// Immutable view of the register state (inspection / diagnostics).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Mutable register state (tests, front-end pokes).
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Cycle counter.
    pub fn time(&self) -> u64 {
        self.state.time
    }

    /// Execute one instruction and return the cycles consumed.
    ///
    /// Fatal faults (bad opcode, reserved instruction) leave the register
    /// state untouched for a diagnostic dump.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32, CoreError> {
        if let Some(dbg) = bus.debugger_mut() {
            dbg.before_exec(&self.state);
        }
        let cycles = dispatch::step(&mut self.state, bus, &self.decoder)?;
        if let Some(dbg) = bus.debugger_mut() {
            dbg.after_exec(&self.state);
        }
        Ok(cycles)
    }

    /// Run up to `max_instructions`, stopping early on a fault.
    pub fn run(&mut self, bus: &mut Bus, max_instructions: usize) -> Result<(), CoreError> {
        for _ in 0..max_instructions {
            self.step(bus)?;
        }
        Ok(())
    }
}
