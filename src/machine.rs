/*!
Machine facade: one CPU, one bus (which owns the PPU), stepped in lockstep.

Control flow per step: `cpu.step` decodes and executes one instruction
through the bus, returning its cycle cost; that cost is forwarded to the PPU
mode machine. Steps are atomic - a fault surfaces before any partial state
is observable to the caller, and the register file stays available for a
diagnostic dump.

The front end owns wall-clock pacing; nothing here sleeps or blocks.
*/

use crate::bootrom::BootRom;
use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::debugger::Debugger;
use crate::error::CoreError;

pub struct Machine {
    cpu: Cpu,
    bus: Bus,
}

impl Machine {
    /// Construct the machine: validated CPU decoder plus an address space
    /// seeded from the bootstrap image.
    pub fn new(boot: &BootRom) -> Result<Self, CoreError> {
        Ok(Self {
            cpu: Cpu::new()?,
            bus: Bus::new(boot),
        })
    }

    /// Attach a debugger; its callbacks fire synchronously inside steps.
    pub fn attach_debugger(&mut self, mut dbg: Box<dyn Debugger>) {
        dbg.on_start();
        self.bus.attach_debugger(dbg);
    }

    pub fn detach_debugger(&mut self) -> Option<Box<dyn Debugger>> {
        self.bus.detach_debugger()
    }

    /// Execute one instruction and advance the PPU by its cycle cost.
    pub fn step(&mut self) -> Result<u32, CoreError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.bus.step_ppu(cycles);
        Ok(cycles)
    }

    /// Run `max_instructions` steps, stopping early on a fault.
    pub fn run(&mut self, max_instructions: usize) -> Result<(), CoreError> {
        for _ in 0..max_instructions {
            self.step()?;
        }
        Ok(())
    }

    /// Step until the PPU completes a frame. `max_instructions` bounds the
    /// loop so a program that never enables the LCD cannot spin forever.
    pub fn run_frame(&mut self, max_instructions: usize) -> Result<bool, CoreError> {
        for _ in 0..max_instructions {
            self.step()?;
            if self.bus.ppu.take_frame_complete() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}
