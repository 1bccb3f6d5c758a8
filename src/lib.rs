#![doc = r#"
dmg library crate.

This crate exposes the emulator core modules for use by binaries and tests.

Modules:
- alu: pure 8/16-bit arithmetic with half-carry/carry/zero facts
- bootrom: bootstrap ROM image loader
- bus: 64 KiB address space, MMIO hook slots, instruction fetcher
- cpu: LR35902 register state, declarative opcode table, dispatch
- debugger: collaborator callback trait plus a tracing implementation
- error: construction-time and run-time fault taxonomy
- machine: CPU + bus + PPU stepped in lockstep
- ppu: scanline mode machine, LCD registers, background renderer

In tests, shared program builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod alu;
pub mod bootrom;
pub mod bus;
pub mod cpu;
pub mod debugger;
pub mod error;
pub mod machine;
pub mod ppu;

// Re-export commonly used types at the crate root for convenience.
pub use bootrom::BootRom;
pub use bus::Bus;
pub use cpu::Cpu;
pub use error::CoreError;
pub use machine::Machine;
pub use ppu::Ppu;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
