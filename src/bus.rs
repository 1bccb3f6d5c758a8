/*!
Bus abstraction: the flat 64 KiB address space shared by CPU and PPU.

Address map:
- 0x0000-0x00FF: bootstrap ROM (copied in at construction)
- 0x0104-     : mirror of bootstrap bytes 0x00A8.. (cartridge header stand-in)
- 0x8000-0x9FFF: VRAM (tile data + tile maps, plain backing bytes)
- 0xFF40-0xFF4F: LCD register page, routed to the PPU via hook slots
- everything else: plain backing bytes; reads and writes always succeed

Hook model:
- Every address has one read-hook slot and one write-hook slot, stored in
  dense 64 Ki arrays so hot I/O pages dispatch in constant time.
- A slot names a bus-owned device (`IoTarget`); registering over a slot
  overwrites it, so the last registration deterministically wins.
- A read hook returning `Some` overrides the backing byte; a write hook
  reporting handled suppresses the backing store.

The instruction fetcher lives here too: a stateful index advanced by
`fetch`/`fetch16`, distinct from the CPU's PC. Fetches go through `read`, so
hooks and debugger taps observe them.
*/

use std::ops::RangeInclusive;

use crate::bootrom::BootRom;
use crate::debugger::Debugger;
use crate::ppu::Ppu;
use crate::ppu::registers::{PORT_BASE, PORT_LAST};

/// Size of the address space.
pub const MEM_SIZE: usize = 0x1_0000;

/// Offset of the bootstrap bytes mirrored into the header area.
const HEADER_MIRROR_SRC: usize = 0x00A8;
/// Destination of the header mirror.
const HEADER_MIRROR_DST: usize = 0x0104;

/// Devices a hook slot can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoTarget {
    Ppu,
}

pub struct Bus {
    ram: Box<[u8]>,
    pub ppu: Ppu,

    read_hooks: Box<[Option<IoTarget>]>,
    write_hooks: Box<[Option<IoTarget>]>,

    // Instruction fetcher index (distinct from the CPU's PC).
    fetch_index: u16,

    debugger: Option<Box<dyn Debugger>>,
}

impl Bus {
    /// Build the address space: zeroed RAM, bootstrap image at 0x0000, the
    /// header-area mirror, and the PPU register page hooks.
    pub fn new(boot: &BootRom) -> Self {
        let mut ram = vec![0u8; MEM_SIZE].into_boxed_slice();

        let image = boot.bytes();
        ram[..image.len()].copy_from_slice(image);

        // Mirror the tail of the bootstrap into the cartridge header area the
        // boot sequence validates.
        if image.len() > HEADER_MIRROR_SRC {
            let tail = &image[HEADER_MIRROR_SRC..];
            let room = MEM_SIZE - HEADER_MIRROR_DST;
            let n = tail.len().min(room);
            ram[HEADER_MIRROR_DST..HEADER_MIRROR_DST + n].copy_from_slice(&tail[..n]);
        }

        let mut bus = Self {
            ram,
            ppu: Ppu::new(),
            read_hooks: vec![None; MEM_SIZE].into_boxed_slice(),
            write_hooks: vec![None; MEM_SIZE].into_boxed_slice(),
            fetch_index: 0,
            debugger: None,
        };

        bus.add_read_hook_range(PORT_BASE..=PORT_LAST, IoTarget::Ppu);
        bus.add_write_hook_range(PORT_BASE..=PORT_LAST, IoTarget::Ppu);
        bus
    }

    // -----------------------------
    // Hook registration
    // -----------------------------

    pub fn add_read_hook(&mut self, addr: u16, target: IoTarget) {
        self.read_hooks[addr as usize] = Some(target);
    }

    pub fn add_read_hook_range(&mut self, range: RangeInclusive<u16>, target: IoTarget) {
        for addr in range {
            self.read_hooks[addr as usize] = Some(target);
        }
    }

    pub fn add_write_hook(&mut self, addr: u16, target: IoTarget) {
        self.write_hooks[addr as usize] = Some(target);
    }

    pub fn add_write_hook_range(&mut self, range: RangeInclusive<u16>, target: IoTarget) {
        for addr in range {
            self.write_hooks[addr as usize] = Some(target);
        }
    }

    // -----------------------------
    // Byte interface
    // -----------------------------

    /// Hook-aware read. Never fails; unmapped behavior is the backing byte.
    pub fn read(&mut self, addr: u16) -> u8 {
        let backing = self.ram[addr as usize];
        if let Some(dbg) = self.debugger.as_mut() {
            dbg.on_read(addr, backing);
        }

        if let Some(target) = self.read_hooks[addr as usize] {
            let hooked = match target {
                IoTarget::Ppu => self.ppu.io_read(addr),
            };
            if let Some(v) = hooked {
                return v;
            }
        }
        backing
    }

    /// Hook-aware write. A handled hook suppresses the backing store.
    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(dbg) = self.debugger.as_mut() {
            dbg.on_write(addr, value);
        }

        if let Some(target) = self.write_hooks[addr as usize] {
            let handled = match target {
                IoTarget::Ppu => self.ppu.io_write(addr, value),
            };
            if handled {
                return;
            }
        }
        self.ram[addr as usize] = value;
    }

    /// Little-endian 16-bit read; hooks fire per byte.
    pub fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Little-endian 16-bit write; hooks fire per byte.
    pub fn write16(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Backing byte without hooks or debugger taps (inspection only).
    pub fn peek(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    // -----------------------------
    // Instruction fetcher
    // -----------------------------

    /// Point the fetcher at an address.
    pub fn fetch_set(&mut self, addr: u16) {
        self.fetch_index = addr;
    }

    /// Read the byte under the fetcher and post-increment the index.
    pub fn fetch(&mut self) -> u8 {
        let index = self.fetch_index;
        let b = self.read(index);
        if let Some(dbg) = self.debugger.as_mut() {
            dbg.on_fetch(index, b);
        }
        self.fetch_index = index.wrapping_add(1);
        b
    }

    /// Two successive little-endian fetches.
    pub fn fetch16(&mut self) -> u16 {
        let lo = self.fetch() as u16;
        let hi = self.fetch() as u16;
        (hi << 8) | lo
    }

    // -----------------------------
    // GPU integration
    // -----------------------------

    /// Forward a CPU cycle delta to the PPU mode machine.
    pub fn step_ppu(&mut self, cycles: u32) {
        self.ppu.step(cycles, &self.ram);
    }

    // -----------------------------
    // Debugger attachment
    // -----------------------------

    pub fn attach_debugger(&mut self, dbg: Box<dyn Debugger>) {
        self.debugger = Some(dbg);
    }

    pub fn detach_debugger(&mut self) -> Option<Box<dyn Debugger>> {
        self.debugger.take()
    }

    pub(crate) fn debugger_mut(&mut self) -> Option<&mut Box<dyn Debugger>> {
        self.debugger.as_mut()
    }
}

#[cfg(test)]
mod tests;
