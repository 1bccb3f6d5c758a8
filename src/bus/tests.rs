use super::*;
use crate::bootrom::BootRom;

fn boot_with(bytes: &[u8]) -> BootRom {
    BootRom::from_bytes(bytes).expect("boot image")
}

fn bus_with(bytes: &[u8]) -> Bus {
    Bus::new(&boot_with(bytes))
}

#[test]
fn boot_image_lands_at_zero() {
    let mut bus = bus_with(&[0x31, 0xFE, 0xFF]);
    assert_eq!(bus.read(0x0000), 0x31);
    assert_eq!(bus.read(0x0001), 0xFE);
    assert_eq!(bus.read(0x0002), 0xFF);
    assert_eq!(bus.read(0x0003), 0x00);
}

#[test]
fn header_area_mirrors_boot_tail() {
    // 256-byte image with recognizable bytes from 0x00A8 on.
    let mut image = vec![0u8; 0x100];
    for (i, b) in image.iter_mut().enumerate().skip(0x00A8) {
        *b = (i & 0xFF) as u8;
    }
    let mut bus = bus_with(&image);
    // boot[0x00A8] appears at 0x0104, and so on to the end of the image.
    assert_eq!(bus.read(0x0104), 0xA8);
    assert_eq!(bus.read(0x0105), 0xA9);
    assert_eq!(bus.read(0x0104 + (0x100 - 0xA8 - 1) as u16), 0xFF);
}

#[test]
fn short_image_has_no_mirror() {
    let mut bus = bus_with(&[0x00; 0x20]);
    assert_eq!(bus.read(0x0104), 0x00);
}

#[test]
fn plain_memory_round_trips() {
    let mut bus = bus_with(&[0x00]);
    bus.write(0xC123, 0xAB);
    assert_eq!(bus.read(0xC123), 0xAB);
    assert_eq!(bus.peek(0xC123), 0xAB);
}

#[test]
fn word_access_is_little_endian() {
    let mut bus = bus_with(&[0x00]);
    bus.write16(0x8000, 0x1234);
    assert_eq!(bus.read(0x8000), 0x34);
    assert_eq!(bus.read(0x8001), 0x12);
    assert_eq!(bus.read16(0x8000), 0x1234);
}

#[test]
fn write_hook_suppresses_backing_store() {
    let mut bus = bus_with(&[0x00]);
    bus.write(0xFF42, 0x55); // SCY, handled by the PPU
    assert_eq!(bus.peek(0xFF42), 0x00); // backing byte untouched
    assert_eq!(bus.read(0xFF42), 0x55); // read hook serves the register
}

#[test]
fn unhandled_port_in_hook_range_falls_through() {
    // 0xFF41 is inside the hooked page but not decoded by the PPU.
    let mut bus = bus_with(&[0x00]);
    bus.write(0xFF41, 0x7E);
    assert_eq!(bus.peek(0xFF41), 0x7E);
    assert_eq!(bus.read(0xFF41), 0x7E);
}

#[test]
fn ly_write_resets_instead_of_storing() {
    let mut bus = bus_with(&[0x00]);
    bus.write(0xFF44, 0x99);
    assert_eq!(bus.read(0xFF44), 0x00);
}

#[test]
fn hook_registration_is_idempotent_and_last_wins() {
    let mut bus = bus_with(&[0x00]);
    // Re-registering the same page must not change behavior.
    bus.add_read_hook(0xFF42, IoTarget::Ppu);
    bus.add_write_hook(0xFF42, IoTarget::Ppu);
    bus.write(0xFF42, 0x11);
    assert_eq!(bus.read(0xFF42), 0x11);
}

#[test]
fn fetcher_advances_independently_of_reads() {
    let mut bus = bus_with(&[0x06, 0xFB, 0x32]);
    bus.fetch_set(0x0000);
    assert_eq!(bus.fetch(), 0x06);
    // Interleaved random reads do not move the fetch index.
    let _ = bus.read(0x1234);
    assert_eq!(bus.fetch(), 0xFB);
    assert_eq!(bus.fetch(), 0x32);
}

#[test]
fn fetch16_is_little_endian() {
    let mut bus = bus_with(&[0x39, 0x55]);
    bus.fetch_set(0x0000);
    assert_eq!(bus.fetch16(), 0x5539);
}

#[test]
fn fetcher_wraps_the_address_space() {
    let mut bus = bus_with(&[0xAA]);
    bus.write(0xFFFF, 0x11);
    bus.fetch_set(0xFFFF);
    assert_eq!(bus.fetch(), 0x11);
    assert_eq!(bus.fetch(), 0xAA); // wrapped to 0x0000
}

#[test]
fn debugger_observes_accesses() {
    use crate::debugger::Debugger;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        reads: Vec<u16>,
        writes: Vec<(u16, u8)>,
        fetches: Vec<(u16, u8)>,
    }

    struct Spy(Rc<RefCell<Log>>);
    impl Debugger for Spy {
        fn on_read(&mut self, addr: u16, _v: u8) {
            self.0.borrow_mut().reads.push(addr);
        }
        fn on_write(&mut self, addr: u16, v: u8) {
            self.0.borrow_mut().writes.push((addr, v));
        }
        fn on_fetch(&mut self, index: u16, b: u8) {
            self.0.borrow_mut().fetches.push((index, b));
        }
    }

    let log = Rc::new(RefCell::new(Log::default()));
    let mut bus = bus_with(&[0x3E, 0x42]);
    bus.attach_debugger(Box::new(Spy(log.clone())));

    bus.write(0xC000, 0x07);
    let _ = bus.read(0xC000);
    bus.fetch_set(0x0000);
    let _ = bus.fetch();

    let log = log.borrow();
    assert_eq!(log.writes, vec![(0xC000, 0x07)]);
    // The fetch goes through read, so both taps fire for it.
    assert_eq!(log.reads, vec![0xC000, 0x0000]);
    assert_eq!(log.fetches, vec![(0x0000, 0x3E)]);
}
