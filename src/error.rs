/*!
Error taxonomy for the emulator core.

Two kinds of failure exist:
- Construction-time: the bootstrap image cannot be read, or the declarative
  opcode table fails validation. These prevent the machine from starting.
- Run-time: the decoder reached an opcode with no table entry, or one of the
  reserved instructions (SLA/SRA/SRL/DAA). These stop the machine cleanly;
  the caller still holds the CPU state for a register dump.

Memory accesses, ALU operations, and GPU steps are infallible by construction
and have no variants here.
*/

use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    /// The bootstrap ROM image could not be loaded.
    BootRomLoad { path: String, reason: String },
    /// The declarative opcode table failed validation at construction.
    OpcodeTable(String),
    /// The decoder fetched an opcode with no table entry. Fatal, not retried.
    UndecodedOpcode { opcode: u16, pc: u16 },
    /// A reserved instruction (SLA/SRA/SRL/DAA) was reached. Fatal, not retried.
    Unimplemented {
        mnemonic: &'static str,
        opcode: u16,
        pc: u16,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::BootRomLoad { path, reason } => {
                write!(f, "cannot load bootstrap rom '{path}': {reason}")
            }
            CoreError::OpcodeTable(msg) => write!(f, "opcode table invalid: {msg}"),
            CoreError::UndecodedOpcode { opcode, pc } => {
                write!(f, "bad opcode {opcode:#06x} at pc {pc:#06x}")
            }
            CoreError::Unimplemented {
                mnemonic,
                opcode,
                pc,
            } => {
                write!(
                    f,
                    "unimplemented instruction '{mnemonic}' ({opcode:#06x}) at pc {pc:#06x}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_labels_reserved_instructions() {
        let e = CoreError::Unimplemented {
            mnemonic: "daa",
            opcode: 0x27,
            pc: 0x0150,
        };
        let s = e.to_string();
        assert!(s.contains("unimplemented"));
        assert!(s.contains("daa"));
        assert!(s.contains("0x0150"));
    }

    #[test]
    fn display_labels_bad_opcode() {
        let e = CoreError::UndecodedOpcode {
            opcode: 0xD3,
            pc: 0x0002,
        };
        assert!(e.to_string().contains("bad opcode"));
    }
}
