/*!
Bootstrap ROM loader.

The bootstrap image is the small program mapped at 0x0000 at power-on. It is
opaque to the core: the loader only checks that the image exists, is not
empty, and fits the 64 KiB address space. Placement (including the cartridge
header mirror) is the bus constructor's job.
*/

use std::fs;
use std::path::Path;

use crate::error::CoreError;

/// Size of the address space a bootstrap image must fit into.
pub const MAX_IMAGE_LEN: usize = 0x1_0000;

#[derive(Debug, Clone)]
pub struct BootRom {
    data: Vec<u8>,
}

impl BootRom {
    /// Wrap an in-memory bootstrap image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::BootRomLoad {
                path: "<bytes>".into(),
                reason: "image is empty".into(),
            });
        }
        if data.len() > MAX_IMAGE_LEN {
            return Err(CoreError::BootRomLoad {
                path: "<bytes>".into(),
                reason: format!("image is {} bytes, max is {}", data.len(), MAX_IMAGE_LEN),
            });
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Load a bootstrap image from disk. Fatal at construction time on failure.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let display = path.as_ref().display().to_string();
        let data = fs::read(&path).map_err(|e| CoreError::BootRomLoad {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(&data).map_err(|e| match e {
            CoreError::BootRomLoad { reason, .. } => CoreError::BootRomLoad {
                path: display.clone(),
                reason,
            },
            other => other,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_image() {
        assert!(BootRom::from_bytes(&[]).is_err());
    }

    #[test]
    fn rejects_oversized_image() {
        let img = vec![0u8; MAX_IMAGE_LEN + 1];
        assert!(BootRom::from_bytes(&img).is_err());
    }

    #[test]
    fn accepts_typical_image() {
        let img = vec![0x31u8; 0x100];
        let rom = BootRom::from_bytes(&img).expect("load");
        assert_eq!(rom.len(), 0x100);
        assert_eq!(rom.bytes()[0], 0x31);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = BootRom::load_from_file("/nonexistent/boot.bin").unwrap_err();
        assert!(err.to_string().contains("bootstrap"));
    }
}
