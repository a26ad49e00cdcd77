//! Reads a binary program image into the machine's initial memory.

use std::path::Path;

use crate::error::VmFault;
use crate::machine::Machine;
use crate::memory::MEMORY_SIZE;

/// Loads a little-endian 16-bit word image from `path`, zero-filling the
/// remainder of the address space. An odd-length file has its final byte
/// treated as the low byte of one more word, high byte zero.
pub fn load_image(path: &Path) -> Result<Machine, VmFault> {
    let bytes = std::fs::read(path).map_err(|source| VmFault::ImageRead {
        path: path.display().to_string(),
        source,
    })?;

    let mut words = Vec::with_capacity(bytes.len().div_ceil(2).min(MEMORY_SIZE));
    let mut chunks = bytes.chunks_exact(2);
    for chunk in &mut chunks {
        words.push(u16::from_le_bytes([chunk[0], chunk[1]]));
    }
    if let [last] = *chunks.remainder() {
        words.push(u16::from_le_bytes([last, 0]));
    }

    Machine::with_image(&words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_words_and_pads_with_zero() {
        let path = std::env::temp_dir().join(format!("vm16-loader-test-{}.bin", std::process::id()));
        std::fs::write(&path, [0x13, 0x00, 0x48, 0x00]).unwrap();
        let machine = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(machine.memory.read(0), 19);
        assert_eq!(machine.memory.read(1), 0x48);
        assert_eq!(machine.memory.read(2), 0);
        assert_eq!(machine.pc, 0);
    }

    #[test]
    fn missing_file_is_an_image_read_fault() {
        let path = Path::new("/nonexistent/vm16-image-that-does-not-exist.bin");
        assert!(matches!(load_image(path), Err(VmFault::ImageRead { .. })));
    }

    #[test]
    fn oversized_image_is_a_memory_too_large_fault_not_a_panic() {
        let path = std::env::temp_dir().join(format!("vm16-loader-oversized-{}.bin", std::process::id()));
        std::fs::write(&path, vec![0u8; (MEMORY_SIZE + 1) * 2]).unwrap();
        let result = load_image(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(VmFault::MemoryTooLarge { .. })));
    }
}
