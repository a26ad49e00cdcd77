//! Durable save-state format: `(registers, stack, PC, memory)`, with an
//! explicit magic number and version so a stray file is rejected instead
//! of silently misread.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VmFault;
use crate::machine::Machine;
use crate::memory::Memory;
use crate::value::Registers;

const MAGIC: u32 = 0x564D_3136; // "VM16"
const VERSION: u16 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    magic: u32,
    version: u16,
    registers: [u16; 8],
    stack: Vec<u16>,
    pc: u16,
    memory: Vec<u16>,
}

impl Snapshot {
    fn from_machine(machine: &Machine) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            registers: machine
                .registers
                .as_slice()
                .try_into()
                .expect("registers is always exactly 8 words"),
            stack: machine.stack.clone(),
            pc: machine.pc,
            memory: machine.memory.as_slice().to_vec(),
        }
    }

    fn into_machine(self) -> Result<Machine, VmFault> {
        Ok(Machine {
            registers: Registers::from_slice(&self.registers),
            stack: self.stack,
            memory: Memory::from_words(&self.memory)?,
            pc: self.pc,
        })
    }
}

/// Serializes `machine`'s full state to `path`, replacing any existing
/// contents.
pub fn save(path: &Path, machine: &Machine) -> Result<(), VmFault> {
    let snapshot = Snapshot::from_machine(machine);
    let bytes = bincode::serialize(&snapshot).map_err(|source| VmFault::SnapshotDecode {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, bytes).map_err(|source| VmFault::SnapshotWrite {
        path: path.display().to_string(),
        source,
    })
}

/// Loads a full machine state from `path`, replacing the caller's state
/// atomically (the caller swaps in the returned value wholesale).
pub fn load(path: &Path) -> Result<Machine, VmFault> {
    let bytes = std::fs::read(path).map_err(|source| VmFault::SnapshotRead {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot: Snapshot =
        bincode::deserialize(&bytes).map_err(|source| VmFault::SnapshotDecode {
            path: path.display().to_string(),
            source,
        })?;
    snapshot.into_machine()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips_exactly() {
        let path = std::env::temp_dir().join(format!("vm16-snapshot-test-{}.bin", std::process::id()));

        let mut machine = Machine::with_image(&[1, 32768, 4, 2, 32768, 0]).unwrap();
        machine.registers.set(2, 99);
        machine.stack.push(7);
        machine.pc = 3;

        save(&path, &machine).unwrap();
        let restored = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored.registers, machine.registers);
        assert_eq!(restored.stack, machine.stack);
        assert_eq!(restored.pc, machine.pc);
        assert_eq!(restored.memory.as_slice(), machine.memory.as_slice());
    }

    #[test]
    fn loading_a_missing_file_is_a_snapshot_read_fault() {
        let path = Path::new("/nonexistent/vm16-snapshot-that-does-not-exist.bin");
        assert!(matches!(load(path), Err(VmFault::SnapshotRead { .. })));
    }

    #[test]
    fn oversized_memory_field_is_a_fault_not_a_panic() {
        let tampered = Snapshot {
            magic: MAGIC,
            version: VERSION,
            registers: [0; 8],
            stack: Vec::new(),
            pc: 0,
            memory: vec![0u16; crate::memory::MEMORY_SIZE + 1],
        };
        assert!(matches!(
            tampered.into_machine(),
            Err(VmFault::MemoryTooLarge { .. })
        ));
    }
}
