//! Fault taxonomy for the virtual machine.
//!
//! Every fault is terminal: the engine does not attempt to recover from any
//! of these, it logs one record and the process exits (see [`crate::cli`]).

use thiserror::Error;

/// A fatal condition raised while decoding or executing an instruction, or
/// while moving state in or out of the machine.
#[derive(Error, Debug)]
pub enum VmFault {
    #[error("unsupported opcode {opcode} at address {address:#06x}")]
    UnsupportedOpcode { opcode: u16, address: usize },

    #[error("invalid value handle {handle:#06x}")]
    InvalidValueHandle { handle: u16 },

    #[error("write to literal destination {destination:#06x}")]
    WriteToLiteral { destination: u16 },

    #[error("memory access out of range at address {address:#06x}")]
    OutOfRangeAccess { address: u32 },

    #[error("stack underflow on {operation}")]
    StackUnderflow { operation: &'static str },

    #[error("mod by zero")]
    DivisionByZero,

    #[error("memory image is {word_count} words, exceeds the {limit}-word address space")]
    MemoryTooLarge { word_count: usize, limit: usize },

    #[error("input exhausted")]
    InputExhausted,

    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path} is corrupt: {source}")]
    SnapshotDecode {
        path: String,
        #[source]
        source: Box<bincode::ErrorKind>,
    },

    #[error("failed to write disassembly dump {path}: {source}")]
    DumpWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal I/O error: {0}")]
    Terminal(#[source] std::io::Error),
}
