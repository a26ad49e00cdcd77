//! Fixed filesystem locations the engine reads and writes. The snapshot
//! and disassembly dump are each keyed to one path; concurrent access is
//! not supported.

/// Save-state artifact read by `--resume` and written by the debugger's
/// `S` command.
pub const SNAPSHOT_PATH: &str = "vm16.snapshot";

/// Full-memory disassembly written by the debugger's `D` command.
pub const DUMP_PATH: &str = "vm16-dump.txt";

/// Warnings and errors only; the debugger owns the terminal, so logs
/// cannot share stdout with it.
pub const LOG_PATH: &str = "vm16.log";
