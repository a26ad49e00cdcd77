//! The seam between the engine and whatever is driving program I/O.
//!
//! The `in` opcode is the single point where program input and debugger
//! commands are multiplexed (see the debugger module), so the engine talks
//! to an abstract [`HostIo`] instead of stdin/stdout directly. A plain
//! scripted host (used by tests and non-interactive runs) and the
//! terminal debugger both implement this trait.

use crate::error::VmFault;
use crate::machine::Machine;

/// What the engine should do after a host has handled one `in` opcode.
pub enum InputOutcome {
    /// Deliver this character code to the program via the instruction's
    /// destination operand.
    Deliver(u8),
    /// Halt the VM (the `Q` debugger command).
    Halt,
    /// Re-execute the same `in` instruction without consuming input (the
    /// `D` and `S` debugger commands: they act and then retry).
    Retry,
    /// Replace the entire machine state and resume at its PC (the `L`
    /// debugger command).
    Resume(Box<Machine>),
}

/// What the engine should do after a host's per-instruction hook runs.
/// Used for step mode: every other host is a no-op here.
pub enum StepOutcome {
    Continue,
    Halt,
}

/// Abstracts program I/O and the debugger's input multiplexing away from
/// the engine.
pub trait HostIo {
    /// Called once per instruction, before fetch, so the debugger can
    /// refresh its panels and block in step mode. Non-debugging hosts
    /// return `Continue` unconditionally.
    fn before_instruction(&mut self, machine: &Machine) -> Result<StepOutcome, VmFault>;

    /// Emits one output character (the `out` opcode).
    fn output(&mut self, byte: u8) -> Result<(), VmFault>;

    /// Resolves one `in` opcode's worth of input.
    fn input(&mut self, machine: &Machine) -> Result<InputOutcome, VmFault>;
}

/// A non-interactive host for scripted runs and tests: output is
/// accumulated in a buffer, input is drained from a fixed queue, and
/// reading past the end of that queue is the input-exhausted fault
/// required by the ISA.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    pub output: Vec<u8>,
    input: std::collections::VecDeque<u8>,
}

impl ScriptedIo {
    pub fn new(input: impl IntoIterator<Item = u8>) -> Self {
        Self {
            output: Vec::new(),
            input: input.into_iter().collect(),
        }
    }
}

impl HostIo for ScriptedIo {
    fn before_instruction(&mut self, _machine: &Machine) -> Result<StepOutcome, VmFault> {
        Ok(StepOutcome::Continue)
    }

    fn output(&mut self, byte: u8) -> Result<(), VmFault> {
        self.output.push(byte);
        Ok(())
    }

    fn input(&mut self, _machine: &Machine) -> Result<InputOutcome, VmFault> {
        match self.input.pop_front() {
            Some(byte) => Ok(InputOutcome::Deliver(byte)),
            None => Err(VmFault::InputExhausted),
        }
    }
}
