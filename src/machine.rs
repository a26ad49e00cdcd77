//! The registers, stack, memory and program counter, plus the
//! fetch-decode-execute cycle that drives them.

use crate::error::VmFault;
use crate::exec::{self, ControlFlow};
use crate::host::HostIo;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::value::Registers;

/// Outcome of running one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Running,
    Halted,
}

/// Full machine state: the eight registers, the unbounded stack, the flat
/// memory, and the program counter. A fault anywhere in [`Machine::step`]
/// is terminal; nothing here attempts to roll back partial effects.
#[derive(Debug, Clone)]
pub struct Machine {
    pub registers: Registers,
    pub stack: Vec<u16>,
    pub memory: Memory,
    pub pc: u16,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
            stack: Vec::new(),
            memory: Memory::new(),
            pc: 0,
        }
    }

    /// Loads a program image as the initial memory contents, with the
    /// program counter at address zero. Faults if `words` is longer than
    /// the address space.
    pub fn with_image(words: &[u16]) -> Result<Self, VmFault> {
        Ok(Self {
            registers: Registers::new(),
            stack: Vec::new(),
            memory: Memory::from_words(words)?,
            pc: 0,
        })
    }

    /// Fetches the opcode and its operands at the current program counter,
    /// advancing nothing yet — [`Machine::execute`] decides how the PC
    /// moves once the instruction has run.
    fn fetch(&self) -> Result<(Opcode, [u16; 3]), VmFault> {
        let raw = self.memory.read(self.pc);
        let opcode = Opcode::decode(raw).ok_or(VmFault::UnsupportedOpcode {
            opcode: raw,
            address: self.pc as usize,
        })?;

        let mut operands = [0u16; 3];
        for (i, slot) in operands.iter_mut().take(opcode.arity() as usize).enumerate() {
            *slot = self.memory.read(self.pc.wrapping_add(1 + i as u16));
        }
        Ok((opcode, operands))
    }

    /// Runs one fetch-decode-execute cycle: fetch the instruction at `pc`,
    /// dispatch it through the handler table, and apply the resulting
    /// control-flow effect to `pc`.
    pub fn step(&mut self, host: &mut dyn HostIo) -> Result<StepResult, VmFault> {
        if let crate::host::StepOutcome::Halt = host.before_instruction(self)? {
            return Ok(StepResult::Halted);
        }

        let instruction_pc = self.pc;
        let (opcode, operands) = self.fetch()?;
        let operands = &operands[..opcode.arity() as usize];

        match exec::dispatch(opcode, self, operands, instruction_pc, host)? {
            ControlFlow::Advance => {
                self.pc = instruction_pc.wrapping_add(1 + opcode.arity());
                Ok(StepResult::Running)
            }
            ControlFlow::Jump(address) => {
                self.pc = address;
                Ok(StepResult::Running)
            }
            ControlFlow::Halt => Ok(StepResult::Halted),
        }
    }

    pub fn push(&mut self, value: u16) {
        self.stack.push(value);
    }

    pub fn pop(&mut self, operation: &'static str) -> Result<u16, VmFault> {
        self.stack.pop().ok_or(VmFault::StackUnderflow { operation })
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedIo;

    fn run_to_halt(machine: &mut Machine, host: &mut dyn HostIo) {
        loop {
            match machine.step(host).unwrap() {
                StepResult::Running => continue,
                StepResult::Halted => break,
            }
        }
    }

    #[test]
    fn halt_stops_the_engine_immediately() {
        let mut machine = Machine::with_image(&[0]).unwrap();
        let mut host = ScriptedIo::default();
        assert_eq!(machine.step(&mut host).unwrap(), StepResult::Halted);
    }

    #[test]
    fn unsupported_opcode_is_a_fault() {
        let mut machine = Machine::with_image(&[999]).unwrap();
        let mut host = ScriptedIo::default();
        assert!(matches!(
            machine.step(&mut host),
            Err(VmFault::UnsupportedOpcode { opcode: 999, address: 0 })
        ));
    }

    #[test]
    fn out_prints_register_value_as_ascii() {
        // out 65 ; halt
        let mut machine = Machine::with_image(&[19, 65, 0]).unwrap();
        let mut host = ScriptedIo::default();
        run_to_halt(&mut machine, &mut host);
        assert_eq!(host.output, vec![b'A']);
    }

    #[test]
    fn set_add_and_out_compose_correctly() {
        // set r0 4; set r1 5; add r2 r0 r1; out r2; halt
        let mut machine = Machine::with_image(&[
            1, 32768, 4, // set r0 4
            1, 32769, 5, // set r1 5
            9, 32770, 32768, 32769, // add r2 r0 r1
            19, 32770, // out r2
            0,
        ])
        .unwrap();
        let mut host = ScriptedIo::default();
        run_to_halt(&mut machine, &mut host);
        assert_eq!(host.output, vec![9]);
    }
}
