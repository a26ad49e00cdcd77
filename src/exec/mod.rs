//! Instruction execution, split by category the way the ISA's own table
//! groups them. Each handler resolves its operands through [`crate::value`]
//! and reports back a [`ControlFlow`]; the handler table at the bottom of
//! this module is the single dispatch point the engine calls into — an
//! array index keyed on the opcode's discriminant, not a match spread
//! across the whole instruction set.

mod arithmetic;
mod compare;
mod control_flow;
mod data_movement;
mod io;
mod system;

use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;
use crate::opcode::Opcode;

/// What the engine should do once a handler has run.
pub enum ControlFlow {
    /// Move the program counter past this instruction as usual.
    Advance,
    /// Set the program counter to this address.
    Jump(u16),
    /// Stop the engine.
    Halt,
}

type Handler = fn(&mut Machine, &[u16], u16, &mut dyn HostIo) -> Result<ControlFlow, VmFault>;

/// One entry per opcode, in declaration order, so that `Opcode as usize`
/// indexes straight into it.
const HANDLERS: [Handler; 22] = [
    control_flow::halt,
    data_movement::set,
    data_movement::push,
    data_movement::pop,
    compare::eq,
    compare::gt,
    control_flow::jmp,
    control_flow::jnz,
    control_flow::jz,
    arithmetic::add,
    arithmetic::mult,
    arithmetic::modulo,
    arithmetic::and,
    arithmetic::or,
    arithmetic::not,
    data_movement::rmem,
    data_movement::wmem,
    control_flow::call,
    control_flow::ret,
    io::out,
    io::input,
    system::nop,
];

/// Runs the handler for `opcode` against `operands`. `instruction_pc` is
/// the address the instruction was fetched from, needed by `call` to
/// compute its return address independently of the engine's own PC
/// bookkeeping.
pub fn dispatch(
    opcode: Opcode,
    machine: &mut Machine,
    operands: &[u16],
    instruction_pc: u16,
    host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    HANDLERS[opcode as usize](machine, operands, instruction_pc, host)
}
