//! `out` and `in` — the only two opcodes that touch the host. `in` is also
//! the debugger's entry point, so its handling defers almost entirely to
//! [`crate::host::HostIo`].

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::{HostIo, InputOutcome};
use crate::machine::Machine;
use crate::value;

pub fn out(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let value = value::read(&machine.registers, operands[0])?;
    host.output(value as u8)?;
    Ok(ControlFlow::Advance)
}

pub fn input(
    machine: &mut Machine,
    operands: &[u16],
    pc: u16,
    host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    match host.input(machine)? {
        InputOutcome::Deliver(byte) => {
            value::write(&mut machine.registers, operands[0], byte as u16)?;
            Ok(ControlFlow::Advance)
        }
        InputOutcome::Halt => Ok(ControlFlow::Halt),
        InputOutcome::Retry => Ok(ControlFlow::Jump(pc)),
        InputOutcome::Resume(resumed) => {
            *machine = *resumed;
            Ok(ControlFlow::Jump(machine.pc))
        }
    }
}
