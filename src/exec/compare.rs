//! `eq`, `gt` — the two comparison opcodes, each writing a boolean 0/1.

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;
use crate::value;

pub fn eq(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    value::write(&mut machine.registers, operands[0], (b == c) as u16)?;
    Ok(ControlFlow::Advance)
}

pub fn gt(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    value::write(&mut machine.registers, operands[0], (b > c) as u16)?;
    Ok(ControlFlow::Advance)
}
