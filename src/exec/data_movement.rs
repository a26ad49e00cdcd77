//! `set`, `push`, `pop`, `rmem`, `wmem` — moving values between registers,
//! the stack, and memory.

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;
use crate::value;

pub fn set(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let value = value::read(&machine.registers, operands[1])?;
    value::write(&mut machine.registers, operands[0], value)?;
    Ok(ControlFlow::Advance)
}

pub fn push(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let value = value::read(&machine.registers, operands[0])?;
    machine.push(value);
    Ok(ControlFlow::Advance)
}

pub fn pop(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let value = machine.pop("pop")?;
    value::write(&mut machine.registers, operands[0], value)?;
    Ok(ControlFlow::Advance)
}

pub fn rmem(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let address = value::read(&machine.registers, operands[1])?;
    let value = machine.memory.read_checked(address as u32)?;
    value::write(&mut machine.registers, operands[0], value)?;
    Ok(ControlFlow::Advance)
}

pub fn wmem(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let address = value::read(&machine.registers, operands[0])?;
    let value = value::read(&machine.registers, operands[1])?;
    machine.memory.write_checked(address as u32, value)?;
    Ok(ControlFlow::Advance)
}
