//! `nop` — does nothing.

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;

pub fn nop(
    _machine: &mut Machine,
    _operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    Ok(ControlFlow::Advance)
}
