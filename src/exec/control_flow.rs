//! `halt`, `jmp`, `jnz`, `jz`, `call`, `ret` — the opcodes that assign the
//! program counter themselves rather than falling through.

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::value;

pub fn halt(
    _machine: &mut Machine,
    _operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    Ok(ControlFlow::Halt)
}

pub fn jmp(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let target = value::read(&machine.registers, operands[0])?;
    Ok(ControlFlow::Jump(target))
}

pub fn jnz(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let condition = value::read(&machine.registers, operands[0])?;
    if condition != 0 {
        let target = value::read(&machine.registers, operands[1])?;
        Ok(ControlFlow::Jump(target))
    } else {
        Ok(ControlFlow::Advance)
    }
}

pub fn jz(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let condition = value::read(&machine.registers, operands[0])?;
    if condition == 0 {
        let target = value::read(&machine.registers, operands[1])?;
        Ok(ControlFlow::Jump(target))
    } else {
        Ok(ControlFlow::Advance)
    }
}

pub fn call(
    machine: &mut Machine,
    operands: &[u16],
    pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let target = value::read(&machine.registers, operands[0])?;
    machine.push(pc.wrapping_add(1 + Opcode::Call.arity()));
    Ok(ControlFlow::Jump(target))
}

pub fn ret(
    machine: &mut Machine,
    _operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let target = machine.pop("ret")?;
    Ok(ControlFlow::Jump(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedIo;

    #[test]
    fn jnz_jumps_only_on_nonzero() {
        let mut machine = Machine::new();
        let mut host = ScriptedIo::default();
        assert!(matches!(
            jnz(&mut machine, &[0, 77], 0, &mut host).unwrap(),
            ControlFlow::Advance
        ));
        assert!(matches!(
            jnz(&mut machine, &[1, 77], 0, &mut host).unwrap(),
            ControlFlow::Jump(77)
        ));
    }

    #[test]
    fn call_pushes_the_return_address_after_the_instruction() {
        let mut machine = Machine::new();
        let mut host = ScriptedIo::default();
        let result = call(&mut machine, &[500], 10, &mut host).unwrap();
        assert!(matches!(result, ControlFlow::Jump(500)));
        assert_eq!(machine.stack, vec![12]);
    }

    #[test]
    fn ret_on_empty_stack_faults() {
        let mut machine = Machine::new();
        let mut host = ScriptedIo::default();
        assert!(matches!(
            ret(&mut machine, &[], 0, &mut host),
            Err(VmFault::StackUnderflow { operation: "ret" })
        ));
    }
}
