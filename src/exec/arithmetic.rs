//! `add`, `mult`, `mod`, `and`, `or`, `not` — all modulo-0x8000 or bitwise
//! over 15-bit operands.

use super::ControlFlow;
use crate::error::VmFault;
use crate::host::HostIo;
use crate::machine::Machine;
use crate::value::{self, REGISTER_BASE};

pub fn add(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    let result = (b as u32 + c as u32) % REGISTER_BASE as u32;
    value::write(&mut machine.registers, operands[0], result as u16)?;
    Ok(ControlFlow::Advance)
}

pub fn mult(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    let result = (b as u32 * c as u32) % REGISTER_BASE as u32;
    value::write(&mut machine.registers, operands[0], result as u16)?;
    Ok(ControlFlow::Advance)
}

pub fn modulo(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    if c == 0 {
        return Err(VmFault::DivisionByZero);
    }
    value::write(&mut machine.registers, operands[0], b % c)?;
    Ok(ControlFlow::Advance)
}

pub fn and(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    value::write(&mut machine.registers, operands[0], b & c)?;
    Ok(ControlFlow::Advance)
}

pub fn or(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let c = value::read(&machine.registers, operands[2])?;
    value::write(&mut machine.registers, operands[0], b | c)?;
    Ok(ControlFlow::Advance)
}

pub fn not(
    machine: &mut Machine,
    operands: &[u16],
    _pc: u16,
    _host: &mut dyn HostIo,
) -> Result<ControlFlow, VmFault> {
    let b = value::read(&machine.registers, operands[1])?;
    let result = (!b) & 0x7FFF;
    value::write(&mut machine.registers, operands[0], result)?;
    Ok(ControlFlow::Advance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedIo;

    fn host() -> ScriptedIo {
        ScriptedIo::default()
    }

    #[test]
    fn add_wraps_at_fifteen_bits() {
        let mut machine = Machine::new();
        add(&mut machine, &[0x8000, 32767, 1], 0, &mut host()).unwrap();
        assert_eq!(machine.registers.get(0), 0);
    }

    #[test]
    fn mult_matches_the_isa_example() {
        let mut machine = Machine::new();
        mult(&mut machine, &[0x8000, 181, 181], 0, &mut host()).unwrap();
        assert_eq!(machine.registers.get(0), 32761);
    }

    #[test]
    fn mod_by_zero_faults() {
        let mut machine = Machine::new();
        assert!(matches!(
            modulo(&mut machine, &[0x8000, 5, 0], 0, &mut host()),
            Err(VmFault::DivisionByZero)
        ));
    }

    #[test]
    fn not_complements_over_fifteen_bits() {
        let mut machine = Machine::new();
        not(&mut machine, &[0x8000, 0], 0, &mut host()).unwrap();
        assert_eq!(machine.registers.get(0), 32767);
        not(&mut machine, &[0x8001, 32767], 0, &mut host()).unwrap();
        assert_eq!(machine.registers.get(1), 0);
    }
}
