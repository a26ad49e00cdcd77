//! Linear, non-control-flow-aware disassembly: walk memory word by word,
//! emitting one line per decoded instruction (or raw word, for anything
//! that doesn't decode) and advancing past its operands.

use std::fmt::Write as _;

use crate::memory::{Memory, MEMORY_SIZE};
use crate::opcode::Opcode;
use crate::value::{REGISTER_BASE, REGISTER_LIMIT};

/// One disassembled line: the address it starts at, plus the rendered
/// mnemonic and operands (or the raw word, for unknown opcodes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub text: String,
}

fn render_operand(word: u16) -> String {
    if (REGISTER_BASE..REGISTER_LIMIT).contains(&word) {
        format!("R{}", word - REGISTER_BASE)
    } else {
        word.to_string()
    }
}

/// Disassembles up to `count` words starting at `start`, stopping early at
/// the end of the address space.
pub fn disassemble(memory: &Memory, start: u16, count: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pos = start as usize;
    let end = (start as usize + count).min(MEMORY_SIZE);

    while pos < end {
        let raw = memory.read(pos as u16);
        match Opcode::decode(raw) {
            Some(opcode) => {
                let arity = opcode.arity() as usize;
                let mut text = opcode.mnemonic().to_string();
                for offset in 1..=arity {
                    let operand_pos = pos + offset;
                    if operand_pos >= MEMORY_SIZE {
                        break;
                    }
                    let _ = write!(text, " {}", render_operand(memory.read(operand_pos as u16)));
                }
                lines.push(Line {
                    address: pos as u16,
                    text,
                });
                pos += 1 + arity;
            }
            None => {
                lines.push(Line {
                    address: pos as u16,
                    text: raw.to_string(),
                });
                pos += 1;
            }
        }
    }

    lines
}

/// Renders a full-memory dump in the `addr :: mnemonic operand-list`
/// format used both by the debugger's disassembly panel and by the `D`
/// command's dump artifact.
pub fn format_lines(lines: &[Line]) -> String {
    let mut output = String::new();
    for line in lines {
        let _ = writeln!(output, "{:05} :: {}", line.address, line.text);
    }
    output
}

/// The window the debugger's disassembly panel shows: `width` words
/// centered on `pc`, starting 40 words earlier when possible and clamped
/// to the start of the address space.
pub fn window_around(memory: &Memory, pc: u16, width: usize) -> Vec<Line> {
    let start = pc.saturating_sub(40);
    disassemble(memory, start, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mnemonics_and_register_operands() {
        let memory = Memory::from_words(&[9, 32768, 32768, 5, 0]).unwrap();
        let lines = disassemble(&memory, 0, 5);
        assert_eq!(lines[0].text, "add R0 R0 5");
        assert_eq!(lines[1].text, "halt");
    }

    #[test]
    fn unknown_opcodes_render_as_raw_words() {
        let memory = Memory::from_words(&[9999]).unwrap();
        let lines = disassemble(&memory, 0, 1);
        assert_eq!(lines[0].text, "9999");
    }

    #[test]
    fn window_clamps_to_the_start_of_memory_near_pc_zero() {
        let memory = Memory::new();
        let lines = window_around(&memory, 5, 80);
        assert_eq!(lines[0].address, 0);
    }
}
