//! The interactive front end: registers/stack/disassembly panels drawn
//! with `tui` over a raw-mode `termion` terminal, and the `in`-opcode
//! multiplexing between program input and debugger commands.

use std::io::{self, Stdout, Write as _};

use termion::input::TermRead;
use termion::raw::{IntoRawMode, RawTerminal};
use tui::backend::TermionBackend;
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

use crate::disassembler;
use crate::error::VmFault;
use crate::host::{HostIo, InputOutcome, StepOutcome};
use crate::machine::Machine;
use crate::paths::{DUMP_PATH, SNAPSHOT_PATH};
use crate::snapshot;
use crate::value::REGISTER_COUNT;

const DISASSEMBLY_WINDOW: usize = 80;

/// Characters reserved as debugger commands inside the `in` opcode; `R`
/// is consumed too, but it substitutes a newline rather than being
/// swallowed outright.
fn is_reserved_command(c: char) -> bool {
    matches!(c, 'Q' | 'D' | 'L' | 'S' | 'R')
}

pub struct Debugger {
    terminal: Terminal<TermionBackend<RawTerminal<Stdout>>>,
    stdin_keys: termion::input::Keys<std::io::Stdin>,
    output: String,
    step_mode: bool,
}

impl Debugger {
    pub fn new() -> Result<Self, VmFault> {
        let stdout = io::stdout().into_raw_mode().map_err(VmFault::Terminal)?;
        let backend = TermionBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(VmFault::Terminal)?;
        Ok(Self {
            terminal,
            stdin_keys: io::stdin().keys(),
            output: String::new(),
            step_mode: false,
        })
    }

    fn next_key(&mut self) -> Result<char, VmFault> {
        loop {
            match self.stdin_keys.next() {
                Some(Ok(termion::event::Key::Char(c))) => return Ok(c),
                Some(Ok(_)) => continue,
                Some(Err(source)) => return Err(VmFault::Terminal(source)),
                None => return Err(VmFault::InputExhausted),
            }
        }
    }

    fn redraw(&mut self, machine: &Machine) -> Result<(), VmFault> {
        let output = self.output.clone();
        let registers: Vec<Spans<'_>> = (0..REGISTER_COUNT)
            .map(|i| {
                let value = machine.registers.get(i);
                Spans::from(Span::raw(format!("R{i} :: {value} {value:#06x}")))
            })
            .collect();

        let stack: Vec<Spans<'_>> = machine
            .stack
            .iter()
            .rev()
            .enumerate()
            .map(|(depth, value)| {
                Spans::from(Span::raw(format!("S{depth:03} :: {value} {value:#06x}")))
            })
            .collect();

        let disassembly_lines = disassembler::window_around(&machine.memory, machine.pc, DISASSEMBLY_WINDOW);
        let disassembly: Vec<Spans<'_>> = disassembly_lines
            .iter()
            .map(|line| {
                let text = format!("{:05} :: {}", line.address, line.text);
                if line.address == machine.pc {
                    Spans::from(Span::styled(text, Style::default().add_modifier(Modifier::REVERSED)))
                } else {
                    Spans::from(Span::raw(text))
                }
            })
            .collect();

        self.terminal
            .draw(|frame| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(frame.size());

                let top = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(rows[0]);

                let bottom = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[1]);

                let main = Paragraph::new(output.as_str())
                    .block(Block::default().borders(Borders::ALL).title("Main"));
                frame.render_widget(main, top[0]);

                let disassembly_panel = Paragraph::new(disassembly)
                    .block(Block::default().borders(Borders::ALL).title("Disassembly"));
                frame.render_widget(disassembly_panel, top[1]);

                let registers_panel = Paragraph::new(registers)
                    .block(Block::default().borders(Borders::ALL).title("Registers"));
                frame.render_widget(registers_panel, bottom[0]);

                let stack_panel = Paragraph::new(stack)
                    .block(Block::default().borders(Borders::ALL).title("Stack"));
                frame.render_widget(stack_panel, bottom[1]);
            })
            .map_err(VmFault::Terminal)?;

        Ok(())
    }
}

impl HostIo for Debugger {
    fn before_instruction(&mut self, machine: &Machine) -> Result<StepOutcome, VmFault> {
        if !self.step_mode {
            return Ok(StepOutcome::Continue);
        }

        self.redraw(machine)?;
        let key = self.next_key()?;
        if key == 'c' || key == 'C' {
            self.step_mode = false;
        }
        Ok(StepOutcome::Continue)
    }

    fn output(&mut self, byte: u8) -> Result<(), VmFault> {
        self.output.push(byte as char);
        io::stdout().flush().map_err(VmFault::Terminal)
    }

    fn input(&mut self, machine: &Machine) -> Result<InputOutcome, VmFault> {
        self.redraw(machine)?;
        let key = self.next_key()?;

        if !is_reserved_command(key) {
            return Ok(InputOutcome::Deliver(key as u8));
        }

        match key {
            'Q' => Ok(InputOutcome::Halt),
            'D' => {
                let lines = disassembler::disassemble(&machine.memory, 0, crate::memory::MEMORY_SIZE);
                let text = disassembler::format_lines(&lines);
                std::fs::write(DUMP_PATH, text).map_err(|source| VmFault::DumpWrite {
                    path: DUMP_PATH.to_string(),
                    source,
                })?;
                Ok(InputOutcome::Retry)
            }
            'L' => {
                let restored = snapshot::load(std::path::Path::new(SNAPSHOT_PATH))?;
                Ok(InputOutcome::Resume(Box::new(restored)))
            }
            'S' => {
                snapshot::save(std::path::Path::new(SNAPSHOT_PATH), machine)?;
                Ok(InputOutcome::Retry)
            }
            'R' => {
                self.step_mode = true;
                Ok(InputOutcome::Deliver(b'\n'))
            }
            _ => unreachable!("is_reserved_command admitted only Q/D/L/S/R"),
        }
    }
}
