use std::fs::OpenOptions;
use std::path::Path;

use clap::Parser;
use vm16::cli::{Cli, Mode};
use vm16::debugger::Debugger;
use vm16::host::HostIo;
use vm16::machine::{Machine, StepResult};
use vm16::paths::{LOG_PATH, SNAPSHOT_PATH};
use vm16::{loader, snapshot};

fn init_logging() -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_PATH)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(machine: &mut Machine, host: &mut dyn HostIo) -> Result<(), vm16::VmFault> {
    loop {
        if let StepResult::Halted = machine.step(host)? {
            return Ok(());
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let mode = cli.mode().map_err(|message| {
        log::error!("{message}");
        anyhow::anyhow!(message)
    })?;

    let mut machine = match mode {
        Mode::Run(path) => loader::load_image(&path),
        Mode::Resume => snapshot::load(Path::new(SNAPSHOT_PATH)),
    }
    .map_err(|fault| {
        log::error!("{fault}");
        fault
    })?;

    let mut debugger = Debugger::new()?;
    let outcome = run(&mut machine, &mut debugger);
    drop(debugger);

    match outcome {
        Ok(()) => Ok(()),
        Err(fault) => {
            log::error!("{fault}");
            std::process::exit(1);
        }
    }
}
