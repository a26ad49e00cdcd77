//! Command-line surface: either run a fresh image from `PC=0`, or resume
//! a previously saved snapshot.

use std::path::PathBuf;

use clap::Parser;

/// A 16-bit word-addressed virtual machine with an interactive debugger.
#[derive(Parser, Debug)]
#[command(name = "vm16", version, about)]
pub struct Cli {
    /// Binary program image to load and run from PC=0.
    pub image: Option<PathBuf>,

    /// Resume execution from the saved snapshot instead of loading an image.
    #[arg(long, conflicts_with = "image")]
    pub resume: bool,
}

/// What `main` should do, once the raw CLI arguments have been resolved
/// into exactly one of the two supported modes.
pub enum Mode {
    Run(PathBuf),
    Resume,
}

impl Cli {
    pub fn mode(self) -> Result<Mode, &'static str> {
        match (self.image, self.resume) {
            (Some(image), false) => Ok(Mode::Run(image)),
            (None, true) => Ok(Mode::Resume),
            (None, false) => Err("expected one positional image path or --resume"),
            (Some(_), true) => unreachable!("clap rejects image and --resume together"),
        }
    }
}
