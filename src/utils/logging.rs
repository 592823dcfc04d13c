//! Log setup: `env_logger` piped into `arcade.log` in the data directory.
//!
//! The terminal belongs to the TUI, so nothing is written to stderr.

use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Environment variable holding the filter (`warn`, `arcade=debug`, ...).
pub const LOG_ENV: &str = "ARCADE_LOG";
pub const LOG_FILE: &str = "arcade.log";

/// Logger builder writing plain records to `file`, filtered by `ARCADE_LOG`
/// (default `info`).
pub fn builder(file: File) -> Builder {
    let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV, "info"));
    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never);
    builder
}

/// Install the logger, appending to `path`. Fails if the file cannot be
/// opened or a logger is already installed.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    builder(file)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
