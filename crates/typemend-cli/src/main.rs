//! Binary entrypoint for the `typemend` tool.
//!
//! The binary delegates to [`typemend_cli::run`], which parses arguments,
//! loads configuration, assembles the provider chain, and drives it to
//! exhaustion against the on-disk project.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    typemend_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
