//! Command-line runtime for the Typemend annotation tool.
//!
//! The module owns argument parsing, configuration loading, telemetry
//! initialisation, and the wave-by-wave drive loop. The interface is
//! designed to be exercised both from the binary entrypoint and from tests,
//! where IO streams can be substituted with in-memory writers.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use typemend_config::load_options;

mod cli;
mod providers;
mod runtime;
mod telemetry;

use cli::Cli;

const DEFAULT_LOG_FILTER: &str = "info";

/// Parses arguments, loads configuration, and drives a full run.
///
/// Returns [`ExitCode::SUCCESS`] when the provider chain exhausts cleanly;
/// any configuration or engine failure prints a one-line diagnostic to
/// `stderr` and returns [`ExitCode::FAILURE`].
pub fn run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let parsed = match Cli::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(error) => {
            // Help and version requests render to stdout and exit cleanly.
            if error.use_stderr() {
                write!(stderr, "{}", error.render()).ok();
                return ExitCode::from(2);
            }
            write!(stdout, "{}", error.render()).ok();
            return ExitCode::SUCCESS;
        }
    };

    let options = match load_options(&parsed.project, parsed.config.as_deref(), &parsed.overrides())
    {
        Ok(options) => options,
        Err(error) => {
            writeln!(stderr, "typemend: {error}").ok();
            return ExitCode::FAILURE;
        }
    };

    let filter = parsed.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    if let Err(error) = telemetry::initialise(options.log_format, filter) {
        writeln!(stderr, "typemend: {error}").ok();
        return ExitCode::FAILURE;
    }

    match runtime::execute(&options) {
        Ok(summary) => {
            if summary.edits == 0 {
                writeln!(stdout, "No type deficiencies found.").ok();
            } else {
                writeln!(
                    stdout,
                    "Applied {} edits across {} units in {} waves.",
                    summary.edits,
                    summary.units.len(),
                    summary.waves,
                )
                .ok();
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            writeln!(stderr, "typemend: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
