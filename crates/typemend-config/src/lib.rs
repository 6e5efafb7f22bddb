//! Options model for the Typemend command-line tool.
//!
//! Configuration comes from up to two places, merged in a fixed precedence:
//! a JSON configuration file (`typemend.json` by default) parsed into
//! [`RawOptions`], and command-line [`CliOverrides`]. [`load_options`]
//! resolves the file, merges the layers, and produces the filled-out
//! [`Options`] the rest of the tool consumes.

pub mod load;
pub mod logging;
pub mod options;

pub use self::load::{ConfigError, DEFAULT_CONFIG_FILE, load_options};
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::options::{
    CliOverrides, DEFAULT_INCLUDE, DEFAULT_MAX_EDITS, DEFAULT_MAX_ELAPSED_MS, FileMarkers, Fixes,
    Options, RawFileMarkers, RawFixes, RawOptions, RawWaveLimits, WaveLimits,
    fill_out_raw_options,
};
