//! CLI argument definitions for the `typemend` tool.

use camino::Utf8PathBuf;
use clap::Parser;
use typemend_config::{CliOverrides, LogFormat};

/// Command-line interface for the Typemend annotation tool.
#[derive(Parser, Debug)]
#[command(
    name = "typemend",
    version,
    about = "Incrementally adds type annotations to a TypeScript project, one bounded wave at a time"
)]
pub(crate) struct Cli {
    /// Glob patterns selecting units to scan, overriding the configuration
    /// file's `include` list.
    #[arg(value_name = "GLOB", num_args = 0..)]
    pub(crate) include: Vec<String>,

    /// Path to a configuration file; relative paths resolve against the
    /// project root. Defaults to `typemend.json` in the project root.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<Utf8PathBuf>,

    /// Project root to scan.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub(crate) project: Utf8PathBuf,

    /// Annotates functions whose return types are derivable, synthesizing
    /// result interfaces for uniform object returns.
    #[arg(long)]
    pub(crate) fix_incomplete_types: bool,

    /// Annotates declarations and parameters that would otherwise be
    /// implicitly `any`.
    #[arg(long)]
    pub(crate) fix_no_implicit_any: bool,

    /// Rewrites CommonJS `require` declarations to `import` statements
    /// before scanning.
    #[arg(long)]
    pub(crate) fix_require_imports: bool,

    /// Text inserted at the top of each modified unit.
    #[arg(long, value_name = "TEXT")]
    pub(crate) file_above: Option<String>,

    /// Text inserted at the bottom of each modified unit.
    #[arg(long, value_name = "TEXT")]
    pub(crate) file_below: Option<String>,

    /// Edit count above which a wave stops accepting further units.
    #[arg(long, value_name = "COUNT")]
    pub(crate) max_edits: Option<usize>,

    /// Scan time in milliseconds after which a non-empty wave stops
    /// accepting further units.
    #[arg(long, value_name = "MS")]
    pub(crate) max_wave_millis: Option<u64>,

    /// Log output format (`compact` or `json`).
    #[arg(long, value_name = "FORMAT")]
    pub(crate) log_format: Option<LogFormat>,

    /// Tracing filter expression for diagnostics.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
}

impl Cli {
    /// Converts parsed flags into configuration overrides.
    ///
    /// Absent flags produce `None`, leaving the configuration file's value
    /// (or the built-in default) in force.
    pub(crate) fn overrides(&self) -> CliOverrides {
        CliOverrides {
            fix_incomplete_types: self.fix_incomplete_types.then_some(true),
            fix_no_implicit_any: self.fix_no_implicit_any.then_some(true),
            fix_require_imports: self.fix_require_imports.then_some(true),
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            file_above: self.file_above.clone(),
            file_below: self.file_below.clone(),
            max_edits: self.max_edits,
            max_elapsed_ms: self.max_wave_millis,
            log_format: self.log_format,
        }
    }
}
