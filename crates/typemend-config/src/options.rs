//! Raw and filled-out runtime options.
//!
//! Options flow in two stages: [`RawOptions`] is the serde image of a
//! `typemend.json` configuration file, where every field is optional, and
//! [`Options`] is the filled-out runtime form the rest of the tool consumes.
//! [`fill_out_raw_options`] merges the two with command-line overrides, which
//! always win over file values.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Default include patterns when neither the config file nor the command
/// line selects units.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.ts", "**/*.tsx"];

/// Default per-wave edit ceiling.
pub const DEFAULT_MAX_EDITS: usize = 100;

/// Default per-wave scan-time ceiling in milliseconds.
pub const DEFAULT_MAX_ELAPSED_MS: u64 = 10_000;

/// Raw options as read from a `typemend.json` configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawOptions {
    /// Which fix categories to run.
    pub fixes: RawFixes,
    /// Texts to insert around modified units.
    pub files: RawFileMarkers,
    /// Glob patterns selecting the units to scan.
    pub include: Option<Vec<String>>,
    /// Per-wave budget limits.
    pub limits: RawWaveLimits,
    /// Log output format.
    pub log_format: Option<LogFormat>,
}

/// Raw fix toggles; `None` means "not set here".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawFixes {
    /// Annotate under-specified declarations whose types are incomplete,
    /// synthesizing result interfaces where needed.
    pub incomplete_types: Option<bool>,
    /// Annotate declarations and parameters that would otherwise be
    /// implicitly `any`.
    pub no_implicit_any: Option<bool>,
    /// Rewrite CommonJS `require` declarations to `import` statements.
    pub require_imports: Option<bool>,
}

/// Raw file marker texts; `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawFileMarkers {
    /// Text to insert at the top of each modified unit.
    pub above: Option<String>,
    /// Text to insert at the bottom of each modified unit.
    pub below: Option<String>,
}

/// Raw per-wave budget limits; `None` means "not set here".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawWaveLimits {
    /// Edit count above which a wave stops accepting further units.
    pub max_edits: Option<usize>,
    /// Scan duration in milliseconds after which a non-empty wave stops.
    pub max_elapsed_ms: Option<u64>,
}

/// Filled-out fix toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixes {
    /// Annotate under-specified declarations whose types are incomplete.
    pub incomplete_types: bool,
    /// Annotate declarations and parameters that would be implicitly `any`.
    pub no_implicit_any: bool,
    /// Rewrite CommonJS `require` declarations to `import` statements.
    pub require_imports: bool,
}

impl Fixes {
    /// Returns `true` when no fix category is enabled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.incomplete_types && !self.no_implicit_any && !self.require_imports
    }
}

/// Filled-out file marker texts; empty strings disable a marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMarkers {
    /// Text to insert at the top of each modified unit.
    pub above: String,
    /// Text to insert at the bottom of each modified unit.
    pub below: String,
}

impl FileMarkers {
    /// Returns `true` when neither marker is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.above.is_empty() && self.below.is_empty()
    }
}

/// Filled-out per-wave budget limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveLimits {
    /// Edit count above which a wave stops accepting further units.
    pub max_edits: usize,
    /// Scan duration in milliseconds after which a non-empty wave stops.
    pub max_elapsed_ms: u64,
}

impl Default for WaveLimits {
    fn default() -> Self {
        Self {
            max_edits: DEFAULT_MAX_EDITS,
            max_elapsed_ms: DEFAULT_MAX_ELAPSED_MS,
        }
    }
}

/// Command-line overrides applied on top of file options.
///
/// `None` fields leave the file value (or its default) untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Override for [`Fixes::incomplete_types`].
    pub fix_incomplete_types: Option<bool>,
    /// Override for [`Fixes::no_implicit_any`].
    pub fix_no_implicit_any: Option<bool>,
    /// Override for [`Fixes::require_imports`].
    pub fix_require_imports: Option<bool>,
    /// Override for the include patterns.
    pub include: Option<Vec<String>>,
    /// Override for [`FileMarkers::above`].
    pub file_above: Option<String>,
    /// Override for [`FileMarkers::below`].
    pub file_below: Option<String>,
    /// Override for [`WaveLimits::max_edits`].
    pub max_edits: Option<usize>,
    /// Override for [`WaveLimits::max_elapsed_ms`].
    pub max_elapsed_ms: Option<u64>,
    /// Override for the log output format.
    pub log_format: Option<LogFormat>,
}

/// Filled-out runtime options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Project root the scan operates on.
    pub root: Utf8PathBuf,
    /// Glob patterns selecting the units to scan, relative to `root`.
    pub include: Vec<String>,
    /// Which fix categories to run.
    pub fixes: Fixes,
    /// Texts to insert around modified units.
    pub files: FileMarkers,
    /// Per-wave budget limits.
    pub limits: WaveLimits,
    /// Log output format.
    pub log_format: LogFormat,
}

/// Fills out raw file options with defaults and command-line overrides.
///
/// Precedence per field, highest first: command line, configuration file,
/// built-in default.
#[must_use]
pub fn fill_out_raw_options(
    root: Utf8PathBuf,
    raw: RawOptions,
    overrides: &CliOverrides,
) -> Options {
    let fixes = Fixes {
        incomplete_types: overrides
            .fix_incomplete_types
            .or(raw.fixes.incomplete_types)
            .unwrap_or_default(),
        no_implicit_any: overrides
            .fix_no_implicit_any
            .or(raw.fixes.no_implicit_any)
            .unwrap_or_default(),
        require_imports: overrides
            .fix_require_imports
            .or(raw.fixes.require_imports)
            .unwrap_or_default(),
    };
    let files = FileMarkers {
        above: overrides
            .file_above
            .clone()
            .or(raw.files.above)
            .unwrap_or_default(),
        below: overrides
            .file_below
            .clone()
            .or(raw.files.below)
            .unwrap_or_default(),
    };
    let limits = WaveLimits {
        max_edits: overrides
            .max_edits
            .or(raw.limits.max_edits)
            .unwrap_or(DEFAULT_MAX_EDITS),
        max_elapsed_ms: overrides
            .max_elapsed_ms
            .or(raw.limits.max_elapsed_ms)
            .unwrap_or(DEFAULT_MAX_ELAPSED_MS),
    };
    let include = overrides
        .include
        .clone()
        .or(raw.include)
        .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(|glob| (*glob).to_owned()).collect());

    Options {
        root,
        include,
        fixes,
        files,
        limits,
        log_format: overrides
            .log_format
            .or(raw.log_format)
            .unwrap_or_default(),
    }
}
