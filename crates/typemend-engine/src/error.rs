//! Domain errors raised by the orchestration engine.
//!
//! All errors use `thiserror`-derived enums with structured context so
//! callers can inspect the failure programmatically. I/O errors are wrapped
//! in `Arc` to satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The project's unit list or semantic context could not be built.
    ///
    /// This is fatal: the run aborts immediately and nothing is retried.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable failure description.
        message: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    /// A pluggable pass failed while processing a unit.
    #[error("mutator '{mutator}' failed on unit '{unit}': {message}")]
    Mutator {
        /// Name of the failing mutator.
        mutator: String,
        /// Unit being processed when the failure occurred.
        unit: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// An edit's range extends past the end of the unit's text.
    #[error("edit range {begin}..{end} exceeds unit length {len}")]
    EditOutOfBounds {
        /// First byte offset of the edit.
        begin: usize,
        /// One past the last byte offset of the edit.
        end: usize,
        /// Length of the unit's text in bytes.
        len: usize,
    },

    /// An edit offset lands inside a multi-byte UTF-8 character.
    #[error("edit offset {offset} is not a UTF-8 character boundary")]
    EditBoundary {
        /// The offending byte offset.
        offset: usize,
    },

    /// Two edits for the same unit touch overlapping byte ranges.
    #[error("edits overlap: one ends at byte {first_end}, the next begins at byte {second_begin}")]
    OverlappingEdits {
        /// End offset of the earlier edit.
        first_end: usize,
        /// Begin offset of the later edit.
        second_begin: usize,
    },

    /// A unit's current text could not be read from the store.
    #[error("failed to read unit '{unit}': {source}")]
    ReadUnit {
        /// Unit that failed to read.
        unit: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A unit's updated text could not be written to the store.
    #[error("failed to write unit '{unit}': {source}")]
    WriteUnit {
        /// Unit that failed to write.
        unit: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl EngineError {
    /// Creates a configuration error from a bare message.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error wrapping an I/O failure.
    #[must_use]
    pub fn configuration_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates a mutator failure for the given unit.
    #[must_use]
    pub fn mutator(
        mutator: impl Into<String>,
        unit: impl Into<Utf8PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Mutator {
            mutator: mutator.into(),
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Creates a read failure for the given unit.
    #[must_use]
    pub fn read_unit(unit: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ReadUnit {
            unit: unit.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a write failure for the given unit.
    #[must_use]
    pub fn write_unit(unit: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::WriteUnit {
            unit: unit.into(),
            source: Arc::new(source),
        }
    }
}
