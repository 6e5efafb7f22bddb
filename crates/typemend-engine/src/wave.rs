//! Edit descriptors and the wave result model.
//!
//! A [`Wave`] is one bounded batch of edits returned by a single provider
//! invocation. The distinction between "empty because nothing was found this
//! round" and "empty because permanently done" is a first-class tagged
//! variant: a provider returns [`Wave::More`] with an empty map to signal
//! "still alive, nothing this round" and [`Wave::Exhausted`] to signal that
//! it will never produce edits again.

use std::collections::BTreeMap;
use std::ops::Range;

use camino::Utf8PathBuf;

/// Ordered edits keyed by the unit they apply to.
///
/// Keys are project-root-relative unit paths; the map is ordered so waves
/// render and apply deterministically. Edits within one unit preserve the
/// order their mutators produced them.
pub type WaveEdits = BTreeMap<Utf8PathBuf, Vec<Edit>>;

/// A minimal instruction to change one unit's text.
///
/// Offsets are byte offsets into the *pre-edit* text of the unit. Multiple
/// edits for one unit must not overlap; [`crate::apply_edits`] rejects
/// overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Inserts `text` at byte offset `at`, shifting later text right.
    Insert {
        /// Byte offset the insertion lands at.
        at: usize,
        /// Text to insert.
        text: String,
    },
    /// Replaces the half-open byte `range` with `text`.
    Replace {
        /// Half-open byte range to remove.
        range: Range<usize>,
        /// Replacement text.
        text: String,
    },
}

impl Edit {
    /// Creates an insertion edit.
    #[must_use]
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            at,
            text: text.into(),
        }
    }

    /// Creates a replacement edit.
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::Replace {
            range,
            text: text.into(),
        }
    }

    /// Returns the first byte offset the edit touches.
    #[must_use]
    pub const fn begin(&self) -> usize {
        match self {
            Self::Insert { at, .. } => *at,
            Self::Replace { range, .. } => range.start,
        }
    }

    /// Returns the byte offset one past the last byte the edit removes.
    ///
    /// Insertions remove nothing, so their end equals their begin.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Insert { at, .. } => *at,
            Self::Replace { range, .. } => range.end,
        }
    }

    /// Returns the text the edit introduces.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Insert { text, .. } | Self::Replace { text, .. } => text,
        }
    }
}

/// Result of one wave-provider invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wave {
    /// The provider will never produce edits again.
    Exhausted,
    /// The provider is still alive and produced the contained edits, which
    /// may be empty when a scan slice found nothing.
    More(WaveEdits),
}

impl Wave {
    /// Creates an alive wave with no edits.
    #[must_use]
    pub const fn empty() -> Self {
        Self::More(BTreeMap::new())
    }

    /// Returns `true` for the permanent-exhaustion sentinel.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the edit map for an alive wave.
    #[must_use]
    pub const fn edits(&self) -> Option<&WaveEdits> {
        match self {
            Self::Exhausted => None,
            Self::More(edits) => Some(edits),
        }
    }

    /// Returns the total number of edits across all units in the wave.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        match self {
            Self::Exhausted => 0,
            Self::More(edits) => edits.values().map(Vec::len).sum(),
        }
    }
}
