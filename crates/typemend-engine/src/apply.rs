//! Edit application and the wave-by-wave drive loop.
//!
//! Application validates each unit's edits against the unit's pre-edit text
//! and splices them from the highest offset down, so earlier offsets stay
//! valid while later text shifts. The drive loop polls a composed provider,
//! writes each wave's results through a [`UnitStore`], and stops when the
//! provider reports permanent exhaustion.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::EngineError;
use crate::provider::WaveProvider;
use crate::wave::{Edit, Wave};

const APPLY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::apply");

/// Read/write access to units' current text.
///
/// The engine only ever reads a unit immediately before applying a wave to
/// it and writes the result straight back, so implementations need no
/// caching of their own.
#[cfg_attr(test, mockall::automock)]
pub trait UnitStore {
    /// Returns the unit's current text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ReadUnit`] when the unit cannot be read.
    fn read_unit(&self, unit: &Utf8Path) -> Result<String, EngineError>;

    /// Replaces the unit's text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WriteUnit`] when the unit cannot be written.
    fn write_unit(&mut self, unit: &Utf8Path, text: &str) -> Result<(), EngineError>;
}

/// Totals accumulated over one full run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of non-exhausted waves the provider returned.
    pub waves: usize,
    /// Number of edits applied across all waves.
    pub edits: usize,
    /// Units that received at least one applied edit.
    pub units: BTreeSet<Utf8PathBuf>,
}

/// Applies one unit's edits to its pre-edit text.
///
/// Edits are validated first: every offset must lie inside the text on a
/// UTF-8 character boundary, and no two edits may overlap. Insertions at the
/// same offset keep their production order.
///
/// # Errors
///
/// Returns [`EngineError::EditOutOfBounds`], [`EngineError::EditBoundary`],
/// or [`EngineError::OverlappingEdits`] when validation fails; the text is
/// untouched in that case.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EngineError> {
    for edit in edits {
        if edit.end() > source.len() || edit.begin() > edit.end() {
            return Err(EngineError::EditOutOfBounds {
                begin: edit.begin(),
                end: edit.end(),
                len: source.len(),
            });
        }
        for offset in [edit.begin(), edit.end()] {
            if !source.is_char_boundary(offset) {
                return Err(EngineError::EditBoundary { offset });
            }
        }
    }

    // Stable sort: edits at equal offsets keep mutator-production order.
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.begin(), edit.end()));
    for pair in ordered.windows(2) {
        if let [earlier, later] = pair
            && earlier.end() > later.begin()
        {
            return Err(EngineError::OverlappingEdits {
                first_end: earlier.end(),
                second_begin: later.begin(),
            });
        }
    }

    // Splice from the end toward the start so earlier offsets stay valid.
    let mut result = source.to_owned();
    for edit in ordered.iter().rev() {
        match edit {
            Edit::Insert { at, text } => result.insert_str(*at, text),
            Edit::Replace { range, text } => result.replace_range(range.clone(), text),
        }
    }
    Ok(result)
}

/// Drives a provider to exhaustion, applying every wave through the store.
///
/// Each returned wave is applied unit by unit: the unit's current text is
/// read, the wave's edits for it are spliced in, and the result is written
/// back before the provider is polled again.
///
/// # Errors
///
/// Propagates provider, validation, and store errors; waves applied before
/// the failure remain applied (there is no rollback).
pub fn run_waves<P, S>(provider: &mut P, store: &mut S) -> Result<RunSummary, EngineError>
where
    P: WaveProvider + ?Sized,
    S: UnitStore + ?Sized,
{
    let mut summary = RunSummary::default();
    loop {
        match provider.next_wave()? {
            Wave::Exhausted => break,
            Wave::More(edits) => {
                summary.waves += 1;
                for (unit, unit_edits) in &edits {
                    if unit_edits.is_empty() {
                        continue;
                    }
                    let current = store.read_unit(unit)?;
                    let updated = apply_edits(&current, unit_edits)?;
                    store.write_unit(unit, &updated)?;
                    summary.edits += unit_edits.len();
                    summary.units.insert(unit.clone());
                }
                debug!(
                    target: APPLY_TARGET,
                    wave = summary.waves,
                    edits = edits.values().map(Vec::len).sum::<usize>(),
                    units = edits.len(),
                    "applied wave"
                );
            }
        }
    }
    Ok(summary)
}
