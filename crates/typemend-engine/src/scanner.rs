//! The iterative core scanner producing one bounded wave per call.
//!
//! The scanner owns the resumable cursor into the ordered unit list. Each
//! call resumes where the previous wave stopped, runs every registered
//! mutator against each unit, and stops early once the [`WaveBudget`] trips.
//! When the cursor reaches the end of the list the semantic context is
//! invalidated: a fresh sweep must see the edits the driver applied between
//! waves, because stale trees would propose duplicate or conflicting edits.

use std::time::Instant;

use tracing::{debug, warn};

use crate::budget::WaveBudget;
use crate::context::{AnalyzedUnit, ContextLoader, SemanticContext, SemanticContextCache};
use crate::error::EngineError;
use crate::modified::ModifiedUnits;
use crate::names::NameGenerator;
use crate::provider::{Mutator, UnitRequest, WaveProvider};
use crate::wave::{Wave, WaveEdits};

const SCANNER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::scanner");

/// Stateful scanner that walks the unit list with a resumable cursor.
///
/// The cursor is the index of the next unit to visit; `0` is the logical
/// start of a sweep. A sweep that starts at the logical start and produces
/// no edits anywhere reports [`Wave::Exhausted`]; any other outcome, empty
/// or not, reports [`Wave::More`] so the driver knows the scan is still
/// progressing.
pub struct WaveScanner<L: ContextLoader> {
    cache: SemanticContextCache<L>,
    mutators: Vec<Box<dyn Mutator<L::Context>>>,
    budget: WaveBudget,
    modified: ModifiedUnits,
    cursor: usize,
}

impl<L: ContextLoader> WaveScanner<L> {
    /// Creates a scanner over the loader's units.
    ///
    /// `modified` is the run-wide shared set; every unit that produces at
    /// least one edit in any wave is recorded into it.
    #[must_use]
    pub fn new(
        loader: L,
        mutators: Vec<Box<dyn Mutator<L::Context>>>,
        budget: WaveBudget,
        modified: ModifiedUnits,
    ) -> Self {
        Self {
            cache: SemanticContextCache::new(loader),
            mutators,
            budget,
            modified,
            cursor: 0,
        }
    }

    fn scan_unit(
        &self,
        context: &L::Context,
        unit_id: &camino::Utf8Path,
        unit: &<L::Context as SemanticContext>::Unit,
    ) -> Result<Vec<crate::wave::Edit>, EngineError> {
        let mut names = NameGenerator::new(unit.identifiers().clone());
        let mut produced = Vec::new();
        for mutator in &self.mutators {
            let mut request = UnitRequest {
                unit_id,
                unit,
                context,
                names: &mut names,
            };
            produced.extend(mutator.propose(&mut request)?);
        }
        Ok(produced)
    }
}

impl<L: ContextLoader> WaveProvider for WaveScanner<L> {
    fn next_wave(&mut self) -> Result<Wave, EngineError> {
        let started = Instant::now();
        let context = self.cache.get()?;
        let start_of_sweep = self.cursor == 0;
        let mut edits = WaveEdits::new();
        let mut added: usize = 0;

        while let Some(unit_id) = context.unit_ids().get(self.cursor) {
            self.cursor += 1;

            let Some(unit) = context.resolve(unit_id) else {
                warn!(
                    target: SCANNER_TARGET,
                    unit = %unit_id,
                    "could not resolve analysis for unit; skipping"
                );
                continue;
            };

            let produced = self.scan_unit(context.as_ref(), unit_id.as_path(), unit)?;
            if !produced.is_empty() {
                added += produced.len();
                edits.insert(unit_id.clone(), produced);
            }

            // Checked between units only; a unit's mutators always finish.
            if self.budget.reached(added, started) {
                debug!(
                    target: SCANNER_TARGET,
                    added,
                    cursor = self.cursor,
                    "wave budget reached"
                );
                break;
            }
        }

        if self.cursor >= context.unit_ids().len() {
            self.cursor = 0;
            self.cache.clear();
        }

        for unit_id in edits.keys() {
            self.modified.record(unit_id.clone());
        }

        if start_of_sweep && edits.is_empty() {
            debug!(target: SCANNER_TARGET, "clean sweep; scanner exhausted");
            Ok(Wave::Exhausted)
        } else {
            Ok(Wave::More(edits))
        }
    }
}
