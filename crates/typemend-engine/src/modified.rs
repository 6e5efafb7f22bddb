//! Run-lifetime record of units that received edits.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

/// Append-only set of unit ids that received at least one edit in any wave.
///
/// The set is shared by reference across every provider created in the same
/// run: the core scanner writes to it, later single-use passes read it.
/// Scheduling is strictly sequential, so interior mutability through
/// [`RefCell`] suffices; the set lives for the whole run and never shrinks.
#[derive(Debug, Clone, Default)]
pub struct ModifiedUnits {
    units: Rc<RefCell<BTreeSet<Utf8PathBuf>>>,
}

impl ModifiedUnits {
    /// Creates an empty shared set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a unit as modified.
    pub fn record(&self, unit: Utf8PathBuf) {
        self.units.borrow_mut().insert(unit);
    }

    /// Returns `true` when the unit has received an edit in a prior wave.
    #[must_use]
    pub fn contains(&self, unit: &Utf8Path) -> bool {
        self.units.borrow().contains(unit)
    }

    /// Returns the recorded unit ids in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Utf8PathBuf> {
        self.units.borrow().iter().cloned().collect()
    }

    /// Returns the number of recorded units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.borrow().len()
    }

    /// Returns `true` when no unit has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.borrow().is_empty()
    }
}
