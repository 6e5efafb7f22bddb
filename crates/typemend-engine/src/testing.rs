//! Shared stubs for engine unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::context::{AnalyzedUnit, ContextLoader, SemanticContext};
use crate::error::EngineError;
use crate::provider::{Mutator, UnitRequest, WaveProvider};
use crate::wave::{Edit, Wave};

/// Minimal analyzed unit with a fixed identifier set.
#[derive(Debug)]
pub(crate) struct StubUnit {
    pub(crate) source: String,
    pub(crate) identifiers: BTreeSet<String>,
}

impl StubUnit {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            identifiers: BTreeSet::new(),
        }
    }
}

impl AnalyzedUnit for StubUnit {
    fn source(&self) -> &str {
        &self.source
    }

    fn identifiers(&self) -> &BTreeSet<String> {
        &self.identifiers
    }
}

/// Context over a fixed, ordered unit list.
#[derive(Debug)]
pub(crate) struct StubContext {
    pub(crate) ids: Vec<Utf8PathBuf>,
    pub(crate) units: HashMap<Utf8PathBuf, StubUnit>,
}

impl SemanticContext for StubContext {
    type Unit = StubUnit;

    fn unit_ids(&self) -> &[Utf8PathBuf] {
        &self.ids
    }

    fn resolve(&self, unit: &Utf8Path) -> Option<&StubUnit> {
        self.units.get(unit)
    }
}

/// Loader producing a [`StubContext`] over the given unit ids, counting how
/// many times it was asked to build.
///
/// Units named in `unresolvable` are listed in the unit order but excluded
/// from resolution, mimicking a unit whose analysis handle cannot be
/// obtained.
pub(crate) struct StubLoader {
    pub(crate) ids: Vec<Utf8PathBuf>,
    pub(crate) unresolvable: BTreeSet<Utf8PathBuf>,
    pub(crate) loads: Rc<Cell<usize>>,
}

impl StubLoader {
    pub(crate) fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(Utf8PathBuf::from).collect(),
            unresolvable: BTreeSet::new(),
            loads: Rc::new(Cell::new(0)),
        }
    }
}

impl ContextLoader for StubLoader {
    type Context = StubContext;

    fn load(&mut self) -> Result<StubContext, EngineError> {
        self.loads.set(self.loads.get() + 1);
        let units = self
            .ids
            .iter()
            .filter(|id| !self.unresolvable.contains(*id))
            .map(|id| (id.clone(), StubUnit::new("const a = 1;")))
            .collect();
        Ok(StubContext {
            ids: self.ids.clone(),
            units,
        })
    }
}

/// Pending deficiency counts keyed by unit, shared between a test and its
/// [`QueueMutator`].
pub(crate) type PendingEdits = Rc<RefCell<BTreeMap<Utf8PathBuf, usize>>>;

pub(crate) fn pending_edits(counts: &[(&str, usize)]) -> PendingEdits {
    Rc::new(RefCell::new(
        counts
            .iter()
            .map(|(id, count)| (Utf8PathBuf::from(*id), *count))
            .collect(),
    ))
}

/// Mutator that drains a unit's pending deficiency count into edits.
///
/// Draining models the external apply step fixing the deficiencies: once a
/// unit has been visited, later sweeps find nothing there.
pub(crate) struct QueueMutator {
    pub(crate) pending: PendingEdits,
}

impl Mutator<StubContext> for QueueMutator {
    fn name(&self) -> &'static str {
        "queue"
    }

    fn propose(
        &self,
        request: &mut UnitRequest<'_, StubContext>,
    ) -> Result<Vec<Edit>, EngineError> {
        let count = self
            .pending
            .borrow_mut()
            .get_mut(request.unit_id)
            .map(std::mem::take)
            .unwrap_or_default();
        Ok((0..count).map(|offset| Edit::insert(offset, "x")).collect())
    }
}

/// Mutator that always fails, for escalation tests.
pub(crate) struct FailingMutator;

impl Mutator<StubContext> for FailingMutator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn propose(
        &self,
        request: &mut UnitRequest<'_, StubContext>,
    ) -> Result<Vec<Edit>, EngineError> {
        Err(EngineError::mutator(
            self.name(),
            request.unit_id.to_owned(),
            "deliberate failure",
        ))
    }
}

/// Provider that replays a scripted wave sequence and counts calls.
///
/// Once the script is consumed every further call reports exhaustion.
pub(crate) struct ScriptedProvider {
    script: RefCell<Vec<Result<Wave, EngineError>>>,
    pub(crate) calls: Rc<Cell<usize>>,
}

impl ScriptedProvider {
    pub(crate) fn new(script: Vec<Result<Wave, EngineError>>) -> Self {
        let mut reversed = script;
        reversed.reverse();
        Self {
            script: RefCell::new(reversed),
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl WaveProvider for ScriptedProvider {
    fn next_wave(&mut self) -> Result<Wave, EngineError> {
        self.calls.set(self.calls.get() + 1);
        self.script
            .borrow_mut()
            .pop()
            .unwrap_or(Ok(Wave::Exhausted))
    }
}

/// In-memory unit store for driver tests.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) texts: BTreeMap<Utf8PathBuf, String>,
}

impl MemoryStore {
    pub(crate) fn with_unit(mut self, unit: &str, text: &str) -> Self {
        self.texts.insert(Utf8PathBuf::from(unit), text.to_owned());
        self
    }
}

impl crate::apply::UnitStore for MemoryStore {
    fn read_unit(&self, unit: &Utf8Path) -> Result<String, EngineError> {
        self.texts.get(unit).cloned().ok_or_else(|| {
            EngineError::read_unit(
                unit.to_owned(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing unit"),
            )
        })
    }

    fn write_unit(&mut self, unit: &Utf8Path, text: &str) -> Result<(), EngineError> {
        self.texts.insert(unit.to_owned(), text.to_owned());
        Ok(())
    }
}
