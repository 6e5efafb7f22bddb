//! Wave-provider and mutator capability contracts.
//!
//! A wave provider is the unit of composition for the whole engine: the
//! scanner, the single-use adapters, and the priority chain all speak this
//! one contract, so the external driver never needs to know which kind of
//! pass produced a given wave.

use camino::Utf8Path;

use crate::context::SemanticContext;
use crate::error::EngineError;
use crate::names::NameGenerator;
use crate::wave::{Edit, Wave};

/// A stateful producer of edit waves.
///
/// Each call yields at most one wave. Returning [`Wave::Exhausted`] is a
/// permanent signal: the caller may keep polling, but a well-behaved
/// provider never produces edits after reporting exhaustion.
pub trait WaveProvider {
    /// Produces the next wave of edits.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole run; waves already applied by the driver
    /// remain applied.
    fn next_wave(&mut self) -> Result<Wave, EngineError>;
}

/// Everything a mutator sees while visiting one unit.
///
/// The request is rebuilt for every unit: the [`NameGenerator`] is seeded
/// from that unit's declared identifiers and discarded when the unit's pass
/// ends, so synthetic names never leak across units.
pub struct UnitRequest<'a, C: SemanticContext> {
    /// Id of the unit being visited.
    pub unit_id: &'a Utf8Path,
    /// The unit's analyzed form.
    pub unit: &'a C::Unit,
    /// Project-wide semantic context.
    pub context: &'a C,
    /// Collision-free synthetic identifier source, scoped to this unit.
    pub names: &'a mut NameGenerator,
}

/// A pluggable analysis pass proposing edits for one unit at a time.
///
/// Mutators are registered as a list of trait objects and must stay pure
/// with respect to engine state: all they may do is inspect the request and
/// return edit descriptors against the unit's pre-edit text.
pub trait Mutator<C: SemanticContext> {
    /// Short stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Proposes edits for the requested unit.
    ///
    /// # Errors
    ///
    /// A mutator error escalates: the scanner aborts the sweep and the run
    /// fails. Mutators that prefer to skip a unit should return an empty
    /// vector instead.
    fn propose(&self, request: &mut UnitRequest<'_, C>) -> Result<Vec<Edit>, EngineError>;
}
