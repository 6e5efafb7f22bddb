//! Semantic context traits and the once-per-sweep context cache.
//!
//! Building semantic analysis for a whole project is expensive, so the
//! engine memoizes the result in a [`SemanticContextCache`] and only
//! invalidates it after a full sweep has visited every unit. The cache is an
//! explicit two-state machine: `Fresh` holds the shared context, `Stale`
//! (the cleared state) forces the next [`SemanticContextCache::get`] to
//! rebuild from current on-disk state.

use std::collections::BTreeSet;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::EngineError;

const CONTEXT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::context");

/// One compilation unit's analyzed form, as seen by the engine.
///
/// The engine never inspects syntax itself; it only needs the unit's text
/// and the identifiers declared in it (to seed collision-free synthetic
/// names). Semantic backends expose richer structure through their own
/// concrete unit types.
pub trait AnalyzedUnit {
    /// Returns the unit's source text.
    fn source(&self) -> &str;

    /// Returns the identifiers declared anywhere in the unit.
    fn identifiers(&self) -> &BTreeSet<String>;
}

/// Project-wide semantic analysis: an ordered unit list plus per-unit
/// resolution.
pub trait SemanticContext {
    /// Analyzed form of one unit.
    type Unit: AnalyzedUnit;

    /// Returns every unit id in the fixed order sweeps visit them.
    fn unit_ids(&self) -> &[Utf8PathBuf];

    /// Resolves one unit's analyzed form.
    ///
    /// Returns `None` when the unit cannot be analyzed; the scanner reports
    /// a warning and skips such units without failing the sweep.
    fn resolve(&self, unit: &Utf8Path) -> Option<&Self::Unit>;
}

/// Builds a [`SemanticContext`] from current on-disk state.
pub trait ContextLoader {
    /// Context type produced by a successful load.
    type Context: SemanticContext;

    /// Enumerates the project's units and constructs semantic analysis.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when the project cannot be
    /// loaded; this aborts the run and is never retried.
    fn load(&mut self) -> Result<Self::Context, EngineError>;
}

/// Lazily builds and memoizes a semantic context across waves.
///
/// `get()` returns the cached context, building it on first access or after
/// `clear()`. The context is handed out behind an [`Rc`] so a wave can keep
/// using the context it scanned with even while marking the cache stale at
/// sweep end.
#[derive(Debug)]
pub struct SemanticContextCache<L: ContextLoader> {
    loader: L,
    state: Option<Rc<L::Context>>,
}

impl<L: ContextLoader> SemanticContextCache<L> {
    /// Creates a stale cache around the given loader.
    #[must_use]
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            state: None,
        }
    }

    /// Returns the cached context, building it if the cache is stale.
    ///
    /// # Errors
    ///
    /// Propagates the loader's [`EngineError::Configuration`] unchanged.
    pub fn get(&mut self) -> Result<Rc<L::Context>, EngineError> {
        if let Some(context) = &self.state {
            return Ok(Rc::clone(context));
        }
        debug!(target: CONTEXT_TARGET, "building semantic context");
        let built = Rc::new(self.loader.load()?);
        self.state = Some(Rc::clone(&built));
        Ok(built)
    }

    /// Marks the cache stale so the next `get()` rebuilds from disk.
    pub fn clear(&mut self) {
        debug!(target: CONTEXT_TARGET, "invalidating semantic context");
        self.state = None;
    }

    /// Returns `true` while a built context is being reused.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.state.is_some()
    }
}
