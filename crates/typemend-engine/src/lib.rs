//! Mutation-wave orchestration engine for Typemend.
//!
//! The `typemend-engine` crate implements the scheduler that turns a set of
//! independent, pluggable analysis passes ("mutators") into a single bounded,
//! resumable, incrementally-applied edit stream. Semantic analysis over a
//! whole project is expensive, so the engine memoizes it in a
//! [`SemanticContextCache`] that is invalidated once per full sweep rather
//! than once per wave. Edits change source text and would invalidate cached
//! analysis, so the engine hands edits to the driver in small bounded
//! [`Wave`]s and only rebuilds its context after every unit has been visited.
//!
//! # Architecture
//!
//! Providers compose bottom-up:
//!
//! * [`WaveScanner`] walks the ordered unit list with a resumable cursor,
//!   invoking every registered [`Mutator`] per unit under a [`WaveBudget`].
//! * [`SingleUse`] wraps a one-shot pass so it executes at most once across
//!   the whole run and reports permanent exhaustion afterwards.
//! * [`ProviderChain`] orders a fixed priority chain of providers and exposes
//!   one [`WaveProvider`] to the external driver.
//!
//! The driver repeatedly calls the composed provider, applies each returned
//! wave through [`run_waves`] and a [`UnitStore`], and stops when the
//! provider returns [`Wave::Exhausted`]. Passes that run after the core scan
//! read the shared [`ModifiedUnits`] set to see which units earlier waves
//! actually changed.

pub mod apply;
pub mod budget;
pub mod compose;
pub mod context;
pub mod error;
pub mod memo;
pub mod modified;
pub mod names;
pub mod provider;
pub mod scanner;
pub mod single_use;
pub mod wave;

#[cfg(test)]
mod testing;

pub use self::apply::{RunSummary, UnitStore, apply_edits, run_waves};
pub use self::budget::WaveBudget;
pub use self::compose::ProviderChain;
pub use self::context::{AnalyzedUnit, ContextLoader, SemanticContext, SemanticContextCache};
pub use self::error::EngineError;
pub use self::memo::MemoCache;
pub use self::modified::ModifiedUnits;
pub use self::names::NameGenerator;
pub use self::provider::{Mutator, UnitRequest, WaveProvider};
pub use self::scanner::WaveScanner;
pub use self::single_use::SingleUse;
pub use self::wave::{Edit, Wave, WaveEdits};
