//! Built-in analysis passes for Typemend.
//!
//! The engine runs an arbitrary set of mutators; this crate ships the
//! concrete ones. Three iterative annotation mutators inspect each unit's
//! syntax for under-specified types — variable declarations, defaulted
//! parameters, and return types, the last synthesizing result interfaces
//! for uniform object returns. A fourth pass, the `require`-to-`import`
//! rewrite, runs once before the core scan as a single-use wave.
//!
//! All analysis here is syntax-level: a deficiency is only fixed when the
//! replacement type is unambiguous from the unit's own tree. Anything less
//! certain is left for the next sweep, or for a human.

pub mod collect;
pub mod infer;
pub mod parameters;
pub mod registry;
pub mod requires;
pub mod returns;
pub mod variables;

#[cfg(test)]
mod testing;

pub use self::collect::collect_edits;
pub use self::infer::{LiteralType, classify_literal, classify_literal_memo};
pub use self::parameters::ParameterAnnotations;
pub use self::registry::registered_mutators;
pub use self::requires::require_rewrite_wave;
pub use self::returns::ReturnAnnotations;
pub use self::variables::VariableAnnotations;
