//! Fix-flag-gated registration of the built-in mutators.

use typemend_config::Fixes;
use typemend_engine::Mutator;
use typemend_syntax::ProjectContext;

use crate::parameters::ParameterAnnotations;
use crate::returns::ReturnAnnotations;
use crate::variables::VariableAnnotations;

/// Returns the mutators enabled by the given fix toggles, in the order the
/// scanner runs them against each unit.
///
/// The `require_imports` fix is not listed here: it is a single-use
/// pre-pass registered at the provider level, not an iterative mutator.
#[must_use]
pub fn registered_mutators(fixes: &Fixes) -> Vec<Box<dyn Mutator<ProjectContext>>> {
    let mut mutators: Vec<Box<dyn Mutator<ProjectContext>>> = Vec::new();
    if fixes.no_implicit_any {
        mutators.push(Box::new(VariableAnnotations));
        mutators.push(Box::new(ParameterAnnotations));
    }
    if fixes.incomplete_types {
        mutators.push(Box::new(ReturnAnnotations));
    }
    mutators
}
