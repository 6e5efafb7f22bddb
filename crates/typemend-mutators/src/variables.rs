//! Annotates variable declarations initialised with literals.

use typemend_engine::{AnalyzedUnit, Edit, EngineError, MemoCache, Mutator, UnitRequest};
use typemend_syntax::{ParsedUnit, ProjectContext};

use crate::collect::collect_edits;
use crate::infer::{LiteralType, classify_literal_memo};

/// Adds a type annotation to `let`/`const`/`var` declarators that have a
/// literal initializer and no annotation of their own.
///
/// `const answer = 42;` becomes `const answer: number = 42;`. Destructuring
/// declarators and non-literal initializers are left alone.
pub struct VariableAnnotations;

impl Mutator<ProjectContext> for VariableAnnotations {
    fn name(&self) -> &'static str {
        "variable-annotations"
    }

    fn propose(
        &self,
        request: &mut UnitRequest<'_, ProjectContext>,
    ) -> Result<Vec<Edit>, EngineError> {
        let unit = request.unit;
        let mut memo = MemoCache::new();
        Ok(collect_edits(
            unit,
            |node| node.kind() == "variable_declarator",
            |node| annotate_declarator(unit, node, &mut memo).into_iter().collect(),
        ))
    }
}

fn annotate_declarator(
    unit: &ParsedUnit,
    node: tree_sitter::Node<'_>,
    memo: &mut MemoCache<usize, Option<LiteralType>>,
) -> Option<Edit> {
    let name = node.child_by_field_name("name")?;
    if name.kind() != "identifier" || node.child_by_field_name("type").is_some() {
        return None;
    }
    let value = node.child_by_field_name("value")?;
    let literal = classify_literal_memo(value, unit.source(), memo)?;
    Some(Edit::insert(
        name.end_byte(),
        format!(": {}", literal.annotation()),
    ))
}
