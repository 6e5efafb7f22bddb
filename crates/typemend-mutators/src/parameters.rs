//! Annotates parameters whose defaults reveal their type.

use typemend_engine::{AnalyzedUnit, Edit, EngineError, MemoCache, Mutator, UnitRequest};
use typemend_syntax::{ParsedUnit, ProjectContext};

use crate::collect::collect_edits;
use crate::infer::{LiteralType, classify_literal_memo};

/// Adds a type annotation to parameters that carry a literal default value
/// and no annotation of their own.
///
/// `function pad(width = 2)` becomes `function pad(width: number = 2)`.
/// Parameters without defaults stay implicitly typed; their types are not
/// knowable from syntax alone.
pub struct ParameterAnnotations;

impl Mutator<ProjectContext> for ParameterAnnotations {
    fn name(&self) -> &'static str {
        "parameter-annotations"
    }

    fn propose(
        &self,
        request: &mut UnitRequest<'_, ProjectContext>,
    ) -> Result<Vec<Edit>, EngineError> {
        let unit = request.unit;
        let mut memo = MemoCache::new();
        Ok(collect_edits(
            unit,
            |node| matches!(node.kind(), "required_parameter" | "optional_parameter"),
            |node| annotate_parameter(unit, node, &mut memo).into_iter().collect(),
        ))
    }
}

fn annotate_parameter(
    unit: &ParsedUnit,
    node: tree_sitter::Node<'_>,
    memo: &mut MemoCache<usize, Option<LiteralType>>,
) -> Option<Edit> {
    let pattern = node.child_by_field_name("pattern")?;
    if pattern.kind() != "identifier" || node.child_by_field_name("type").is_some() {
        return None;
    }
    let value = node.child_by_field_name("value")?;
    let literal = classify_literal_memo(value, unit.source(), memo)?;
    Some(Edit::insert(
        pattern.end_byte(),
        format!(": {}", literal.annotation()),
    ))
}
