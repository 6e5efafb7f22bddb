//! Node-visitor edit collection shared by the built-in mutators.

use typemend_engine::Edit;
use typemend_syntax::ParsedUnit;

/// Walks the unit's tree in pre-order, visiting every node the selector
/// accepts and collecting the edits the visitor proposes for it.
///
/// Edits come back in tree order, which keeps descriptor order deterministic
/// across sweeps.
#[must_use]
pub fn collect_edits<S, V>(unit: &ParsedUnit, select: S, mut visit: V) -> Vec<Edit>
where
    S: Fn(tree_sitter::Node<'_>) -> bool,
    V: FnMut(tree_sitter::Node<'_>) -> Vec<Edit>,
{
    let mut edits = Vec::new();
    walk(unit.root_node(), &select, &mut visit, &mut edits);
    edits
}

fn walk<S, V>(node: tree_sitter::Node<'_>, select: &S, visit: &mut V, edits: &mut Vec<Edit>)
where
    S: Fn(tree_sitter::Node<'_>) -> bool,
    V: FnMut(tree_sitter::Node<'_>) -> Vec<Edit>,
{
    if select(node) {
        edits.extend(visit(node));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, select, visit, edits);
    }
}
