//! Literal type inference shared by the annotation mutators.

use typemend_engine::MemoCache;

/// Type annotations derivable from a literal expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LiteralType {
    /// Numeric literals, including negated ones.
    Number,
    /// String and template literals.
    String,
    /// The `true` and `false` keywords.
    Boolean,
}

impl LiteralType {
    /// Returns the annotation text for this type.
    #[must_use]
    pub const fn annotation(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// Classifies a literal expression node, or `None` for non-literals.
#[must_use]
pub fn classify_literal(node: tree_sitter::Node<'_>, source: &str) -> Option<LiteralType> {
    match node.kind() {
        "number" => Some(LiteralType::Number),
        "string" | "template_string" => Some(LiteralType::String),
        "true" | "false" => Some(LiteralType::Boolean),
        "unary_expression" => classify_negated_number(node, source),
        _ => None,
    }
}

/// Classifies a literal through the per-unit memo cache.
///
/// Mutators revisit the same value nodes across selector passes; the cache
/// is keyed by Tree-sitter's node id, which is stable within one parse.
#[must_use]
pub fn classify_literal_memo(
    node: tree_sitter::Node<'_>,
    source: &str,
    memo: &mut MemoCache<usize, Option<LiteralType>>,
) -> Option<LiteralType> {
    memo.get_or_insert_with(node.id(), || classify_literal(node, source))
}

fn classify_negated_number(node: tree_sitter::Node<'_>, source: &str) -> Option<LiteralType> {
    let operator = node.child_by_field_name("operator")?;
    let operator_text = operator.utf8_text(source.as_bytes()).ok()?;
    if !matches!(operator_text, "-" | "+") {
        return None;
    }
    let argument = node.child_by_field_name("argument")?;
    (argument.kind() == "number").then_some(LiteralType::Number)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use typemend_engine::AnalyzedUnit;

    use super::*;
    use crate::testing::parse_unit;

    fn classify_initializer(source: &str) -> Option<LiteralType> {
        let unit = parse_unit(source);
        let mut found = None;
        crate::collect::collect_edits(
            &unit,
            |node| node.kind() == "variable_declarator",
            |node| {
                found = node
                    .child_by_field_name("value")
                    .and_then(|value| classify_literal(value, unit.source()));
                vec![]
            },
        );
        found
    }

    #[rstest]
    #[case("const x = 42;", Some(LiteralType::Number))]
    #[case("const x = -1.5;", Some(LiteralType::Number))]
    #[case("const x = \"hi\";", Some(LiteralType::String))]
    #[case("const x = `hi ${1}`;", Some(LiteralType::String))]
    #[case("const x = true;", Some(LiteralType::Boolean))]
    #[case("const x = false;", Some(LiteralType::Boolean))]
    #[case("const x = [1];", None)]
    #[case("const x = !flag;", None)]
    #[case("const x = other;", None)]
    fn classifies_initializers(#[case] source: &str, #[case] expected: Option<LiteralType>) {
        assert_eq!(classify_initializer(source), expected);
    }

    #[test]
    fn memo_computes_each_node_once() {
        let unit = parse_unit("const x = 42;");
        let mut memo = MemoCache::new();
        crate::collect::collect_edits(
            &unit,
            |node| node.kind() == "variable_declarator",
            |node| {
                if let Some(value) = node.child_by_field_name("value") {
                    let first = classify_literal_memo(value, unit.source(), &mut memo);
                    let second = classify_literal_memo(value, unit.source(), &mut memo);
                    assert_eq!(first, second);
                }
                vec![]
            },
        );
        assert_eq!(memo.len(), 1);
    }
}
