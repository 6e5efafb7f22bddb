//! Annotates functions whose return type is derivable from their bodies.

use typemend_engine::{AnalyzedUnit, Edit, EngineError, Mutator, NameGenerator, UnitRequest};
use typemend_syntax::{ParsedUnit, ProjectContext};

use crate::collect::collect_edits;
use crate::infer::{LiteralType, classify_literal};

/// Node kinds that open a new function scope; return statements inside them
/// belong to the inner function, not the one being annotated.
fn is_function_scope(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "function_expression"
            | "generator_function"
            | "generator_function_declaration"
            | "arrow_function"
            | "method_definition"
    )
}

/// Adds a return-type annotation to functions and methods that lack one.
///
/// Three shapes are recognised: bodies with no value-returning `return`
/// become `: void`; bodies whose every return is a literal of one common
/// type get that type; top-level functions whose every return is the same
/// object-literal shape get a synthesized result interface, named through
/// the unit's collision-free name generator and inserted just above the
/// function. Anything else is left for a richer pass to handle.
pub struct ReturnAnnotations;

impl Mutator<ProjectContext> for ReturnAnnotations {
    fn name(&self) -> &'static str {
        "return-annotations"
    }

    fn propose(
        &self,
        request: &mut UnitRequest<'_, ProjectContext>,
    ) -> Result<Vec<Edit>, EngineError> {
        let unit = request.unit;
        let names = &mut *request.names;
        Ok(collect_edits(
            unit,
            |node| matches!(node.kind(), "function_declaration" | "method_definition"),
            |node| annotate_returns(unit, node, names),
        ))
    }
}

fn annotate_returns(
    unit: &ParsedUnit,
    node: tree_sitter::Node<'_>,
    names: &mut NameGenerator,
) -> Vec<Edit> {
    if node.child_by_field_name("return_type").is_some() || is_async_or_generator(node) {
        return Vec::new();
    }
    let Some(parameters) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let Some(body) = node.child_by_field_name("body") else {
        return Vec::new();
    };

    let mut returns = Vec::new();
    collect_return_expressions(body, &mut returns);

    let value_returns: Vec<tree_sitter::Node<'_>> =
        returns.iter().copied().flatten().collect();
    if value_returns.is_empty() {
        return vec![Edit::insert(parameters.end_byte(), ": void")];
    }

    // A bare `return;` or a fall-through at the end of the body means the
    // function can also produce `undefined`; the literal type alone would
    // be wrong then.
    let has_bare_return = returns.iter().any(Option::is_none);
    if has_bare_return || !ends_with_return(body) {
        return Vec::new();
    }

    if let Some(literal) = common_literal_type(unit, &value_returns) {
        return vec![Edit::insert(
            parameters.end_byte(),
            format!(": {}", literal.annotation()),
        )];
    }

    // Interface synthesis only applies to top-level function declarations;
    // methods would need the interface hoisted out of their class.
    if node.kind() == "function_declaration"
        && let Some(shape) = common_object_shape(unit, &value_returns)
    {
        return synthesize_result_interface(unit, node, parameters, &shape, names);
    }

    Vec::new()
}

fn is_async_or_generator(node: tree_sitter::Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| matches!(child.kind(), "async" | "*"))
}

fn ends_with_return(body: tree_sitter::Node<'_>) -> bool {
    let count = body.named_child_count();
    count > 0
        && body
            .named_child(count - 1)
            .is_some_and(|last| last.kind() == "return_statement")
}

/// Collects the expression of every `return` in the body, without entering
/// nested function scopes. Bare `return;` contributes `None`.
fn collect_return_expressions<'tree>(
    node: tree_sitter::Node<'tree>,
    returns: &mut Vec<Option<tree_sitter::Node<'tree>>>,
) {
    if node.kind() == "return_statement" {
        returns.push(node.named_child(0));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !is_function_scope(child.kind()) {
            collect_return_expressions(child, returns);
        }
    }
}

fn common_literal_type(
    unit: &ParsedUnit,
    expressions: &[tree_sitter::Node<'_>],
) -> Option<LiteralType> {
    let mut common = None;
    for expression in expressions {
        let literal = classify_literal(*expression, unit.source())?;
        match common {
            None => common = Some(literal),
            Some(seen) if seen == literal => {}
            Some(_) => return None,
        }
    }
    common
}

/// A uniform object-literal shape: field names and their literal types, in
/// source order of the first return.
type ObjectShape = Vec<(String, LiteralType)>;

fn common_object_shape(
    unit: &ParsedUnit,
    expressions: &[tree_sitter::Node<'_>],
) -> Option<ObjectShape> {
    let mut shapes = expressions
        .iter()
        .map(|expression| object_shape(unit, *expression));
    let first = shapes.next()??;
    if first.is_empty() {
        return None;
    }
    let mut first_sorted = first.clone();
    first_sorted.sort();
    for shape in shapes {
        let mut sorted = shape?;
        sorted.sort();
        if sorted != first_sorted {
            return None;
        }
    }
    Some(first)
}

fn object_shape(unit: &ParsedUnit, expression: tree_sitter::Node<'_>) -> Option<ObjectShape> {
    if expression.kind() != "object" {
        return None;
    }
    let mut fields = Vec::new();
    let mut cursor = expression.walk();
    for entry in expression.named_children(&mut cursor) {
        if entry.kind() != "pair" {
            return None;
        }
        let key = entry.child_by_field_name("key")?;
        if key.kind() != "property_identifier" {
            return None;
        }
        let value = entry.child_by_field_name("value")?;
        let literal = classify_literal(value, unit.source())?;
        fields.push((unit.node_text(key).to_owned(), literal));
    }
    Some(fields)
}

fn synthesize_result_interface(
    unit: &ParsedUnit,
    node: tree_sitter::Node<'_>,
    parameters: tree_sitter::Node<'_>,
    shape: &ObjectShape,
    names: &mut NameGenerator,
) -> Vec<Edit> {
    let Some(name_node) = node.child_by_field_name("name") else {
        return Vec::new();
    };
    let base = interface_base(unit.node_text(name_node));
    let interface_name = names.generate(&base);

    let mut interface = format!("interface {interface_name} {{\n");
    for (field, literal) in shape {
        interface.push_str(&format!("    {field}: {};\n", literal.annotation()));
    }
    interface.push_str("}\n\n");

    vec![
        Edit::insert(node.start_byte(), interface),
        Edit::insert(parameters.end_byte(), format!(": {interface_name}")),
    ]
}

fn interface_base(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(
        || "Result".to_owned(),
        |first| format!("{}{}Result", first.to_ascii_uppercase(), chars.as_str()),
    )
}
