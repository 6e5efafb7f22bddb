//! Single-use rewrite of CommonJS `require` declarations to imports.
//!
//! This pass runs before the core scan: converting `require` declarations
//! changes the shape of the code the annotation mutators see, so it must
//! fully finish first. It builds its own semantic context rather than
//! sharing the scanner's cache, because the scanner invalidates that cache
//! on its own sweep schedule.

use camino::Utf8Path;
use tracing::debug;
use typemend_engine::{
    ContextLoader, Edit, EngineError, ModifiedUnits, SemanticContext, Wave, WaveEdits,
};
use typemend_syntax::{ParsedUnit, ProjectLoader};

use crate::collect::collect_edits;

const REQUIRES_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::requires");

/// Produces one wave rewriting every `const X = require("m")` declaration
/// in the project to an `import` statement.
///
/// Plain identifier bindings become default imports; object-pattern
/// bindings of shorthand names become named imports. Declarations with
/// several declarators, explicit type annotations, or computed bindings
/// are left alone. Units receiving a rewrite are recorded in `modified`.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] when the project cannot be
/// enumerated or matches no units.
pub fn require_rewrite_wave(
    root: &Utf8Path,
    include: &[String],
    modified: &ModifiedUnits,
) -> Result<Wave, EngineError> {
    let mut loader = ProjectLoader::new(root.to_owned(), include)
        .map_err(|error| EngineError::configuration(error.to_string()))?;
    let context = loader.load()?;

    let mut edits = WaveEdits::new();
    for unit_id in context.unit_ids() {
        let Some(unit) = context.resolve(unit_id) else {
            continue;
        };
        let produced = collect_edits(
            unit,
            |node| matches!(node.kind(), "lexical_declaration" | "variable_declaration"),
            |node| rewrite_declaration(unit, node).into_iter().collect(),
        );
        if !produced.is_empty() {
            modified.record(unit_id.clone());
            edits.insert(unit_id.clone(), produced);
        }
    }

    if edits.is_empty() {
        Ok(Wave::Exhausted)
    } else {
        debug!(
            target: REQUIRES_TARGET,
            units = edits.len(),
            "rewriting require declarations"
        );
        Ok(Wave::More(edits))
    }
}

fn rewrite_declaration(unit: &ParsedUnit, node: tree_sitter::Node<'_>) -> Option<Edit> {
    let mut cursor = node.walk();
    let declarators: Vec<tree_sitter::Node<'_>> = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "variable_declarator")
        .collect();
    let [declarator] = declarators.as_slice() else {
        return None;
    };
    if declarator.child_by_field_name("type").is_some() {
        return None;
    }

    let module = required_module(unit, *declarator)?;
    let binding = import_binding(unit, declarator.child_by_field_name("name")?)?;
    Some(Edit::replace(
        node.byte_range(),
        format!("import {binding} from {module};"),
    ))
}

/// Returns the module specifier (with its quotes) when the declarator's
/// value is a direct `require("...")` call.
fn required_module<'unit>(
    unit: &'unit ParsedUnit,
    declarator: tree_sitter::Node<'_>,
) -> Option<&'unit str> {
    let value = declarator.child_by_field_name("value")?;
    if value.kind() != "call_expression" {
        return None;
    }
    let function = value.child_by_field_name("function")?;
    if function.kind() != "identifier" || unit.node_text(function) != "require" {
        return None;
    }
    let arguments = value.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let named: Vec<tree_sitter::Node<'_>> = arguments.named_children(&mut cursor).collect();
    let [argument] = named.as_slice() else {
        return None;
    };
    (argument.kind() == "string").then(|| unit.node_text(*argument))
}

fn import_binding(unit: &ParsedUnit, name: tree_sitter::Node<'_>) -> Option<String> {
    match name.kind() {
        "identifier" => Some(unit.node_text(name).to_owned()),
        "object_pattern" => {
            let mut cursor = name.walk();
            let mut bindings = Vec::new();
            for entry in name.named_children(&mut cursor) {
                if entry.kind() != "shorthand_property_identifier_pattern" {
                    return None;
                }
                bindings.push(unit.node_text(entry));
            }
            if bindings.is_empty() {
                return None;
            }
            Some(format!("{{ {} }}", bindings.join(", ")))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use typemend_engine::apply_edits;

    use super::*;

    fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 tempdir")
    }

    fn include() -> Vec<String> {
        vec!["**/*.ts".to_owned()]
    }

    #[test]
    fn rewrites_default_and_named_requires() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = utf8_root(&dir);
        fs::create_dir_all(root.join("src")).expect("mkdir");
        let source = "const fs = require(\"fs\");\nconst { join, resolve } = require(\"path\");\n";
        fs::write(root.join("src/io.ts"), source).expect("write unit");
        let modified = ModifiedUnits::new();

        let wave = require_rewrite_wave(&root, &include(), &modified).expect("wave");
        let edits = wave.edits().expect("alive wave");
        let unit_edits = edits.get(Utf8Path::new("src/io.ts")).expect("unit edits");
        let updated = apply_edits(source, unit_edits).expect("apply");

        insta::assert_snapshot!(updated, @r#"
        import fs from "fs";
        import { join, resolve } from "path";
        "#);
        assert!(modified.contains(Utf8Path::new("src/io.ts")));
    }

    #[test]
    fn leaves_non_require_declarations_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = utf8_root(&dir);
        fs::write(
            root.join("plain.ts"),
            "const x = compute();\nconst y = require(\"m\").deep;\n",
        )
        .expect("write unit");
        let modified = ModifiedUnits::new();

        let wave = require_rewrite_wave(&root, &include(), &modified).expect("wave");
        assert!(wave.is_exhausted(), "nothing to rewrite must exhaust");
        assert!(modified.is_empty());
    }

    #[test]
    fn multi_declarator_statements_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = utf8_root(&dir);
        fs::write(
            root.join("multi.ts"),
            "const a = require(\"a\"), b = require(\"b\");\n",
        )
        .expect("write unit");
        let modified = ModifiedUnits::new();

        let wave = require_rewrite_wave(&root, &include(), &modified).expect("wave");
        assert!(wave.is_exhausted());
    }
}
