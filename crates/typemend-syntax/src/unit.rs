//! Parsed compilation units and their analyzed metadata.
//!
//! A [`ParsedUnit`] is one source file's analyzed form: the text that was
//! parsed, its Tree-sitter tree, the set of identifiers declared anywhere in
//! it (seeding collision-free synthetic names), and a content hash used to
//! decide whether a cached parse is still valid on sweep rebuilds.

use std::collections::BTreeSet;
use std::ops::Range;

use sha2::{Digest, Sha256};
use typemend_engine::AnalyzedUnit;

use crate::language::SourceLanguage;

/// Node kinds whose text counts as a declared identifier.
fn is_identifier_kind(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "type_identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier"
    )
}

/// One compilation unit's parsed form.
///
/// Tree-sitter is error-tolerant, so a unit may hold both a valid tree and
/// error nodes; [`ParsedUnit::parse_errors`] summarises the latter.
#[derive(Debug)]
pub struct ParsedUnit {
    source: String,
    tree: tree_sitter::Tree,
    language: SourceLanguage,
    identifiers: BTreeSet<String>,
    content_hash: [u8; 32],
}

impl ParsedUnit {
    pub(crate) fn new(source: String, tree: tree_sitter::Tree, language: SourceLanguage) -> Self {
        let mut identifiers = BTreeSet::new();
        collect_identifiers(tree.root_node(), &source, &mut identifiers);
        let content_hash: [u8; 32] = Sha256::digest(source.as_bytes()).into();
        Self {
            source,
            tree,
            language,
            identifiers,
            content_hash,
        }
    }

    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the language the unit was parsed with.
    #[must_use]
    pub const fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Returns the SHA-256 hash of the unit's source text.
    #[must_use]
    pub const fn content_hash(&self) -> &[u8; 32] {
        &self.content_hash
    }

    /// Returns the source text of a node within this unit.
    ///
    /// Returns an empty string if the node's byte range is not valid UTF-8,
    /// which cannot happen for nodes obtained from this unit's own tree.
    #[must_use]
    pub fn node_text(&self, node: tree_sitter::Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Returns whether the parse produced any error or missing nodes.
    #[must_use]
    pub fn has_parse_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Collects all syntax errors found in the unit.
    #[must_use]
    pub fn parse_errors(&self) -> Vec<ParseErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }
}

impl AnalyzedUnit for ParsedUnit {
    fn source(&self) -> &str {
        &self.source
    }

    fn identifiers(&self) -> &BTreeSet<String> {
        &self.identifiers
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: usize,
    /// Column number (one-based) where the error starts.
    pub column: usize,
    /// A snippet of the problematic source text.
    pub context: String,
    /// Human-readable description of the error.
    pub message: String,
}

impl ParseErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let start = node.start_position();
        let byte_range = node.byte_range();

        // Truncate long error spans so diagnostics stay one line.
        let context = source
            .get(byte_range.clone())
            .map(|text| {
                if text.len() > 50 {
                    let truncated: String = text.chars().take(47).collect();
                    format!("{truncated}...")
                } else {
                    text.to_owned()
                }
            })
            .unwrap_or_default();

        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_owned()
        };

        Self {
            byte_range,
            line: start.row + 1,
            column: start.column + 1,
            context,
            message,
        }
    }
}

fn collect_identifiers(
    node: tree_sitter::Node<'_>,
    source: &str,
    identifiers: &mut BTreeSet<String>,
) {
    if is_identifier_kind(node.kind())
        && let Ok(text) = node.utf8_text(source.as_bytes())
    {
        identifiers.insert(text.to_owned());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_identifiers(child, source, identifiers);
    }
}

fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<ParseErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(ParseErrorInfo::from_node(node, source));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}
