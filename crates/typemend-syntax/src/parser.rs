//! Tree-sitter parsing wrapper producing [`ParsedUnit`]s.

use crate::error::SyntaxError;
use crate::language::SourceLanguage;
use crate::unit::ParsedUnit;

/// Parser holding one configured Tree-sitter instance per grammar.
///
/// Re-parsing a project touches many units in a row, so both grammars are
/// initialised once up front instead of per unit.
pub struct UnitParser {
    typescript: tree_sitter::Parser,
    tsx: tree_sitter::Parser,
}

impl UnitParser {
    /// Creates a parser with both grammars configured.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInit`] if a Tree-sitter parser cannot be
    /// initialised with its grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        Ok(Self {
            typescript: configured(SourceLanguage::TypeScript)?,
            tsx: configured(SourceLanguage::Tsx)?,
        })
    }

    /// Parses source text into a [`ParsedUnit`].
    ///
    /// Tree-sitter is error-tolerant: syntactically broken source still
    /// yields a unit, with the problems reported through
    /// [`ParsedUnit::parse_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Parse`] if the parser fails to produce a tree
    /// at all, which typically indicates a parser configuration issue.
    pub fn parse(
        &mut self,
        language: SourceLanguage,
        source: &str,
    ) -> Result<ParsedUnit, SyntaxError> {
        let parser = match language {
            SourceLanguage::TypeScript => &mut self.typescript,
            SourceLanguage::Tsx => &mut self.tsx,
        };
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(language, "parsing failed"))?;
        Ok(ParsedUnit::new(source.to_owned(), tree, language))
    }
}

fn configured(language: SourceLanguage) -> Result<tree_sitter::Parser, SyntaxError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|error| SyntaxError::parser_init(language, error.to_string()))?;
    Ok(parser)
}
