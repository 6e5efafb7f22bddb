//! Language detection and Tree-sitter grammar selection.
//!
//! Typemend mutates TypeScript and JavaScript projects. Plain JavaScript and
//! JSX parse cleanly under the TSX grammar, so only two grammars are carried:
//! the pure-TypeScript one for `.ts` files (where `<T>` casts are legal) and
//! the TSX one for everything else.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use thiserror::Error;

/// Grammars a unit can be parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceLanguage {
    /// TypeScript source files (`.ts`, `.mts`, `.cts`).
    #[default]
    TypeScript,
    /// TSX and JavaScript source files (`.tsx`, `.jsx`, `.js`, `.mjs`,
    /// `.cjs`).
    Tsx,
}

impl SourceLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Detects the language from a unit path by examining its extension.
    ///
    /// Returns `None` if the path has no extension or the extension is not
    /// recognised.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        path.extension().and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter grammar for this language.
    #[must_use]
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TypeScript, Self::Tsx]
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SourceLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "tsx" | "javascript" | "js" => Ok(Self::Tsx),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
