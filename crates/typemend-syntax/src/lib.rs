//! Tree-sitter backed semantic analysis for Typemend.
//!
//! This crate is the engine's semantic-analysis service: it enumerates a
//! project's compilation units, parses them into [`ParsedUnit`]s, and exposes
//! the result as a [`ProjectContext`] implementing the engine's
//! `SemanticContext` contract. Construction is expensive (every matched unit
//! is read and parsed) and querying is cheap, which is exactly the profile
//! the engine's once-per-sweep context cache is built around; an internal
//! content-hash-validated parse cache keeps sweep rebuilds from re-parsing
//! units the driver never touched.

pub mod error;
pub mod language;
pub mod parser;
pub mod project;
pub mod unit;

pub use self::error::SyntaxError;
pub use self::language::{LanguageParseError, SourceLanguage};
pub use self::parser::UnitParser;
pub use self::project::{ProjectContext, ProjectLoader};
pub use self::unit::{ParseErrorInfo, ParsedUnit};
