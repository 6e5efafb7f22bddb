//! Project enumeration and the semantic-context implementation.
//!
//! [`ProjectLoader`] is the engine's [`ContextLoader`]: it walks the project
//! root, filters units through the configured include patterns, parses each
//! matched unit, and assembles a [`ProjectContext`]. Building the context is
//! the expensive per-sweep operation, so parses are memoized in an LRU cache
//! keyed by unit path and validated by content hash: a sweep rebuild only
//! re-parses the units whose text actually changed.

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroUsize;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use lru::LruCache;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use typemend_engine::{ContextLoader, EngineError, SemanticContext};

use crate::error::SyntaxError;
use crate::language::SourceLanguage;
use crate::parser::UnitParser;
use crate::unit::ParsedUnit;

const PROJECT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::project");

const PARSE_CACHE_CAPACITY: usize = 512;

/// Semantic analysis over one project: the ordered unit list plus each
/// unit's parsed form.
///
/// Units that could not be read or parsed stay listed in the unit order but
/// resolve to `None`; the engine's scanner warns and skips them.
#[derive(Debug)]
pub struct ProjectContext {
    ids: Vec<Utf8PathBuf>,
    units: BTreeMap<Utf8PathBuf, Rc<ParsedUnit>>,
}

impl ProjectContext {
    /// Assembles a context from already-parsed units.
    ///
    /// The unit order is the lexicographic order of the unit ids, matching
    /// what [`ProjectLoader`] produces for on-disk projects.
    #[must_use]
    pub fn from_parsed(units: Vec<(Utf8PathBuf, ParsedUnit)>) -> Self {
        let units: BTreeMap<Utf8PathBuf, Rc<ParsedUnit>> = units
            .into_iter()
            .map(|(id, unit)| (id, Rc::new(unit)))
            .collect();
        let ids = units.keys().cloned().collect();
        Self { ids, units }
    }

    fn new(ids: Vec<Utf8PathBuf>, units: BTreeMap<Utf8PathBuf, Rc<ParsedUnit>>) -> Self {
        Self { ids, units }
    }
}

impl SemanticContext for ProjectContext {
    type Unit = ParsedUnit;

    fn unit_ids(&self) -> &[Utf8PathBuf] {
        &self.ids
    }

    fn resolve(&self, unit: &Utf8Path) -> Option<&ParsedUnit> {
        self.units.get(unit).map(|parsed| parsed.as_ref())
    }
}

struct CachedParse {
    hash: [u8; 32],
    unit: Rc<ParsedUnit>,
}

/// Enumerates and parses a project's units, reusing parses across sweeps.
///
/// Unit ids are project-root-relative UTF-8 paths, sorted lexicographically
/// so sweeps visit units in a fixed, deterministic order.
pub struct ProjectLoader {
    root: Utf8PathBuf,
    patterns: Vec<String>,
    include: GlobSet,
    parser: UnitParser,
    cache: LruCache<Utf8PathBuf, CachedParse>,
}

impl ProjectLoader {
    /// Creates a loader over the project root with the given include
    /// patterns.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Pattern`] when an include pattern is not a
    /// valid glob, or [`SyntaxError::ParserInit`] when a grammar cannot be
    /// initialised.
    pub fn new(root: impl Into<Utf8PathBuf>, include: &[String]) -> Result<Self, SyntaxError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in include {
            let glob = Glob::new(pattern)
                .map_err(|error| SyntaxError::pattern(pattern, error.to_string()))?;
            builder.add(glob);
        }
        let include_set = builder
            .build()
            .map_err(|error| SyntaxError::pattern(include.join(", "), error.to_string()))?;

        Ok(Self {
            root: root.into(),
            patterns: include.to_vec(),
            include: include_set,
            parser: UnitParser::new()?,
            cache: LruCache::new(
                NonZeroUsize::new(PARSE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
        })
    }

    /// Returns the project root the loader walks.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Walks the project root and returns the matched unit ids in sweep
    /// order.
    #[must_use]
    pub fn enumerate(&self) -> Vec<Utf8PathBuf> {
        let mut ids = Vec::new();
        for walked in WalkBuilder::new(self.root.as_std_path()).build() {
            let entry = match walked {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(target: PROJECT_TARGET, %error, "skipping unwalkable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(self.root.as_std_path()) else {
                continue;
            };
            let Ok(unit_id) = Utf8PathBuf::from_path_buf(relative.to_path_buf()) else {
                warn!(
                    target: PROJECT_TARGET,
                    path = %relative.display(),
                    "skipping non-UTF-8 unit path"
                );
                continue;
            };
            if SourceLanguage::from_path(&unit_id).is_some() && self.include.is_match(&unit_id) {
                ids.push(unit_id);
            }
        }
        ids.sort();
        ids
    }

    fn parse_unit(&mut self, unit_id: &Utf8Path) -> Option<Rc<ParsedUnit>> {
        let source = match fs::read_to_string(self.root.join(unit_id)) {
            Ok(source) => source,
            Err(error) => {
                warn!(target: PROJECT_TARGET, unit = %unit_id, %error, "could not read unit");
                return None;
            }
        };
        let hash: [u8; 32] = Sha256::digest(source.as_bytes()).into();
        if let Some(cached) = self.cache.get(unit_id)
            && cached.hash == hash
        {
            return Some(Rc::clone(&cached.unit));
        }

        let language = SourceLanguage::from_path(unit_id)?;
        let unit = match self.parser.parse(language, &source) {
            Ok(unit) => Rc::new(unit),
            Err(error) => {
                warn!(target: PROJECT_TARGET, unit = %unit_id, %error, "could not parse unit");
                return None;
            }
        };
        if unit.has_parse_errors() {
            warn!(
                target: PROJECT_TARGET,
                unit = %unit_id,
                errors = unit.parse_errors().len(),
                "unit parses with syntax errors"
            );
        }
        self.cache.put(
            unit_id.to_owned(),
            CachedParse {
                hash,
                unit: Rc::clone(&unit),
            },
        );
        Some(unit)
    }
}

impl ContextLoader for ProjectLoader {
    type Context = ProjectContext;

    fn load(&mut self) -> Result<ProjectContext, EngineError> {
        info!(target: PROJECT_TARGET, root = %self.root, "preparing analysis for project units");
        let ids = self.enumerate();
        if ids.is_empty() {
            return Err(EngineError::configuration(format!(
                "no units matched include patterns [{}] under '{}'",
                self.patterns.join(", "),
                self.root,
            )));
        }

        let mut units = BTreeMap::new();
        for unit_id in &ids {
            if let Some(unit) = self.parse_unit(unit_id) {
                units.insert(unit_id.clone(), unit);
            }
        }
        info!(
            target: PROJECT_TARGET,
            units = ids.len(),
            "prepared analysis for project units"
        );
        Ok(ProjectContext::new(ids, units))
    }
}

#[cfg(test)]
mod tests {
    use typemend_engine::AnalyzedUnit;

    use super::*;

    fn write_unit(root: &std::path::Path, name: &str, text: &str) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create unit directory");
        }
        fs::write(path, text).expect("write unit");
    }

    fn loader_over(root: &std::path::Path, include: &[&str]) -> ProjectLoader {
        let patterns: Vec<String> = include.iter().map(|glob| (*glob).to_owned()).collect();
        let utf8_root = Utf8PathBuf::from_path_buf(root.to_path_buf()).expect("UTF-8 tempdir");
        ProjectLoader::new(utf8_root, &patterns).expect("loader")
    }

    #[test]
    fn enumerates_matched_units_in_sorted_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_unit(dir.path(), "src/b.ts", "const b = 1;\n");
        write_unit(dir.path(), "src/a.ts", "const a = 1;\n");
        write_unit(dir.path(), "src/notes.md", "not a unit\n");
        let loader = loader_over(dir.path(), &["src/**/*.ts"]);

        assert_eq!(
            loader.enumerate(),
            vec![Utf8PathBuf::from("src/a.ts"), Utf8PathBuf::from("src/b.ts")]
        );
    }

    #[test]
    fn include_patterns_filter_by_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_unit(dir.path(), "src/a.ts", "const a = 1;\n");
        write_unit(dir.path(), "scripts/b.ts", "const b = 1;\n");
        let loader = loader_over(dir.path(), &["src/**/*.ts"]);

        assert_eq!(loader.enumerate(), vec![Utf8PathBuf::from("src/a.ts")]);
    }

    #[test]
    fn load_builds_a_resolvable_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_unit(dir.path(), "src/a.ts", "const a = 1;\n");
        let mut loader = loader_over(dir.path(), &["**/*.ts"]);

        let context = loader.load().expect("load");
        let unit = context
            .resolve(Utf8Path::new("src/a.ts"))
            .expect("resolvable unit");
        assert_eq!(unit.source(), "const a = 1;\n");
        assert!(unit.identifiers().contains("a"));
    }

    #[test]
    fn load_fails_when_nothing_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_unit(dir.path(), "README.md", "no units here\n");
        let mut loader = loader_over(dir.path(), &["**/*.ts"]);

        let error = loader.load().expect_err("empty project must fail");
        assert!(matches!(error, EngineError::Configuration { .. }));
    }

    #[test]
    fn rebuild_reuses_unchanged_parses_and_reparses_mutated_units() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_unit(dir.path(), "src/a.ts", "const a = 1;\n");
        write_unit(dir.path(), "src/b.ts", "const b = 1;\n");
        let mut loader = loader_over(dir.path(), &["**/*.ts"]);

        let first = loader.load().expect("first load");
        let first_a = first.resolve(Utf8Path::new("src/a.ts")).expect("a");
        let first_a_hash = *first_a.content_hash();

        write_unit(dir.path(), "src/b.ts", "const b: number = 1;\n");
        let second = loader.load().expect("second load");

        let second_a = second.resolve(Utf8Path::new("src/a.ts")).expect("a");
        assert_eq!(*second_a.content_hash(), first_a_hash);

        let second_b = second.resolve(Utf8Path::new("src/b.ts")).expect("b");
        assert_eq!(second_b.source(), "const b: number = 1;\n");
        let expected: [u8; 32] = Sha256::digest(b"const b: number = 1;\n").into();
        assert_eq!(*second_b.content_hash(), expected);
    }

    #[test]
    fn from_parsed_orders_units_lexicographically() {
        let mut parser = UnitParser::new().expect("parser");
        let unit_b = parser
            .parse(SourceLanguage::TypeScript, "const b = 1;\n")
            .expect("parse");
        let unit_a = parser
            .parse(SourceLanguage::TypeScript, "const a = 1;\n")
            .expect("parse");
        let context = ProjectContext::from_parsed(vec![
            (Utf8PathBuf::from("src/b.ts"), unit_b),
            (Utf8PathBuf::from("src/a.ts"), unit_a),
        ]);

        assert_eq!(
            context.unit_ids(),
            &[Utf8PathBuf::from("src/a.ts"), Utf8PathBuf::from("src/b.ts")]
        );
    }
}
