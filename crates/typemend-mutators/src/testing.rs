//! Shared helpers for mutator unit tests.

use camino::Utf8Path;
use typemend_engine::{
    AnalyzedUnit, Mutator, NameGenerator, SemanticContext, UnitRequest, apply_edits,
};
use typemend_syntax::{ParsedUnit, ProjectContext, SourceLanguage, UnitParser};

pub(crate) fn parse_unit(source: &str) -> ParsedUnit {
    let mut parser = UnitParser::new().expect("parser init");
    parser
        .parse(SourceLanguage::TypeScript, source)
        .expect("parse")
}

/// Runs one mutator against a single-unit context and applies its edits.
pub(crate) fn apply_mutator(mutator: &dyn Mutator<ProjectContext>, source: &str) -> String {
    let unit_id = Utf8Path::new("src/unit.ts");
    let context = ProjectContext::from_parsed(vec![(unit_id.to_owned(), parse_unit(source))]);
    let unit = context.resolve(unit_id).expect("unit resolves");
    let mut names = NameGenerator::new(unit.identifiers().clone());
    let mut request = UnitRequest {
        unit_id,
        unit,
        context: &context,
        names: &mut names,
    };
    let edits = mutator.propose(&mut request).expect("propose");
    apply_edits(unit.source(), &edits).expect("apply")
}

#[test]
fn apply_mutator_round_trips_untouched_sources() {
    struct Inert;
    impl Mutator<ProjectContext> for Inert {
        fn name(&self) -> &'static str {
            "inert"
        }

        fn propose(
            &self,
            _request: &mut UnitRequest<'_, ProjectContext>,
        ) -> Result<Vec<typemend_engine::Edit>, typemend_engine::EngineError> {
            Ok(Vec::new())
        }
    }

    let source = "const a = 1;\n";
    assert_eq!(apply_mutator(&Inert, source), source);
}
