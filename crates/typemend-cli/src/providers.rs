//! Single-use post-processing waves that run after the core scan.
//!
//! Both waves read the shared modified-units set, so they only make sense
//! after the scanner has exhausted; the provider chain's priority order
//! guarantees that. They read each unit's current on-disk text, because by
//! the time they run, earlier waves have already been applied.

use camino::Utf8Path;
use typemend_config::FileMarkers;
use typemend_engine::{Edit, EngineError, ModifiedUnits, UnitStore, Wave, WaveEdits};

use crate::runtime::FsStore;

/// Produces one wave inserting the configured marker texts into every unit
/// modified by earlier waves.
///
/// Units already carrying a marker are skipped, so re-running the tool does
/// not stack markers. The below marker is inserted before the unit's final
/// newline rather than after it.
///
/// # Errors
///
/// Returns [`EngineError::ReadUnit`] when a modified unit cannot be read
/// back from disk.
pub(crate) fn mark_files_modified_wave(
    root: &Utf8Path,
    markers: &FileMarkers,
    modified: &ModifiedUnits,
) -> Result<Wave, EngineError> {
    if markers.is_empty() {
        return Ok(Wave::Exhausted);
    }

    let store = FsStore::new(root.to_owned());
    let mut edits = WaveEdits::new();
    for unit in modified.snapshot() {
        let text = store.read_unit(&unit)?;
        let unit_edits = marker_edits(&text, markers);
        if !unit_edits.is_empty() {
            edits.insert(unit, unit_edits);
        }
    }

    if edits.is_empty() {
        Ok(Wave::Exhausted)
    } else {
        Ok(Wave::More(edits))
    }
}

/// Produces one wave appending a final newline to every modified unit that
/// lost one, keeping formatted output stable for downstream tooling.
///
/// # Errors
///
/// Returns [`EngineError::ReadUnit`] when a modified unit cannot be read
/// back from disk.
pub(crate) fn trailing_newline_wave(
    root: &Utf8Path,
    modified: &ModifiedUnits,
) -> Result<Wave, EngineError> {
    let store = FsStore::new(root.to_owned());
    let mut edits = WaveEdits::new();
    for unit in modified.snapshot() {
        let text = store.read_unit(&unit)?;
        if !text.is_empty() && !text.ends_with('\n') {
            edits.insert(unit, vec![Edit::insert(text.len(), "\n")]);
        }
    }

    if edits.is_empty() {
        Ok(Wave::Exhausted)
    } else {
        Ok(Wave::More(edits))
    }
}

fn marker_edits(text: &str, markers: &FileMarkers) -> Vec<Edit> {
    let trimmed = text.trim();
    let mut edits = Vec::new();
    if !markers.above.is_empty() && !trimmed.starts_with(&markers.above) {
        edits.push(Edit::insert(0, format!("{}\n", markers.above)));
    }
    if !markers.below.is_empty() && !trimmed.ends_with(&markers.below) {
        edits.push(Edit::insert(
            insertion_index_before_final_newline(text),
            format!("\n{}", markers.below),
        ));
    }
    edits
}

/// Returns the offset just before the unit's final line ending, so the
/// below marker lands on its own line instead of after the terminator.
fn insertion_index_before_final_newline(text: &str) -> usize {
    let without_lf = text.strip_suffix('\n').unwrap_or(text);
    let without_cr = without_lf.strip_suffix('\r').unwrap_or(without_lf);
    without_cr.len()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use rstest::rstest;
    use typemend_engine::apply_edits;

    use super::*;

    #[rstest]
    #[case("", 0)]
    #[case("x", 1)]
    #[case("x\n", 1)]
    #[case("x\r\n", 1)]
    #[case("x\n\n", 2)]
    fn final_newline_index_lands_before_the_terminator(
        #[case] text: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(insertion_index_before_final_newline(text), expected);
    }

    fn markers(above: &str, below: &str) -> FileMarkers {
        FileMarkers {
            above: above.to_owned(),
            below: below.to_owned(),
        }
    }

    #[test]
    fn marker_edits_wrap_the_unit() {
        let edits = marker_edits("const a = 1;\n", &markers("// above", "// below"));
        let updated = apply_edits("const a = 1;\n", &edits).expect("apply");
        assert_eq!(updated, "// above\nconst a = 1;\n// below\n");
    }

    #[test]
    fn existing_markers_are_not_stacked() {
        let text = "// above\nconst a = 1;\n// below\n";
        assert!(marker_edits(text, &markers("// above", "// below")).is_empty());
    }

    fn temp_project(files: &[(&str, &str)]) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 tempdir");
        for (name, text) in files {
            fs::write(root.join(name), text).expect("write unit");
        }
        (dir, root)
    }

    #[test]
    fn mark_wave_touches_only_modified_units() {
        let (_dir, root) = temp_project(&[
            ("touched.ts", "const a = 1;\n"),
            ("untouched.ts", "const b = 2;\n"),
        ]);
        let modified = ModifiedUnits::new();
        modified.record("touched.ts".into());

        let wave =
            mark_files_modified_wave(&root, &markers("// typemend", ""), &modified).expect("wave");
        let edits = wave.edits().expect("alive wave");
        assert_eq!(edits.len(), 1);
        assert!(edits.contains_key(Utf8Path::new("touched.ts")));
    }

    #[test]
    fn empty_markers_exhaust_immediately() {
        let (_dir, root) = temp_project(&[("a.ts", "const a = 1;\n")]);
        let modified = ModifiedUnits::new();
        modified.record("a.ts".into());

        let wave = mark_files_modified_wave(&root, &markers("", ""), &modified).expect("wave");
        assert!(wave.is_exhausted());
    }

    #[test]
    fn newline_wave_restores_missing_terminators() {
        let (_dir, root) = temp_project(&[("a.ts", "const a = 1;"), ("b.ts", "const b = 2;\n")]);
        let modified = ModifiedUnits::new();
        modified.record("a.ts".into());
        modified.record("b.ts".into());

        let wave = trailing_newline_wave(&root, &modified).expect("wave");
        let edits = wave.edits().expect("alive wave");
        assert_eq!(edits.len(), 1);
        assert!(edits.contains_key(Utf8Path::new("a.ts")));
    }
}
