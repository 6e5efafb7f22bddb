//! Collision-free synthetic identifier generation.

use std::collections::BTreeSet;

/// Derives synthetic identifiers that do not collide with a unit's existing
/// names.
///
/// The generator is created fresh for each unit from that unit's declared
/// identifier set and discarded after the unit's mutator pass. Candidates
/// are derived from a base name by appending an increasing counter; the
/// first non-colliding candidate wins and is recorded so repeated requests
/// within the same unit stay unique.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    taken: BTreeSet<String>,
}

impl NameGenerator {
    /// Creates a generator seeded with the unit's existing identifiers.
    #[must_use]
    pub const fn new(existing: BTreeSet<String>) -> Self {
        Self { taken: existing }
    }

    /// Returns the first candidate derived from `base` that collides with
    /// neither the unit's identifiers nor a previously issued name.
    pub fn generate(&mut self, base: &str) -> String {
        if !self.taken.contains(base) {
            self.taken.insert(base.to_owned());
            return base.to_owned();
        }
        let mut counter: u32 = 2;
        loop {
            let candidate = format!("{base}{counter}");
            if !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn prefers_the_bare_base() {
        let mut names = NameGenerator::new(existing(&["other"]));
        assert_eq!(names.generate("GreetResult"), "GreetResult");
    }

    #[test]
    fn skips_colliding_candidates() {
        let mut names = NameGenerator::new(existing(&["GreetResult", "GreetResult2"]));
        assert_eq!(names.generate("GreetResult"), "GreetResult3");
    }

    #[test]
    fn issued_names_stay_unique_within_a_unit() {
        let mut names = NameGenerator::new(existing(&[]));
        assert_eq!(names.generate("Result"), "Result");
        assert_eq!(names.generate("Result"), "Result2");
        assert_eq!(names.generate("Result"), "Result3");
    }
}
