//! Priority composition of wave providers.
//!
//! The chain is what lets passes with different run-once-vs-run-repeatedly
//! semantics share one driving loop without knowing about each other:
//! earlier providers must exhaust before later providers are ever consulted,
//! which is also what guarantees the write-before-read ordering on the
//! shared [`crate::ModifiedUnits`] set.

use tracing::debug;

use crate::error::EngineError;
use crate::provider::WaveProvider;
use crate::wave::Wave;

const COMPOSE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::compose");

/// A fixed priority chain of wave providers exposed as one provider.
///
/// On each call the chain tries its providers strictly in list order. The
/// first provider returning a non-exhausted wave (even an empty one) ends
/// the round: providers after it are not consulted, so a multi-step early
/// pass fully finishes, across as many calls as it needs, before any later
/// pass starts. When every provider reports exhaustion the chain itself is
/// exhausted and the overall run is complete.
pub struct ProviderChain {
    providers: Vec<Box<dyn WaveProvider>>,
}

impl ProviderChain {
    /// Creates a chain over providers in priority order.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn WaveProvider>>) -> Self {
        Self { providers }
    }

    /// Returns the number of composed providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` when the chain composes no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl WaveProvider for ProviderChain {
    fn next_wave(&mut self) -> Result<Wave, EngineError> {
        for (index, provider) in self.providers.iter_mut().enumerate() {
            match provider.next_wave()? {
                Wave::Exhausted => continue,
                wave => {
                    debug!(
                        target: COMPOSE_TARGET,
                        provider = index,
                        edits = wave.edit_count(),
                        "provider produced a wave"
                    );
                    return Ok(wave);
                }
            }
        }
        debug!(target: COMPOSE_TARGET, "all providers exhausted");
        Ok(Wave::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use camino::Utf8PathBuf;

    use super::*;
    use crate::testing::ScriptedProvider;
    use crate::wave::{Edit, WaveEdits};

    fn one_edit_wave(unit: &str) -> Wave {
        let mut edits = WaveEdits::new();
        edits.insert(Utf8PathBuf::from(unit), vec![Edit::insert(0, "x")]);
        Wave::More(edits)
    }

    #[test]
    fn first_non_exhausted_wave_wins_and_stops_the_round() {
        let first = ScriptedProvider::new(vec![Ok(one_edit_wave("src/a.ts"))]);
        let second = ScriptedProvider::new(vec![Ok(one_edit_wave("src/b.ts"))]);
        let second_calls = Rc::clone(&second.calls);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        let wave = chain.next_wave().expect("wave");
        assert_eq!(wave, one_edit_wave("src/a.ts"));
        assert_eq!(second_calls.get(), 0, "later provider must not be consulted");
    }

    #[test]
    fn empty_but_alive_wave_still_stops_the_round() {
        let first = ScriptedProvider::new(vec![Ok(Wave::empty())]);
        let second = ScriptedProvider::new(vec![Ok(one_edit_wave("src/b.ts"))]);
        let second_calls = Rc::clone(&second.calls);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        let wave = chain.next_wave().expect("wave");
        assert_eq!(wave, Wave::empty());
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn exhausted_providers_are_skipped_within_one_round() {
        let first = ScriptedProvider::new(vec![]);
        let second = ScriptedProvider::new(vec![Ok(one_edit_wave("src/b.ts"))]);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        assert_eq!(chain.next_wave().expect("wave"), one_edit_wave("src/b.ts"));
    }

    #[test]
    fn chain_exhausts_when_every_provider_is_exhausted() {
        let first = ScriptedProvider::new(vec![]);
        let second = ScriptedProvider::new(vec![]);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        assert!(chain.next_wave().expect("wave").is_exhausted());
        assert!(chain.next_wave().expect("wave").is_exhausted());
    }

    #[test]
    fn provider_errors_abort_the_round() {
        let first = ScriptedProvider::new(vec![Err(EngineError::configuration("broken"))]);
        let second = ScriptedProvider::new(vec![Ok(one_edit_wave("src/b.ts"))]);
        let second_calls = Rc::clone(&second.calls);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        assert!(chain.next_wave().is_err());
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn earlier_provider_finishes_across_calls_before_later_starts() {
        let first = ScriptedProvider::new(vec![
            Ok(one_edit_wave("src/a.ts")),
            Ok(one_edit_wave("src/b.ts")),
        ]);
        let second = ScriptedProvider::new(vec![Ok(one_edit_wave("src/c.ts"))]);
        let mut chain = ProviderChain::new(vec![Box::new(first), Box::new(second)]);

        assert_eq!(chain.next_wave().expect("wave"), one_edit_wave("src/a.ts"));
        assert_eq!(chain.next_wave().expect("wave"), one_edit_wave("src/b.ts"));
        assert_eq!(chain.next_wave().expect("wave"), one_edit_wave("src/c.ts"));
        assert!(chain.next_wave().expect("wave").is_exhausted());
    }
}
