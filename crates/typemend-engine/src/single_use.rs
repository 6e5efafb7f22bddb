//! Adapter giving a one-shot pass the wave-provider contract.

use crate::error::EngineError;
use crate::provider::WaveProvider;
use crate::wave::Wave;

/// Wraps a one-shot pass so it executes at most once per run.
///
/// The first [`WaveProvider::next_wave`] call consumes and invokes the
/// wrapped action; every later call reports [`Wave::Exhausted`] without
/// invoking it again, regardless of what the action returned. The
/// at-most-once guarantee holds by construction: the action is a [`FnOnce`]
/// stored in an [`Option`] and taken on first use, so a second invocation
/// is not expressible.
pub struct SingleUse<F> {
    action: Option<F>,
}

impl<F> SingleUse<F>
where
    F: FnOnce() -> Result<Wave, EngineError>,
{
    /// Creates the adapter around an unexecuted action.
    #[must_use]
    pub const fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }

    /// Returns `true` once the action has been executed.
    #[must_use]
    pub const fn is_spent(&self) -> bool {
        self.action.is_none()
    }
}

impl<F> WaveProvider for SingleUse<F>
where
    F: FnOnce() -> Result<Wave, EngineError>,
{
    fn next_wave(&mut self) -> Result<Wave, EngineError> {
        match self.action.take() {
            Some(action) => action(),
            None => Ok(Wave::Exhausted),
        }
    }
}
