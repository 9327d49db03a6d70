//! View/data synchronization primitives.
//!
//! Every data-bearing view follows one three-state machine: `Loading`
//! on mount and on every dependency change, then exactly one transition
//! to `Loaded` or `Failed` per triggering event. "No results" is a
//! rendering branch inside `Loaded`, never a separate state.
//!
//! `GenerationCounter` guards against the stale-response race: a fetch
//! started for an old trigger must not overwrite the state of a newer
//! one. Each fetch carries the generation current at its start; on
//! completion the result is applied only if that generation still
//! matches, otherwise it is discarded silently.

use crate::error::ButacaError;

/// The remote-data state of one view.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteData<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> RemoteData<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Builds the terminal state for a completed fetch.
    pub fn from_result(result: Result<T, ButacaError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => Self::Failed(err.user_message()),
        }
    }
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// An opaque per-request token. See [`GenerationCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Issues generation tokens for one view's fetches.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new triggering event, invalidating all tokens issued
    /// before it, and returns the token the new fetch should carry.
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    /// Whether a completed fetch carrying `token` is still the most
    /// recent one for this view.
    pub fn is_current(&self, token: Generation) -> bool {
        self.current == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_default() {
        let state: RemoteData<Vec<u32>> = RemoteData::default();
        assert!(state.is_loading());
        assert!(state.value().is_none());
    }

    #[test]
    fn test_from_result_maps_both_arms() {
        let ok: RemoteData<u32> = RemoteData::from_result(Ok(7));
        assert_eq!(ok.value(), Some(&7));

        let err: RemoteData<u32> =
            RemoteData::from_result(Err(ButacaError::network("timed out")));
        assert!(err.is_failed());
    }

    #[test]
    fn test_newer_generation_invalidates_older_token() {
        let mut counter = GenerationCounter::new();
        let first = counter.begin();
        assert!(counter.is_current(first));

        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
