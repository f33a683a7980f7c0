//! Engine tunables.

use std::num::NonZero;

use crate::engine::fingerprint::DEFAULT_FINGERPRINT_CAPACITY;

/// Tunables of an [`Engine`](crate::engine::Engine).
///
/// ```
/// # use std::num::NonZero;
/// # use slitherlink::engine::EngineConfig;
/// let mut config = EngineConfig::default();
/// config.fingerprint_capacity(NonZero::new(500).unwrap());
/// assert_eq!(config.get_fingerprint_capacity().get(), 500);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    fingerprint_capacity: NonZero<usize>,
}

impl EngineConfig {
    /// How many board fingerprints the search remembers before forgetting the oldest.
    pub fn fingerprint_capacity(&mut self, capacity: NonZero<usize>) -> &mut Self {
        self.fingerprint_capacity = capacity;
        self
    }

    /// See [`Self::fingerprint_capacity`].
    pub fn get_fingerprint_capacity(&self) -> NonZero<usize> {
        self.fingerprint_capacity
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fingerprint_capacity: DEFAULT_FINGERPRINT_CAPACITY,
        }
    }
}
