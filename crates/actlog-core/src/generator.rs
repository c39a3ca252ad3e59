use crate::{ActionVocabulary, LogEntry};
use chrono::Utc;
use rand::Rng;

/// Produces batches of random [`LogEntry`] values.
///
/// Each entry's action is drawn uniformly from the injected
/// [`ActionVocabulary`] and stamped with the wall-clock time at which it was
/// generated, so entries within one batch carry nearly identical timestamps.
///
/// The random source is supplied per call. Pass `&mut rand::rng()` in
/// production and a seeded `StdRng` in tests.
#[derive(Clone, Debug, Default)]
pub struct LogGenerator {
    actions: ActionVocabulary,
}

impl LogGenerator {
    pub const fn new(actions: ActionVocabulary) -> Self {
        Self { actions }
    }

    pub const fn actions(&self) -> &ActionVocabulary {
        &self.actions
    }

    /// Generates exactly `count` entries. `count == 0` yields an empty vec.
    pub fn generate<R>(&self, rng: &mut R, count: usize) -> Vec<LogEntry>
    where
        R: Rng + ?Sized,
    {
        (0..count)
            .map(|_| LogEntry::new(self.actions.choose(rng).clone(), Utc::now()))
            .collect()
    }
}
