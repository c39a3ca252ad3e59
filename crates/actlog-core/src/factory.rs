use crate::{EMAIL_DOMAIN, LogGenerator, User};
use rand::Rng;

/// Builds [`User`] records from task indices.
///
/// Identity is a pure function of the task index: `id = index + 1` and the
/// email is derived from the id. Only the activity log is random; its length
/// is drawn uniformly from `[0, max_log_entries)`.
#[derive(Clone, Debug)]
pub struct UserFactory {
    generator: LogGenerator,
    max_log_entries: usize,
}

impl UserFactory {
    pub const fn new(generator: LogGenerator, max_log_entries: usize) -> Self {
        Self {
            generator,
            max_log_entries,
        }
    }

    pub const fn generator(&self) -> &LogGenerator {
        &self.generator
    }

    pub const fn max_log_entries(&self) -> usize {
        self.max_log_entries
    }

    /// Maps a zero-based task index to its one-based user id.
    pub const fn user_id(index: u64) -> u64 {
        index + 1
    }

    pub fn email_for(id: u64) -> String {
        format!("user{id}@{EMAIL_DOMAIN}")
    }

    /// Builds the user for task `index` with a random-length activity log.
    pub fn build<R>(&self, rng: &mut R, index: u64) -> User
    where
        R: Rng + ?Sized,
    {
        let len = if self.max_log_entries == 0 {
            0
        } else {
            rng.random_range(0..self.max_log_entries)
        };
        self.build_with_len(rng, index, len)
    }

    /// Builds the user for task `index` with exactly `len` log entries.
    pub fn build_with_len<R>(&self, rng: &mut R, index: u64, len: usize) -> User
    where
        R: Rng + ?Sized,
    {
        let id = Self::user_id(index);
        User {
            id,
            email: Self::email_for(id),
            logs: self.generator.generate(rng, len),
        }
    }
}
