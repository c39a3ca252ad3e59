use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

/// Action labels used when no vocabulary is configured.
pub const DEFAULT_ACTIONS: [&str; 5] = [
    "logged in",
    "logged out",
    "created record",
    "deleted record",
    "updated account",
];

/// Domain every synthesized email address belongs to.
pub const EMAIL_DOMAIN: &str = "company.com";

/// The fixed set of action labels a [`LogEntry`] may carry.
///
/// Built once at startup and shared read-only by every generator. Cloning is
/// a reference count bump; labels are handed out as `Arc<str>` so log entries
/// never copy the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionVocabulary {
    labels: Arc<[Arc<str>]>,
}

impl ActionVocabulary {
    /// Builds a vocabulary from the given labels.
    ///
    /// Labels are trimmed. Returns [`Error::InvalidConfig`] when no labels are
    /// given or when any label is blank.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref().trim();
                if label.is_empty() {
                    Err(Error::InvalidConfig {
                        reason: "Action labels must not be blank".to_string(),
                    })
                } else {
                    Ok(Arc::<str>::from(label))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        if labels.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "Action vocabulary must contain at least one label".to_string(),
            });
        }

        Ok(Self {
            labels: labels.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; construction rejects empty vocabularies.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.labels.get(index)
    }

    /// Picks a label uniformly at random.
    pub fn choose<R>(&self, rng: &mut R) -> &Arc<str>
    where
        R: Rng + ?Sized,
    {
        // Never empty, so the range is never empty either.
        &self.labels[rng.random_range(0..self.labels.len())]
    }

    pub fn contains(&self, action: &str) -> bool {
        self.labels.iter().any(|label| &**label == action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| &**label)
    }
}

impl Default for ActionVocabulary {
    fn default() -> Self {
        Self {
            labels: DEFAULT_ACTIONS.iter().map(|&label| Arc::from(label)).collect(),
        }
    }
}

/// A single simulated activity event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    action: Arc<str>,
    timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub const fn new(action: Arc<str>, timestamp: DateTime<Utc>) -> Self {
        Self { action, timestamp }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A synthetic user together with its generated activity log.
///
/// Moved by value from the worker stage to the saver stage; only one stage
/// owns a given user at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub logs: Vec<LogEntry>,
}
