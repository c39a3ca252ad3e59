//! Human-readable activity report written for each user.
//!
//! ```text
//! UID: 7; Email: user7@company.com;
//! Activity Log:
//! 0. [logged in] at 2024-05-01T12:00:00Z
//! 1. [created record] at 2024-05-01T12:00:00Z
//! ```

use crate::User;
use chrono::SecondsFormat;
use core::fmt;

/// Borrowing [`fmt::Display`] adapter that renders a user's activity log.
pub struct ActivityReport<'a> {
    user: &'a User,
}

impl fmt::Display for ActivityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UID: {}; Email: {};", self.user.id, self.user.email)?;
        writeln!(f, "Activity Log:")?;
        for (index, entry) in self.user.logs.iter().enumerate() {
            writeln!(
                f,
                "{index}. [{}] at {}",
                entry.action(),
                entry.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
        }
        Ok(())
    }
}

impl User {
    pub const fn report(&self) -> ActivityReport<'_> {
        ActivityReport { user: self }
    }

    pub fn activity_report(&self) -> String {
        self.report().to_string()
    }
}
