use core::{fmt, time::Duration};

/// Totals reported once a run has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub users_generated: u64,
    pub users_saved: u64,
    pub log_entries_written: u64,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DONE! Time Elapsed: {:.2} seconds",
            self.elapsed.as_secs_f64()
        )
    }
}
