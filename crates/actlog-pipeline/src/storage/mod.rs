//! Persistence for finished users.
//!
//! The saver stage only depends on [`UserStore`]; [`FileStore`] is the
//! on-disk implementation used by the binary.

mod file;

pub use file::FileStore;

use actlog_core::{Result, User};
use core::future::Future;

/// Destination for finished users.
///
/// Implementations must be safe to call from many saver tasks at once. Each
/// user id is saved at most once per run, so implementations never see two
/// concurrent saves for the same id.
pub trait UserStore: Send + Sync + 'static {
    /// Persists `user`.
    ///
    /// Any error returned here is fatal to the run.
    fn save(&self, user: &User) -> impl Future<Output = Result<()>> + Send;
}
