use super::{abort::Abort, queue::SharedReceiver};
use crate::storage::UserStore;
use actlog_core::{Result, User};
use core::time::Duration;
use std::sync::Arc;
use tokio::time::sleep;

/// What a single saver task persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaverReport {
    pub users_saved: u64,
    pub log_entries_written: u64,
}

/// Saver task: persists every [`User`] it pulls from the user queue.
///
/// Runs until the user queue is closed and drained. After each write the
/// saver sleeps for `delay` to simulate slow storage.
///
/// A failed save is fatal to the whole run: the saver triggers `abort`, which
/// stops every other stage at its next queue operation, and returns the
/// error. No retry is attempted and remaining users are dropped unsaved.
/// Each save runs under an [`Abort::save_permit`], so a user dequeued just
/// before the abort is dropped rather than saved.
pub async fn saver_loop<S>(
    saver_id: usize,
    users: SharedReceiver<User>,
    store: Arc<S>,
    delay: Duration,
    abort: Abort,
) -> Result<SaverReport>
where
    S: UserStore,
{
    tracing::trace!("Saver {saver_id} started");

    let mut report = SaverReport::default();

    loop {
        let user = tokio::select! {
            biased;
            () = abort.cancelled() => {
                tracing::debug!("Saver {saver_id} aborting");
                break;
            }
            next = users.recv() => match next {
                Some(user) => user,
                None => break,
            },
        };

        let Some(permit) = abort.save_permit().await else {
            tracing::debug!("Saver {saver_id} aborting with user {} unsaved", user.id);
            break;
        };

        tracing::info!("saving user {}", user.id);
        tracing::debug!("WRITING FILE FOR UID {}", user.id);
        let saved = store.save(&user).await;
        drop(permit);

        if let Err(e) = saved {
            tracing::error!("Saver {saver_id} failed to save user {}: {e}", user.id);
            abort.trigger().await;
            return Err(e);
        }

        report.users_saved += 1;
        report.log_entries_written += user.logs.len() as u64;

        if !delay.is_zero() {
            tokio::select! {
                biased;
                () = abort.cancelled() => break,
                () = sleep(delay) => {}
            }
        }
    }

    tracing::trace!(
        "Saver {saver_id} stopped after {} users",
        report.users_saved
    );
    Ok(report)
}
