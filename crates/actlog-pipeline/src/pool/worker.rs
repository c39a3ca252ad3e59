use super::{abort::Abort, queue::SharedReceiver};
use actlog_core::{User, UserFactory};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Generator task: turns task indices into [`User`]s.
///
/// Pulls indices from the shared task queue until it is closed and drained,
/// builds a user for each through `factory` and pushes it onto the user
/// queue, waiting when that queue is full. Several workers race on the same
/// task queue, so no ordering between them is preserved.
///
/// Returns the number of users this worker produced.
///
/// # Arguments
///
/// - `worker_id`: One-based identifier used in progress lines.
/// - `tasks`: Shared receiving half of the task queue.
/// - `users`: Sending half of the user queue. Dropped on return, which is
///   what lets the user queue close once every worker has finished.
/// - `factory`: Builds users from task indices.
/// - `abort`: Triggered when the run hits a fatal error; the worker then
///   stops at its next queue operation.
pub async fn worker_loop(
    worker_id: usize,
    tasks: SharedReceiver<u64>,
    users: mpsc::Sender<User>,
    factory: Arc<UserFactory>,
    abort: Abort,
) -> u64 {
    tracing::trace!("Worker {worker_id} started");

    let mut generated = 0;

    loop {
        let index = tokio::select! {
            biased;
            () = abort.cancelled() => {
                tracing::debug!("Worker {worker_id} aborting");
                break;
            }
            next = tasks.recv() => match next {
                Some(index) => index,
                None => break,
            },
        };

        let user = factory.build(&mut actlog_core::rand::rng(), index);
        let id = user.id;

        tokio::select! {
            biased;
            () = abort.cancelled() => {
                tracing::debug!("Worker {worker_id} aborting with user {id} unsent");
                break;
            }
            sent = users.send(user) => {
                if sent.is_err() {
                    tracing::debug!("Worker {worker_id} found the user queue closed");
                    break;
                }
            }
        }

        generated += 1;
        tracing::info!(user = id, "worker #{worker_id} finished");
    }

    tracing::trace!("Worker {worker_id} stopped after {generated} users");
    generated
}
