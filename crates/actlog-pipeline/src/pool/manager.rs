//! Coordinator for the two-stage worker pool.
//!
//! [`run_pool`] owns both queues and both sets of task handles. The handles
//! act as completion barriers: the user queue is only closed once every
//! worker has been joined, and the run only returns once every saver has
//! been joined.

use super::{
    abort::Abort,
    queue,
    saver::{SaverReport, saver_loop},
    worker::worker_loop,
};
use crate::{config::PipelineConfig, storage::UserStore, summary::RunSummary};
use actlog_core::{Error, LogGenerator, Result, User, UserFactory};
use futures::future::join_all;
use std::{sync::Arc, time::Instant};
use tokio::sync::Semaphore;

/// Generates `config.tasks` users and saves them through `store`.
///
/// - Spawns `config.concurrency` worker tasks and as many saver tasks.
/// - Enqueues task indices `0..config.tasks`, then closes the task queue.
/// - Joins every worker, then closes the user queue.
/// - Joins every saver.
///
/// # Errors
///
/// Returns the first save error if any saver failed. The failing saver
/// aborts the run, so the remaining stages stop at their next queue
/// operation; all of them are still joined before this returns. A stage that
/// panicked surfaces as [`Error::StageJoin`].
pub async fn run_pool<S>(config: &PipelineConfig, store: Arc<S>) -> Result<RunSummary>
where
    S: UserStore,
{
    run_pool_with_abort(config, store, Abort::new()).await
}

/// Like [`run_pool`], but driven by a caller-owned [`Abort`].
///
/// Triggering `abort` from outside stops the run the same way a failed save
/// does, and the caller can observe the abort a failing saver triggers.
///
/// # Errors
///
/// Same as [`run_pool`].
pub async fn run_pool_with_abort<S>(
    config: &PipelineConfig,
    store: Arc<S>,
    abort: Abort,
) -> Result<RunSummary>
where
    S: UserStore,
{
    let start = Instant::now();
    let factory = Arc::new(UserFactory::new(
        LogGenerator::new(config.actions.clone()),
        config.max_log_entries,
    ));
    // Configs built by hand skip the CLI limits; the channel panics past them.
    let capacity = config.queue_capacity.clamp(1, Semaphore::MAX_PERMITS);
    let (task_tx, task_rx) = queue::bounded::<u64>(capacity);
    let (user_tx, user_rx) = queue::bounded::<User>(capacity);

    let mut workers = Vec::new();
    let mut savers = Vec::new();

    for unit in 1..=config.concurrency {
        workers.push(tokio::spawn(worker_loop(
            unit,
            task_rx.clone(),
            user_tx.clone(),
            Arc::clone(&factory),
            abort.clone(),
        )));
        savers.push(tokio::spawn(saver_loop(
            unit,
            user_rx.clone(),
            Arc::clone(&store),
            config.save_delay,
            abort.clone(),
        )));
    }

    // Stages own their receivers. Once every consumer of a queue has stopped,
    // sends into it must fail instead of filling it up.
    drop(task_rx);
    drop(user_rx);

    for index in 0..config.tasks {
        if abort.is_triggered() {
            tracing::debug!("Run aborted after enqueueing {index} tasks");
            break;
        }
        if task_tx.send(index).await.is_err() {
            tracing::debug!("Every worker has stopped; {index} tasks enqueued");
            break;
        }
    }
    drop(task_tx);

    let worker_results = join_all(workers).await;
    tracing::debug!("All workers finished, closing user queue");
    drop(user_tx);
    let saver_results = join_all(savers).await;
    tracing::debug!("All savers finished");

    let mut first_error = None;
    let mut saved = SaverReport::default();
    for result in saver_results {
        match result {
            Ok(Ok(report)) => {
                saved.users_saved += report.users_saved;
                saved.log_entries_written += report.log_entries_written;
            }
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(e) => {
                first_error.get_or_insert(Error::StageJoin {
                    stage: "saver",
                    context: e.to_string(),
                });
            }
        }
    }

    let mut users_generated = 0;
    for result in worker_results {
        match result {
            Ok(generated) => users_generated += generated,
            Err(e) => {
                first_error.get_or_insert(Error::StageJoin {
                    stage: "worker",
                    context: e.to_string(),
                });
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    Ok(RunSummary {
        users_generated,
        users_saved: saved.users_saved,
        log_entries_written: saved.log_entries_written,
        elapsed: start.elapsed(),
    })
}
