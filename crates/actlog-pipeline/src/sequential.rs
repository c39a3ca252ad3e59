//! Single-task baseline used to compare against the worker pool.
//!
//! Every user is generated first, one at a time with a fixed pause between
//! them, and only then saved one at a time.

use crate::{config::PipelineConfig, storage::UserStore, summary::RunSummary};
use actlog_core::{LogGenerator, Result, User, UserFactory};
use core::time::Duration;
use std::time::Instant;
use tokio::time::sleep;

/// Builds users for task indices `0..count`, pausing `delay` after each.
pub async fn generate_users(factory: &UserFactory, count: u64, delay: Duration) -> Vec<User> {
    let mut users = Vec::new();

    for index in 0..count {
        let user = factory.build(&mut actlog_core::rand::rng(), index);
        tracing::info!("generated user {}", user.id);
        users.push(user);

        if !delay.is_zero() {
            sleep(delay).await;
        }
    }

    users
}

/// Runs the whole job without concurrency.
///
/// # Errors
///
/// The first save error ends the run; later users are not attempted.
pub async fn run_sequential<S>(config: &PipelineConfig, store: &S) -> Result<RunSummary>
where
    S: UserStore,
{
    let start = Instant::now();
    let factory = UserFactory::new(
        LogGenerator::new(config.actions.clone()),
        config.max_log_entries,
    );

    let users = generate_users(&factory, config.tasks, config.generation_delay).await;

    let mut summary = RunSummary {
        users_generated: users.len() as u64,
        ..Default::default()
    };

    for user in &users {
        tracing::info!("saving user {}", user.id);
        store.save(user).await?;
        summary.users_saved += 1;
        summary.log_entries_written += user.logs.len() as u64;

        if !config.save_delay.is_zero() {
            sleep(config.save_delay).await;
        }
    }

    summary.elapsed = start.elapsed();
    Ok(summary)
}
