#![doc = include_str!("../README.md")]

pub mod config;
pub mod pool;
pub mod sequential;
pub mod storage;
pub mod summary;
pub mod telemetry;

use actlog_core::Result;
use config::{Mode, PipelineConfig};
use std::sync::Arc;
use storage::UserStore;
use summary::RunSummary;

/// Runs the job in the configured [`Mode`].
pub async fn run<S>(config: &PipelineConfig, store: Arc<S>) -> Result<RunSummary>
where
    S: UserStore,
{
    match config.mode {
        Mode::Pool => pool::run_pool(config, store).await,
        Mode::Sequential => sequential::run_sequential(config, store.as_ref()).await,
    }
}
