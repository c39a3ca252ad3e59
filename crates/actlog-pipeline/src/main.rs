use actlog_pipeline::{
    config::{CliArgs, PipelineConfig},
    storage::FileStore,
    telemetry::init_telemetry,
};
use clap::Parser;
use std::sync::Arc;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = PipelineConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let store = Arc::new(FileStore::create(&config.output_dir, config.truncate).await?);
    let summary = actlog_pipeline::run(&config, store).await?;

    tracing::debug!(
        "Generated {} users, saved {} users with {} log entries",
        summary.users_generated,
        summary.users_saved,
        summary.log_entries_written
    );
    println!("{summary}");
    Ok(())
}

fn log_startup_info(config: &PipelineConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting actlog with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting actlog: {} tasks, {} worker/saver pairs, {:?} mode, writing to {}",
            config.tasks,
            config.concurrency,
            config.mode,
            config.output_dir.display()
        );
    }
}
