use actlog_core::{ActionVocabulary, DEFAULT_ACTIONS};
use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use std::path::PathBuf;
use tokio::sync::Semaphore;

/// Largest accepted `TASKS`. Every task sits in a queue at once, and the
/// sequential mode keeps every generated user in memory.
pub const MAX_TASKS: u64 = 100_000_000;

/// Largest accepted `CONCURRENCY`; each unit spawns two tasks.
pub const MAX_CONCURRENCY: usize = 65_536;

/// How users are produced and saved.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Concurrent worker and saver stages connected by bounded queues.
    #[default]
    Pool,
    /// Generate every user one at a time, then save them one at a time.
    Sequential,
}

/// Runtime configuration for the `actlog` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults matching the classic 100 tasks / 20 workers demo.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "actlog",
    version,
    about = "Generate synthetic user activity logs with a worker pool"
)]
pub struct CliArgs {
    /// Number of users to generate and save.
    ///
    /// Environment variable: `TASKS`
    #[arg(long, env = "TASKS", default_value_t = 100)]
    pub tasks: u64,

    /// Number of worker/saver pairs running concurrently.
    ///
    /// One generator task and one saver task are spawned per unit, so the
    /// pool runs `2 * concurrency` tasks in total. Independent of `tasks`.
    ///
    /// Environment variable: `CONCURRENCY`
    #[arg(long, env = "CONCURRENCY", default_value_t = 20)]
    pub concurrency: usize,

    /// Exclusive upper bound on the number of log entries per user.
    ///
    /// Environment variable: `MAX_LOG_ENTRIES`
    #[arg(long, env = "MAX_LOG_ENTRIES", default_value_t = 1000)]
    pub max_log_entries: usize,

    /// Artificial delay after each file write, in milliseconds.
    ///
    /// Simulates slow storage. Set to 0 to save as fast as the disk allows.
    ///
    /// Environment variable: `SAVE_DELAY_MS`
    #[arg(long, env = "SAVE_DELAY_MS", default_value_t = 1000)]
    pub save_delay_ms: u64,

    /// Delay after each generated user in sequential mode, in milliseconds.
    ///
    /// Environment variable: `GENERATION_DELAY_MS`
    #[arg(long, env = "GENERATION_DELAY_MS", default_value_t = 100)]
    pub generation_delay_ms: u64,

    /// Directory receiving one `uid<id>.txt` report per user. Created if
    /// missing.
    ///
    /// Environment variable: `OUTPUT_DIR`
    #[arg(long, env = "OUTPUT_DIR", default_value = "users")]
    pub output_dir: PathBuf,

    /// Comma separated action labels. Defaults to the built-in vocabulary.
    ///
    /// Environment variable: `ACTIONS`
    #[arg(long, env = "ACTIONS", value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Truncate existing report files instead of overwriting them in place.
    ///
    /// Environment variable: `TRUNCATE`
    #[arg(long, env = "TRUNCATE", default_value_t = false)]
    pub truncate: bool,

    /// Execution mode.
    ///
    /// Environment variable: `MODE`
    #[arg(long, env = "MODE", value_enum, default_value_t = Mode::Pool)]
    pub mode: Mode,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tasks: u64,
    pub concurrency: usize,
    pub queue_capacity: usize,
    pub max_log_entries: usize,
    pub save_delay: Duration,
    pub generation_delay: Duration,
    pub output_dir: PathBuf,
    pub actions: ActionVocabulary,
    pub truncate: bool,
    pub mode: Mode,
}

impl TryFrom<CliArgs> for PipelineConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.concurrency == 0 {
            bail!("CONCURRENCY must be greater than 0");
        }

        if args.concurrency > MAX_CONCURRENCY {
            bail!(
                "CONCURRENCY ({}) exceeds the maximum of {}",
                args.concurrency,
                MAX_CONCURRENCY
            );
        }

        if args.tasks > MAX_TASKS {
            bail!("TASKS ({}) exceeds the maximum of {}", args.tasks, MAX_TASKS);
        }

        if args.max_log_entries == 0 {
            bail!("MAX_LOG_ENTRIES must be greater than 0");
        }

        // Both queues hold every task at once, so enqueueing never waits on
        // the stages.
        let queue_capacity = usize::try_from(args.tasks)?.max(1);
        if queue_capacity > Semaphore::MAX_PERMITS {
            bail!(
                "Queue capacity ({}) exceeds the channel limit of {}",
                queue_capacity,
                Semaphore::MAX_PERMITS
            );
        }

        let actions = if args.actions.is_empty() {
            ActionVocabulary::new(DEFAULT_ACTIONS)?
        } else {
            ActionVocabulary::new(&args.actions)?
        };

        Ok(Self {
            tasks: args.tasks,
            concurrency: args.concurrency,
            queue_capacity,
            max_log_entries: args.max_log_entries,
            save_delay: Duration::from_millis(args.save_delay_ms),
            generation_delay: Duration::from_millis(args.generation_delay_ms),
            output_dir: args.output_dir,
            actions,
            truncate: args.truncate,
            mode: args.mode,
        })
    }
}
