//! Console logging.
//!
//! Progress lines from the stages (`worker #3 finished`, `saving user 42`) are
//! plain `tracing` events. They are printed through `tracing_subscriber::fmt`
//! and filtered with `RUST_LOG`, defaulting to `info`:
//!
//! ```bash
//! RUST_LOG=debug actlog --tasks 10
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .compact(),
        )
        .try_init()?;

    Ok(())
}
