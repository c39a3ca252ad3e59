//! Two-stage worker pool.
//!
//! ## Structure
//!
//! - [`abort`] - the run-wide abort gate.
//! - [`queue`] - bounded queues with a shareable receiving half.
//! - [`worker`] - generator tasks turning task indices into users.
//! - [`saver`] - saver tasks persisting users through a
//!   [`UserStore`](crate::storage::UserStore).
//! - [`manager`] - the coordinator wiring the stages together.
//!
//! ```text
//! 0..tasks ─▶ task queue ─▶ worker × N ─▶ user queue ─▶ saver × N ─▶ store
//! ```

pub mod abort;
pub mod manager;
pub mod queue;
pub mod saver;
pub mod worker;

pub use abort::Abort;
pub use manager::{run_pool, run_pool_with_abort};
