#![doc = include_str!("../README.md")]

mod common;
mod factory;
mod generator;
mod report;

pub use common::*;
pub use factory::UserFactory;
pub use generator::LogGenerator;
pub use report::ActivityReport;
// Public re-exports so downstream crates agree on the `rand` and `chrono`
// versions used in the public API.
pub use chrono;
pub use rand;
