//! Migration endpoint load generator
//!
//! Simulated users repeatedly submit a fixed CSV-to-CSV migration request to
//! `POST /api/migration`, pausing 1-2 seconds between requests.

pub mod config;
pub mod error;
pub mod payload;
pub mod runner;
pub mod session;
pub mod stats;
pub mod task;
pub mod user;
pub mod wait;

// Re-export commonly used types
pub use config::Config;
pub use error::{LoadGenError, TaskError};
pub use payload::MigrationRequest;
pub use runner::LoadTest;
pub use session::UserSession;
pub use stats::{RunStats, RunSummary};
pub use task::{MIGRATION_PATH, MigrationTask, Task, TaskSet, run_migration_task};
pub use user::SimulatedUser;
pub use wait::WaitTime;
