//! Cron-driven background jobs.
//!
//! Jobs are derived from configuration (`trending.schedule`), resolved to
//! `JobTask` implementations through the `JobRegistry` and run by the
//! `JobExecutor` on every tick of the `JobScheduler`.

pub mod executor;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod tasks;
pub mod types;

pub use executor::JobExecutor;
pub use models::ScheduledJob;
pub use registry::JobRegistry;
pub use scheduler::JobScheduler;
pub use types::{JobContext, JobStatus, JobTask};
