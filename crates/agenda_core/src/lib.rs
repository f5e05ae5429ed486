//! Core domain logic for the agenda task tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{parse_deadline, DeadlineParseError, Task, TaskId, DEFAULT_DESCRIPTION};
pub use repo::task_repo::{
    DeadlineFilter, RepoError, RepoResult, SqliteTaskRepository, TaskRepository,
};
pub use service::task_service::{week_end, TaskService, WEEK_LENGTH_DAYS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
