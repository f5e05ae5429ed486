//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the views the tracker offers: today,
//!   week, all, missed.
//! - Translate user-supplied date text and a caller-supplied "today" into
//!   deadline filters; delegate persistence to the repository.
//!
//! # Invariants
//! - The service never reads the clock; "today" is always passed in.
//! - Service APIs never bypass the repository persistence contract.

use crate::model::task::{parse_deadline, Task, TaskId};
use crate::repo::task_repo::{DeadlineFilter, RepoResult, TaskRepository};
use chrono::{Days, NaiveDate};

/// A week view covers exactly this many calendar days, starting today.
pub const WEEK_LENGTH_DAYS: u64 = 7;

/// Returns the last day of the week window starting at `start`, inclusive.
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_days(Days::new(WEEK_LENGTH_DAYS - 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Use-case service wrapper over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a task from raw user input, parsing `deadline` as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// - [`RepoError::InvalidDeadline`] when the date text cannot be parsed;
    ///   storage is left unchanged in that case.
    ///
    /// [`RepoError::InvalidDeadline`]: crate::repo::task_repo::RepoError
    pub fn add_task(&self, description: &str, deadline: &str) -> RepoResult<Task> {
        let deadline = parse_deadline(deadline)?;
        self.repo.create_task(description, deadline)
    }

    /// Adds a task with an already-parsed deadline.
    pub fn add_task_due(&self, description: &str, deadline: NaiveDate) -> RepoResult<Task> {
        self.repo.create_task(description, deadline)
    }

    /// Lists tasks due exactly on `day`.
    pub fn tasks_for_day(&self, day: NaiveDate) -> RepoResult<Vec<Task>> {
        self.repo
            .list_tasks(DeadlineFilter::Range { from: day, to: day })
    }

    /// Lists tasks due within the seven-day window `[start, start+6]`.
    pub fn tasks_for_week(&self, start: NaiveDate) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(DeadlineFilter::Range {
            from: start,
            to: week_end(start),
        })
    }

    /// Lists tasks whose deadline is strictly before `today`.
    pub fn missed_tasks(&self, today: NaiveDate) -> RepoResult<Vec<Task>> {
        match today.pred_opt() {
            Some(yesterday) => self
                .repo
                .list_tasks(DeadlineFilter::UpToInclusive { to: yesterday }),
            // No calendar day precedes `today`; nothing can be missed.
            None => Ok(Vec::new()),
        }
    }

    /// Lists every task in the store.
    pub fn all_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(DeadlineFilter::All)
    }

    /// Permanently deletes one task by its stable id.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)
    }
}

#[cfg(test)]
mod tests {
    use super::week_end;
    use chrono::NaiveDate;

    #[test]
    fn week_end_is_six_days_after_start() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(week_end(start), NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
    }

    #[test]
    fn week_end_saturates_at_calendar_maximum() {
        assert_eq!(week_end(NaiveDate::MAX), NaiveDate::MAX);
    }
}
