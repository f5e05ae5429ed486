//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable create/list/delete APIs over the `task` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Listing results are ordered by deadline ascending, then id ascending.
//! - Every mutation is committed before the call returns.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::task::{DeadlineParseError, Task, TaskId, DEADLINE_FORMAT, DEFAULT_DESCRIPTION};
use chrono::NaiveDate;
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, task, deadline FROM task";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    InvalidDeadline(DeadlineParseError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeadline(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDeadline(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DeadlineParseError> for RepoError {
    fn from(value: DeadlineParseError) -> Self {
        Self::InvalidDeadline(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Tagged deadline constraint for listing queries.
///
/// Replaces sentinel-value range encodings with one exhaustively matchable
/// variant per query shape. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineFilter {
    /// No constraint.
    All,
    /// Deadline within `[from, to]`.
    Range { from: NaiveDate, to: NaiveDate },
    /// Deadline on or before `to`. Used for missed-task queries with
    /// `to` = yesterday.
    UpToInclusive { to: NaiveDate },
    /// Deadline on or after `from`.
    FromInclusive { from: NaiveDate },
}

impl DeadlineFilter {
    /// Returns whether a task with the given deadline satisfies the filter.
    ///
    /// Agrees with the SQL predicate used by [`TaskRepository::list_tasks`].
    pub fn matches(&self, deadline: NaiveDate) -> bool {
        match *self {
            Self::All => true,
            Self::Range { from, to } => from <= deadline && deadline <= to,
            Self::UpToInclusive { to } => deadline <= to,
            Self::FromInclusive { from } => deadline >= from,
        }
    }
}

/// Repository interface for task store operations.
pub trait TaskRepository {
    /// Persists a new task and returns it with its assigned id.
    ///
    /// A blank or whitespace-only `description` is stored as
    /// [`DEFAULT_DESCRIPTION`].
    fn create_task(&self, description: &str, deadline: NaiveDate) -> RepoResult<Task>;

    /// Returns tasks matching `filter`, fully materialized, sorted by
    /// deadline ascending with id ascending as tiebreak. An empty result
    /// is a valid outcome, not an error.
    fn list_tasks(&self, filter: DeadlineFilter) -> RepoResult<Vec<Task>>;

    /// Permanently removes the task with the given id.
    ///
    /// Fails with [`RepoError::NotFound`] when no such task exists; other
    /// tasks keep their ids, no renumbering occurs.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, description: &str, deadline: NaiveDate) -> RepoResult<Task> {
        let description = if description.trim().is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            description
        };
        let deadline_text = deadline.format(DEADLINE_FORMAT).to_string();

        self.conn.execute(
            "INSERT INTO task (task, deadline) VALUES (?1, ?2);",
            params![description, deadline_text],
        )?;
        let id = self.conn.last_insert_rowid();

        info!("event=task_create module=repo status=ok id={id} deadline={deadline_text}");

        Ok(Task {
            id,
            description: description.to_string(),
            deadline,
        })
    }

    fn list_tasks(&self, filter: DeadlineFilter) -> RepoResult<Vec<Task>> {
        let mut sql = String::from(TASK_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        match filter {
            DeadlineFilter::All => {}
            DeadlineFilter::Range { from, to } => {
                sql.push_str(" WHERE deadline BETWEEN ? AND ?");
                bind_values.push(date_value(from));
                bind_values.push(date_value(to));
            }
            DeadlineFilter::UpToInclusive { to } => {
                sql.push_str(" WHERE deadline <= ?");
                bind_values.push(date_value(to));
            }
            DeadlineFilter::FromInclusive { from } => {
                sql.push_str(" WHERE deadline >= ?");
                bind_values.push(date_value(from));
            }
        }

        sql.push_str(" ORDER BY deadline ASC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM task WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=task_delete module=repo status=ok id={id}");

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let deadline_text: String = row.get("deadline")?;
    let deadline = NaiveDate::parse_from_str(&deadline_text, DEADLINE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid deadline value `{deadline_text}` in task.deadline"
        ))
    })?;

    Ok(Task {
        id: row.get("id")?,
        description: row.get("task")?,
        deadline,
    })
}

fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format(DEADLINE_FORMAT).to_string())
}
