use agenda_core::db::open_db_in_memory;
use agenda_core::{
    DeadlineFilter, RepoError, SqliteTaskRepository, TaskRepository, TaskService,
    DEFAULT_DESCRIPTION,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task("Buy milk", date(2024, 6, 10)).unwrap();
    assert_eq!(created.id, 1);

    let all = repo.list_tasks(DeadlineFilter::All).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].description, "Buy milk");
    assert_eq!(all[0].deadline, date(2024, 6, 10));
}

#[test]
fn create_assigns_fresh_unique_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let first = repo.create_task("one", date(2024, 6, 10)).unwrap();
    let second = repo.create_task("two", date(2024, 6, 10)).unwrap();
    let third = repo.create_task("three", date(2024, 6, 1)).unwrap();

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[test]
fn blank_description_is_stored_as_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task("   ", date(2024, 6, 10)).unwrap();
    assert_eq!(created.description, DEFAULT_DESCRIPTION);

    let all = repo.list_tasks(DeadlineFilter::All).unwrap();
    assert_eq!(all[0].description, DEFAULT_DESCRIPTION);
}

#[test]
fn delete_removes_only_the_target_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let first = repo.create_task("keep a", date(2024, 6, 5)).unwrap();
    let victim = repo.create_task("remove", date(2024, 6, 6)).unwrap();
    let last = repo.create_task("keep b", date(2024, 6, 7)).unwrap();

    repo.delete_task(victim.id).unwrap();

    let all = repo.list_tasks(DeadlineFilter::All).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|task| task.id != victim.id));
    assert_eq!(all[0], first);
    assert_eq!(all[1], last);
}

#[test]
fn delete_after_delete_leaves_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task("Buy milk", date(2024, 6, 10)).unwrap();
    repo.delete_task(created.id).unwrap();

    assert!(repo.list_tasks(DeadlineFilter::All).unwrap().is_empty());
}

#[test]
fn delete_unknown_id_returns_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task("survivor", date(2024, 6, 10)).unwrap();

    let err = repo.delete_task(999).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));

    let all = repo.list_tasks(DeadlineFilter::All).unwrap();
    assert_eq!(all, vec![created]);
}

#[test]
fn deleting_twice_reports_not_found_on_second_attempt() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task("once", date(2024, 6, 10)).unwrap();
    repo.delete_task(created.id).unwrap();

    let err = repo.delete_task(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == created.id));
}

#[test]
fn id_of_deleted_task_is_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    repo.create_task("first", date(2024, 6, 10)).unwrap();
    let freed = repo.create_task("freed", date(2024, 6, 11)).unwrap();
    repo.delete_task(freed.id).unwrap();

    let next = repo.create_task("next", date(2024, 6, 12)).unwrap();
    assert!(next.id > freed.id);
}

#[test]
fn service_rejects_malformed_deadline_and_leaves_storage_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let err = service.add_task("Task", "10-06-2024").unwrap_err();
    assert!(matches!(err, RepoError::InvalidDeadline(_)));

    assert!(service.all_tasks().unwrap().is_empty());
}

#[test]
fn service_add_task_parses_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let created = service.add_task("Buy milk", "2024-06-10").unwrap();
    assert_eq!(created.deadline, date(2024, 6, 10));

    let all = service.all_tasks().unwrap();
    assert_eq!(all, vec![created]);
}
