//! Interactive menu loop for the agenda task tracker.
//!
//! # Responsibility
//! - Read menu selections and prompts from stdin, print query results.
//! - Own the single store instance for the process lifetime and pass it
//!   into every operation.
//!
//! Presentation only: all filter semantics live in `agenda_core`.

use agenda_core::db::open_db;
use agenda_core::{
    default_log_level, init_logging, RepoError, SqliteTaskRepository, Task, TaskRepository,
    TaskService, WEEK_LENGTH_DAYS,
};
use chrono::Local;
use log::info;
use std::io::{self, Write};
use std::process::ExitCode;

const DB_FILE: &str = "agenda.db";
const MENU: &str = "1) Today's tasks
2) Week's tasks
3) All tasks
4) Missed tasks
5) Add task
6) Delete task
0) Exit";

fn main() -> ExitCode {
    if let Err(err) = init_cli_logging() {
        eprintln!("warning: file logging disabled: {err}");
    }

    // Storage failure here is fatal; mid-run failures only abort the
    // current operation.
    let conn = match open_db(DB_FILE) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open task database `{DB_FILE}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    // The one store instance for this process; the connection handle is
    // released when `conn` drops at the end of main.
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    info!("event=cli_start module=cli status=ok db_file={DB_FILE}");
    run_menu(&service);
    info!("event=cli_exit module=cli status=ok");

    ExitCode::SUCCESS
}

fn init_cli_logging() -> Result<(), String> {
    let log_dir = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?
        .join("logs");
    init_logging(default_log_level(), &log_dir)
}

fn run_menu<R: TaskRepository>(service: &TaskService<R>) {
    loop {
        println!("{MENU}");
        let Some(choice) = read_input() else {
            println!("Bye!");
            return;
        };

        match choice.as_str() {
            "1" => show_today(service),
            "2" => show_week(service),
            "3" => show_all(service),
            "4" => show_missed(service),
            "5" => add_task(service),
            "6" => delete_task(service),
            "0" => {
                println!("Bye!");
                return;
            }
            other => println!("Unknown option `{other}`; choose a number from 0 to 6.\n"),
        }
    }
}

fn show_today<R: TaskRepository>(service: &TaskService<R>) {
    let today = Local::now().date_naive();
    match service.tasks_for_day(today) {
        Ok(tasks) => {
            println!("Today {}:", today.format("%e %b"));
            if tasks.is_empty() {
                println!("Nothing to do!");
            }
            for (index, task) in tasks.iter().enumerate() {
                println!("{}. {}", index + 1, task.description);
            }
        }
        Err(err) => report_error(&err),
    }
    println!();
}

fn show_week<R: TaskRepository>(service: &TaskService<R>) {
    let today = Local::now().date_naive();
    let tasks = match service.tasks_for_week(today) {
        Ok(tasks) => tasks,
        Err(err) => {
            report_error(&err);
            println!();
            return;
        }
    };

    // One section per day of the window, empty days included.
    let mut day = today;
    for _ in 0..WEEK_LENGTH_DAYS {
        println!("{}:", day.format("%A %e %B"));
        let mut due = tasks.iter().filter(|task| task.is_due_on(day)).peekable();
        if due.peek().is_none() {
            println!("Nothing to do!");
        }
        for (index, task) in due.enumerate() {
            println!("{}. {}", index + 1, task.description);
        }
        println!();

        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
}

fn show_all<R: TaskRepository>(service: &TaskService<R>) {
    match service.all_tasks() {
        Ok(tasks) => {
            println!("All tasks:");
            if tasks.is_empty() {
                println!("Nothing to do!");
            }
            print_dated_listing(&tasks);
        }
        Err(err) => report_error(&err),
    }
    println!();
}

fn show_missed<R: TaskRepository>(service: &TaskService<R>) {
    let today = Local::now().date_naive();
    match service.missed_tasks(today) {
        Ok(tasks) => {
            println!("Missed tasks:");
            if tasks.is_empty() {
                println!("Nothing is missed!");
            }
            print_dated_listing(&tasks);
        }
        Err(err) => report_error(&err),
    }
    println!();
}

fn add_task<R: TaskRepository>(service: &TaskService<R>) {
    println!("Enter task");
    let Some(description) = read_input() else {
        return;
    };

    println!("Enter deadline");
    loop {
        let Some(date_text) = read_input() else {
            return;
        };

        // An empty deadline falls back to the creation date.
        let result = if date_text.is_empty() {
            service.add_task_due(&description, Local::now().date_naive())
        } else {
            service.add_task(&description, &date_text)
        };

        match result {
            Ok(_) => {
                println!("The task has been added!\n");
                return;
            }
            Err(RepoError::InvalidDeadline(err)) => {
                println!("{err}; try again, or leave empty for today");
            }
            Err(err) => {
                report_error(&err);
                println!();
                return;
            }
        }
    }
}

fn delete_task<R: TaskRepository>(service: &TaskService<R>) {
    let tasks = match service.all_tasks() {
        Ok(tasks) => tasks,
        Err(err) => {
            report_error(&err);
            println!();
            return;
        }
    };

    if tasks.is_empty() {
        println!("Nothing to delete!\n");
        return;
    }

    println!("Choose the number of the task you want to delete:");
    print_dated_listing(&tasks);

    let Some(input) = read_input() else {
        return;
    };

    // The display number is resolved against the exact listing printed
    // above, in the same pass; the internal id never reaches the prompt.
    let Some(task) = resolve_display_index(&tasks, &input) else {
        println!("No task number `{input}` in the list above.\n");
        return;
    };

    match service.delete_task(task.id) {
        Ok(()) => println!("The task has been deleted!"),
        Err(err) => report_error(&err),
    }
    println!();
}

/// Maps a 1-based display number from a printed listing back to the task it
/// labeled.
fn resolve_display_index<'a>(tasks: &'a [Task], input: &str) -> Option<&'a Task> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| tasks.get(index))
}

fn print_dated_listing(tasks: &[Task]) {
    for (index, task) in tasks.iter().enumerate() {
        println!(
            "{}. {}. {}",
            index + 1,
            task.description,
            task.deadline.format("%e %b")
        );
    }
}

fn report_error(err: &RepoError) {
    log::error!("event=cli_op module=cli status=error error={err}");
    match err {
        RepoError::NotFound(id) => println!("Task {id} no longer exists."),
        RepoError::InvalidDeadline(parse) => println!("{parse}"),
        other => println!("Storage error: {other}"),
    }
}

/// Reads one trimmed line from stdin. `None` means stdin is closed.
fn read_input() -> Option<String> {
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_display_index;
    use agenda_core::Task;
    use chrono::NaiveDate;

    fn sample_tasks() -> Vec<Task> {
        let deadline = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        vec![
            Task {
                id: 11,
                description: "first".to_string(),
                deadline,
            },
            Task {
                id: 42,
                description: "second".to_string(),
                deadline,
            },
        ]
    }

    #[test]
    fn display_number_maps_to_internal_id() {
        let tasks = sample_tasks();
        assert_eq!(resolve_display_index(&tasks, "1").map(|t| t.id), Some(11));
        assert_eq!(resolve_display_index(&tasks, "2").map(|t| t.id), Some(42));
    }

    #[test]
    fn out_of_range_and_non_numeric_input_resolve_to_none() {
        let tasks = sample_tasks();
        assert!(resolve_display_index(&tasks, "0").is_none());
        assert!(resolve_display_index(&tasks, "3").is_none());
        assert!(resolve_display_index(&tasks, "two").is_none());
        assert!(resolve_display_index(&tasks, "").is_none());
    }
}
