//! Task management commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focusdesk_core::{Day, NewTask, Task, TaskId};

use super::open_store;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time of day (HH:MM, 24-hour)
        #[arg(long)]
        time: String,
        /// Weekday shown in the timetable (default: the date's weekday)
        #[arg(long)]
        day: Option<String>,
        /// Task category: study, work or personal
        #[arg(long, default_value = "study")]
        category: String,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between open and completed
    Toggle {
        /// Task ID
        id: u64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
    /// Tasks planned for a date (default: today)
    On {
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Weekly timetable grid as JSON
    Timetable,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TaskAction::Add {
            title,
            date,
            time,
            day,
            category,
        } => {
            let day = match day {
                Some(day) => day,
                None => parse_date(&date)
                    .map(|d| Day::of(d).to_string())
                    .unwrap_or_default(),
            };
            let task = NewTask::parse(&title, &day, &date, &time, &category)?;
            let id = store.add_task(task)?;
            println!("Task created: {id}");
            if let Some(task) = store.task(id) {
                println!("{}", serde_json::to_string_pretty(task)?);
            }
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.tasks())?);
            } else if store.tasks().is_empty() {
                println!("No tasks yet.");
            } else {
                for task in store.tasks() {
                    println!("{}", format_task(task));
                }
            }
        }
        TaskAction::Toggle { id } => {
            if store.toggle_task(TaskId(id))? {
                println!("Task toggled: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if store.delete_task(TaskId(id))? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::On { date } => {
            let date = match date {
                Some(raw) => parse_date(&raw).ok_or(format!("invalid date: {raw}"))?,
                None => Local::now().date_naive(),
            };
            println!("{}", serde_json::to_string_pretty(&store.tasks_on(date))?);
        }
        TaskAction::Timetable => {
            println!("{}", serde_json::to_string_pretty(&store.timetable())?);
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn format_task(task: &Task) -> String {
    format!(
        "[{}] {:>3}  {:<9} {} {}  {:<8} {}",
        if task.completed { "x" } else { " " },
        task.id.0,
        task.day.name(),
        task.date,
        task.time,
        format!("{:?}", task.category),
        task.title
    )
}
