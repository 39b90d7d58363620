//! Command-line surface and dispatch onto the task service

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use database::seed_sample_data;
use std::fs::File;
use std::path::{Path, PathBuf};
use taskdesk_core::{
    Outcome, Person, PersonId, Priority, Status, TaskFilter, TaskId, TaskRepository,
    TaskService, WorkTask,
};
use tracing::info;
use uuid::Uuid;

use crate::export::{write_tasks, ExportFormat};
use crate::output::{Response, TaskDetail};

#[derive(Debug, Parser)]
#[command(name = "taskdesk")]
#[command(about = "Track work tasks and the people assigned to them")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Print outcomes as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every task, newest first
    List,
    /// Show one task
    Show { id: TaskId },
    /// Create a task
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Replace fields of an existing task
    Update {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    Delete { id: TaskId },
    /// Filter tasks by status, priority or assignee
    Filter {
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        assignee: Option<PersonId>,
    },
    /// Search titles and descriptions
    Search { term: Option<String> },
    /// List people
    People,
    /// Add a person
    AddPerson {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Write every task to a CSV or tab-delimited file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Destination file, overwritten if present
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Insert sample data into an empty store
    Seed,
}

/// Optional task fields shared by `create` and `update`
#[derive(Debug, Default, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<Status>,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Due date, RFC 3339
    #[arg(long)]
    pub due: Option<DateTime<Utc>>,
    /// Estimated hours
    #[arg(long)]
    pub hours: Option<u32>,
    #[arg(long)]
    pub assignee: Option<PersonId>,
    /// Clear the assignee
    #[arg(long, conflicts_with = "assignee")]
    pub unassign: bool,
    /// Tag, repeatable; replaces all existing tags when given
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl TaskFields {
    /// Apply the given fields onto `task`, leaving the rest untouched
    pub fn apply(self, mut task: WorkTask) -> WorkTask {
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due) = self.due {
            task.due_date = Some(due);
        }
        if let Some(hours) = self.hours {
            task.estimated_hours = Some(hours);
        }
        if self.unassign {
            task.assigned_to = None;
        } else if let Some(assignee) = self.assignee {
            task.assigned_to = Some(assignee);
        }
        if !self.tags.is_empty() {
            task.tags = self.tags;
        }
        task
    }
}

/// Run `command` against `service`
pub async fn execute<R>(command: Command, service: &TaskService<R>) -> Response
where
    R: TaskRepository + ?Sized,
{
    match command {
        Command::List => Response::tasks(service.get_all_tasks().await),
        Command::Show { id } => show(service, id).await,
        Command::Create { title, fields } => {
            let task = fields.apply(WorkTask::new(title));
            Response::task(service.create_task(task).await)
        }
        Command::Update { id, title, fields } => {
            let current = service.get_task_by_id(id).await;
            let Some(mut task) = current.data().cloned() else {
                return Response::unit(failure_of(&current));
            };
            if let Some(title) = title {
                task.title = title;
            }
            Response::unit(service.update_task(fields.apply(task)).await)
        }
        Command::Delete { id } => Response::unit(service.delete_task(id).await),
        Command::Filter {
            status,
            priority,
            assignee,
        } => {
            let filter = TaskFilter {
                status,
                priority,
                assigned_to: assignee,
            };
            Response::tasks(service.filter_tasks(filter).await)
        }
        Command::Search { term } => {
            Response::tasks(service.search_tasks(term.as_deref().unwrap_or_default()).await)
        }
        Command::People => Response::people(service.get_all_people().await),
        Command::AddPerson { name, email } => {
            let person = Person::new(Uuid::new_v4(), name.trim(), email);
            Response::person(service.add_person(person).await)
        }
        Command::Export { format, output } => {
            Response::unit(export(service, format, &output).await)
        }
        Command::Seed => Response::unit(seed(service).await),
    }
}

async fn show<R>(service: &TaskService<R>, id: TaskId) -> Response
where
    R: TaskRepository + ?Sized,
{
    let outcome = service.get_task_by_id(id).await;
    let assignee = match outcome.data().and_then(|task| task.assigned_to) {
        Some(person_id) => service.get_person(person_id).await.into_data(),
        None => None,
    };
    Response::detail(outcome.map(|task| TaskDetail { task, assignee }))
}

async fn export<R>(service: &TaskService<R>, format: ExportFormat, path: &Path) -> Outcome
where
    R: TaskRepository + ?Sized,
{
    let all_tasks = service.get_all_tasks().await;
    let Some(tasks) = all_tasks.data() else {
        return failure_of(&all_tasks);
    };
    let all_people = service.get_all_people().await;
    let Some(people) = all_people.data() else {
        return failure_of(&all_people);
    };

    let written = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))
        .and_then(|file| write_tasks(file, format, tasks, people));

    match written {
        Ok(()) => {
            info!(path = %path.display(), count = tasks.len(), "Tasks exported");
            Outcome::ok_with_message(format!("Exported {} tasks to {format}", tasks.len()))
        }
        Err(e) => Outcome::failure("Export failed", [format!("{e:#}")]),
    }
}

async fn seed<R>(service: &TaskService<R>) -> Outcome
where
    R: TaskRepository + ?Sized,
{
    match seed_sample_data(service.repository().as_ref()).await {
        Ok(true) => Outcome::ok_with_message("Sample data added"),
        Ok(false) => Outcome::ok_with_message("Store already has data, nothing added"),
        Err(e) => Outcome::failure("Failed to seed sample data", [e.to_string()]),
    }
}

fn failure_of<T>(outcome: &Outcome<T>) -> Outcome {
    Outcome::failure(outcome.message(), outcome.errors().to_vec())
}
