//! Rendering of service outcomes for the terminal

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use taskdesk_core::{Outcome, Person, WorkTask};

/// A task together with its resolved assignee
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: WorkTask,
    pub assignee: Option<Person>,
}

#[derive(Debug)]
enum Payload {
    Unit(Outcome),
    Task(Outcome<WorkTask>),
    Detail(Outcome<TaskDetail>),
    Tasks(Outcome<Vec<WorkTask>>),
    Person(Outcome<Person>),
    People(Outcome<Vec<Person>>),
}

/// The result of one command, ready to print
#[derive(Debug)]
pub struct Response {
    payload: Payload,
}

impl Response {
    pub fn unit(outcome: Outcome) -> Self {
        Self {
            payload: Payload::Unit(outcome),
        }
    }

    pub fn task(outcome: Outcome<WorkTask>) -> Self {
        Self {
            payload: Payload::Task(outcome),
        }
    }

    pub fn detail(outcome: Outcome<TaskDetail>) -> Self {
        Self {
            payload: Payload::Detail(outcome),
        }
    }

    pub fn tasks(outcome: Outcome<Vec<WorkTask>>) -> Self {
        Self {
            payload: Payload::Tasks(outcome),
        }
    }

    pub fn person(outcome: Outcome<Person>) -> Self {
        Self {
            payload: Payload::Person(outcome),
        }
    }

    pub fn people(outcome: Outcome<Vec<Person>>) -> Self {
        Self {
            payload: Payload::People(outcome),
        }
    }

    /// Whether the underlying outcome succeeded
    pub fn is_success(&self) -> bool {
        match &self.payload {
            Payload::Unit(o) => o.is_success(),
            Payload::Task(o) => o.is_success(),
            Payload::Detail(o) => o.is_success(),
            Payload::Tasks(o) => o.is_success(),
            Payload::Person(o) => o.is_success(),
            Payload::People(o) => o.is_success(),
        }
    }

    /// Process exit code for this response
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Serialize the whole outcome envelope
    pub fn to_json(&self) -> Result<String> {
        let json = match &self.payload {
            Payload::Unit(o) => serde_json::to_string_pretty(o),
            Payload::Task(o) => serde_json::to_string_pretty(o),
            Payload::Detail(o) => serde_json::to_string_pretty(o),
            Payload::Tasks(o) => serde_json::to_string_pretty(o),
            Payload::Person(o) => serde_json::to_string_pretty(o),
            Payload::People(o) => serde_json::to_string_pretty(o),
        };
        json.context("Failed to encode outcome as JSON")
    }

    /// Human-readable rendering: message, then errors or data
    pub fn to_text(&self) -> String {
        match &self.payload {
            Payload::Unit(o) => render(o, |_, _| {}),
            Payload::Task(o) => render(o, |out, task| write_task(out, task, None)),
            Payload::Detail(o) => render(o, |out, detail| {
                write_task(out, &detail.task, detail.assignee.as_ref())
            }),
            Payload::Tasks(o) => render(o, |out, tasks| write_task_table(out, tasks)),
            Payload::Person(o) => render(o, |out, person| {
                write_people(out, std::slice::from_ref(person))
            }),
            Payload::People(o) => render(o, |out, people| write_people(out, people)),
        }
    }

    /// Render in the requested format
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            self.to_json()
        } else {
            Ok(self.to_text())
        }
    }
}

fn render<T>(outcome: &Outcome<T>, body: impl FnOnce(&mut String, &T)) -> String {
    let mut out = String::new();
    out.push_str(outcome.message());
    out.push('\n');

    for error in outcome.errors() {
        let _ = writeln!(out, "  - {error}");
    }
    if let Some(data) = outcome.data() {
        body(&mut out, data);
    }
    out
}

fn write_task_table(out: &mut String, tasks: &[WorkTask]) {
    if tasks.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "{:<36}  {:<11}  {:<8}  {:<10}  TITLE",
        "ID", "STATUS", "PRIORITY", "DUE"
    );
    for task in tasks {
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<36}  {:<11}  {:<8}  {:<10}  {}",
            task.id,
            task.status.as_str(),
            task.priority.as_str(),
            due,
            task.title
        );
    }
}

fn write_task(out: &mut String, task: &WorkTask, assignee: Option<&Person>) {
    let _ = writeln!(out, "ID:          {}", task.id);
    let _ = writeln!(out, "Title:       {}", task.title);
    if !task.description.is_empty() {
        let _ = writeln!(out, "Description: {}", task.description);
    }
    let _ = writeln!(out, "Status:      {}", task.status);
    let _ = writeln!(out, "Priority:    {}", task.priority);
    let _ = writeln!(out, "Created:     {}", task.created_at.to_rfc3339());
    if let Some(due) = task.due_date {
        let _ = writeln!(out, "Due:         {}", due.to_rfc3339());
    }
    if let Some(hours) = task.estimated_hours {
        let _ = writeln!(out, "Estimate:    {hours}h");
    }
    match (assignee, task.assigned_to) {
        (Some(person), _) => {
            let _ = writeln!(out, "Assignee:    {} ({})", person.name, person.id);
        }
        (None, Some(id)) => {
            let _ = writeln!(out, "Assignee:    {id}");
        }
        (None, None) => {}
    }
    if !task.tags.is_empty() {
        let _ = writeln!(out, "Tags:        {}", task.tags.join(", "));
    }
}

fn write_people(out: &mut String, people: &[Person]) {
    for person in people {
        match &person.email {
            Some(email) => {
                let _ = writeln!(out, "{}  {} <{email}>", person.id, person.name);
            }
            None => {
                let _ = writeln!(out, "{}  {}", person.id, person.name);
            }
        }
    }
}
