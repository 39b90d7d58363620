//! Delimited-file export of the task list

use anyhow::{Context, Result};
use clap::ValueEnum;
use csv::{QuoteStyle, WriterBuilder};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use taskdesk_core::{Person, PersonId, WorkTask};

/// Column headers, in output order
pub const EXPORT_HEADERS: [&str; 9] = [
    "Title",
    "Status",
    "Priority",
    "Assigned To",
    "Due Date",
    "Created Date",
    "Estimated Hours",
    "Description",
    "Tags",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Comma separated, quoted where needed
    #[default]
    Csv,
    /// Tab delimited, for spreadsheets
    Tsv,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }

    fn tag_separator(self) -> &'static str {
        match self {
            ExportFormat::Csv => ";",
            ExportFormat::Tsv => "; ",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("CSV"),
            ExportFormat::Tsv => f.write_str("TSV"),
        }
    }
}

/// Write `tasks` to `writer`, resolving assignee names from `people`.
///
/// Assignees missing from `people` export as an empty name. Tab-delimited
/// output keeps each task on one line, so line breaks and tabs in the
/// description become spaces.
pub fn write_tasks<W: Write>(
    writer: W,
    format: ExportFormat,
    tasks: &[WorkTask],
    people: &[Person],
) -> Result<()> {
    let names: HashMap<PersonId, &str> = people
        .iter()
        .map(|person| (person.id, person.name.as_str()))
        .collect();

    let mut out = WriterBuilder::new()
        .delimiter(format.delimiter())
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    out.write_record(EXPORT_HEADERS)
        .context("Failed to write export header")?;

    for task in tasks {
        let assignee = task
            .assigned_to
            .and_then(|id| names.get(&id).copied())
            .unwrap_or_default();
        let description = match format {
            ExportFormat::Csv => task.description.clone(),
            ExportFormat::Tsv => task.description.replace(['\t', '\n'], " ").replace('\r', ""),
        };

        out.write_record([
            task.title.clone(),
            task.status.to_string(),
            task.priority.to_string(),
            assignee.to_string(),
            task.due_date
                .map(|due| due.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            task.created_at.format(DATE_FORMAT).to_string(),
            task.estimated_hours.map(|h| h.to_string()).unwrap_or_default(),
            description,
            task.tags.join(format.tag_separator()),
        ])
        .with_context(|| format!("Failed to write task {}", task.id))?;
    }

    out.flush().context("Failed to flush export")?;
    Ok(())
}
