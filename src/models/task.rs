use chrono::NaiveDateTime;
use std::fmt;

use crate::error::{TaskError, TaskResult};

/// Date format accepted from the user and written to the data file, e.g. `2 Dec 2019 1800`.
const STORAGE_DATE_PARSE: &str = "%d %b %Y %H%M";
const STORAGE_DATE_FORMAT: &str = "%-d %b %Y %H%M";
/// Date format used when listing tasks, e.g. `02-12-2019 18:00`.
const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Separator between fields of a stored task line.
pub const FIELD_SEPARATOR: &str = " | ";
/// Not allowed in descriptions, since it is part of `FIELD_SEPARATOR`.
pub const RESERVED_CHAR: char = '|';

/// Variant-specific part of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline { by: NaiveDateTime },
    Event { from: NaiveDateTime, to: NaiveDateTime },
}

impl TaskKind {
    /// Single-letter tag used in both the list view and the data file.
    pub fn letter(&self) -> char {
        match self {
            TaskKind::ToDo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

/// A task as kept in the list.
///
/// Built only through the constructors below, which keep the description
/// non-empty and free of `|` so that every task survives a save and reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    is_done: bool,
    kind: TaskKind,
}

impl Task {
    fn with_kind(description: &str, kind: TaskKind) -> Self {
        Self {
            description: description.to_string(),
            is_done: false,
            kind,
        }
    }

    pub fn todo(description: &str) -> TaskResult<Self> {
        check_description(description, "todo")?;
        Ok(Self::with_kind(description, TaskKind::ToDo))
    }

    /// Build a deadline from its description and a raw date such as `2 Dec 2019 1800`.
    pub fn deadline(description: &str, by: &str) -> TaskResult<Self> {
        check_description(description, "deadline")?;
        let by = parse_date(by)?;
        Ok(Self::with_kind(description, TaskKind::Deadline { by }))
    }

    pub fn event(description: &str, from: &str, to: &str) -> TaskResult<Self> {
        check_description(description, "event")?;
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        Ok(Self::with_kind(description, TaskKind::Event { from, to }))
    }

    /// Rebuild a task from one line of the data file.
    ///
    /// Format: `<letter> | <0|1> | <description>[ | <date>[ | <date>]]`.
    /// The line is trusted to come from `to_storage_string`, so only the
    /// field layout and the dates are checked.
    pub fn from_storage_line(line: &str) -> TaskResult<Self> {
        let corrupt = || TaskError::CorruptRecord(line.to_string());
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        if fields.len() < 3 {
            return Err(corrupt());
        }

        let is_done = match fields[1].trim() {
            "1" => true,
            "0" => false,
            _ => return Err(corrupt()),
        };

        let description = fields[2];
        if description.trim().is_empty() {
            return Err(corrupt());
        }

        let mut task = match (fields[0].trim(), fields.len()) {
            ("T", 3) => Task::todo(description)?,
            ("D", 4) => Task::deadline(description, fields[3])?,
            ("E", 5) => Task::event(description, fields[3], fields[4])?,
            _ => return Err(corrupt()),
        };
        task.is_done = is_done;

        Ok(task)
    }

    #[cfg(test)]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_as_done(&mut self) {
        self.is_done = true;
    }

    fn status_marker(&self) -> char {
        if self.is_done { 'X' } else { ' ' }
    }

    /// Line written to the data file for this task.
    pub fn to_storage_string(&self) -> String {
        let mut fields = vec![
            self.kind.letter().to_string(),
            if self.is_done { "1" } else { "0" }.to_string(),
            self.description.clone(),
        ];

        match &self.kind {
            TaskKind::ToDo => {}
            TaskKind::Deadline { by } => {
                fields.push(by.format(STORAGE_DATE_FORMAT).to_string());
            }
            TaskKind::Event { from, to } => {
                fields.push(from.format(STORAGE_DATE_FORMAT).to_string());
                fields.push(to.format(STORAGE_DATE_FORMAT).to_string());
            }
        }

        fields.join(FIELD_SEPARATOR)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.letter(),
            self.status_marker(),
            self.description
        )?;

        match &self.kind {
            TaskKind::ToDo => Ok(()),
            TaskKind::Deadline { by } => {
                write!(f, " (by: {})", by.format(DISPLAY_DATE_FORMAT))
            }
            TaskKind::Event { from, to } => write!(
                f,
                " (from: {} to: {})",
                from.format(DISPLAY_DATE_FORMAT),
                to.format(DISPLAY_DATE_FORMAT)
            ),
        }
    }
}

// `|` anywhere would shift the stored fields, not just the full separator:
// `x |` followed by ` | <date>` splits in the wrong place.
fn check_description(description: &str, keyword: &'static str) -> TaskResult<()> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription(keyword));
    }
    if description.contains(RESERVED_CHAR) {
        return Err(TaskError::ReservedCharacter(RESERVED_CHAR));
    }
    Ok(())
}

/// Parse a user or stored date like `2 Dec 2019 1800`.
///
/// The time must be exactly four digits; chrono alone would take `180` as 18:00.
pub fn parse_date(text: &str) -> TaskResult<NaiveDateTime> {
    let text = text.trim();
    let invalid = || TaskError::InvalidDateFormat(text.to_string());

    let time = text.rsplit(char::is_whitespace).next().unwrap_or_default();
    if time.len() != 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(text, STORAGE_DATE_PARSE).map_err(|_| invalid())
}
