//! Field extraction for each command.
//!
//! Add commands are split on whitespace-delimited markers:
//! ```text
//! todo <description>
//! deadline <description> /by <date>
//! event <description> /from <date> /to <date>
//! ```
//! Dates are kept as raw text here; `Task` constructors parse them.

use crate::error::{TaskError, TaskResult};
use crate::input::commands::{Command, CommandType};
use crate::models::Task;

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineFields {
    pub description: String,
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub description: String,
    pub from: String,
    pub to: String,
}

/// Parse a whole input line into a command, building the task for add commands.
pub fn parse_command(line: &str) -> TaskResult<Command> {
    let command = match CommandType::classify(line) {
        CommandType::List => Command::List,
        CommandType::Mark => Command::Mark(parse_index(line)?),
        CommandType::Delete => Command::Delete(parse_index(line)?),
        CommandType::Todo => Command::Add(Task::todo(&parse_todo(line)?)?),
        CommandType::Deadline => {
            let fields = parse_deadline(line)?;
            Command::Add(Task::deadline(&fields.description, &fields.by)?)
        }
        CommandType::Event => {
            let fields = parse_event(line)?;
            Command::Add(Task::event(&fields.description, &fields.from, &fields.to)?)
        }
        CommandType::Unknown => Command::Unknown,
    };

    Ok(command)
}

/// Description of a `todo` command.
pub fn parse_todo(line: &str) -> TaskResult<String> {
    let description = strip_keyword(line, CommandType::Todo)?.trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription("todo"));
    }
    Ok(description.to_string())
}

pub fn parse_deadline(line: &str) -> TaskResult<DeadlineFields> {
    let rest = strip_keyword(line, CommandType::Deadline)?;
    if rest.trim().is_empty() {
        return Err(TaskError::EmptyDescription("deadline"));
    }

    let (by_start, by_end) = find_marker(rest, BY_MARKER).ok_or(TaskError::MissingSeparator)?;

    let description = rest[..by_start].trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription("deadline"));
    }

    let by = rest[by_end..].trim();
    if by.is_empty() {
        return Err(TaskError::EmptyDateField(BY_MARKER));
    }

    Ok(DeadlineFields {
        description: description.to_string(),
        by: by.to_string(),
    })
}

pub fn parse_event(line: &str) -> TaskResult<EventFields> {
    let rest = strip_keyword(line, CommandType::Event)?;
    if rest.trim().is_empty() {
        return Err(TaskError::EmptyDescription("event"));
    }

    let (from_start, from_end) =
        find_marker(rest, FROM_MARKER).ok_or(TaskError::MissingFromSeparator)?;
    let after_from = &rest[from_end..];
    let (to_start, to_end) =
        find_marker(after_from, TO_MARKER).ok_or(TaskError::MissingToSeparator)?;

    let description = rest[..from_start].trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription("event"));
    }

    let from = after_from[..to_start].trim();
    if from.is_empty() {
        return Err(TaskError::EmptyDateField(FROM_MARKER));
    }

    let to = after_from[to_end..].trim();
    if to.is_empty() {
        return Err(TaskError::EmptyDateField(TO_MARKER));
    }

    Ok(EventFields {
        description: description.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Zero-based index from `mark <n>` / `delete <n>`, where `n` is 1-based.
///
/// The result is not bounds-checked, so `mark 0` gives `-1`.
pub fn parse_index(line: &str) -> TaskResult<i64> {
    line.split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<i64>().ok())
        .and_then(|number| number.checked_sub(1))
        .ok_or(TaskError::InvalidCommandFormat)
}

/// Text after the command word, including the whitespace that follows it.
fn strip_keyword(line: &str, kind: CommandType) -> TaskResult<&str> {
    line.trim()
        .strip_prefix(kind.keyword())
        .ok_or(TaskError::InvalidCommandFormat)
}

/// Find ` <marker>` followed by whitespace or end of text.
///
/// Returns the byte offset where the marker's leading space starts and the
/// offset just past the marker.
fn find_marker(text: &str, marker: &str) -> Option<(usize, usize)> {
    let needle = format!(" {}", marker);
    let mut offset = 0;

    while let Some(pos) = text[offset..].find(&needle) {
        let start = offset + pos;
        let end = start + needle.len();
        match text[end..].chars().next() {
            None => return Some((start, end)),
            Some(c) if c.is_whitespace() => return Some((start, end)),
            _ => offset = end,
        }
    }

    None
}
