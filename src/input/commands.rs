use crate::models::Task;

/// Word that ends the session. Checked before classification.
pub const EXIT_KEYWORD: &str = "bye";

/// Kind of command a line of input asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    List,
    Mark,
    Delete,
    Todo,
    Deadline,
    Event,
    Unknown,
}

impl CommandType {
    /// Classify a raw input line by its leading word.
    ///
    /// `list` has to stand alone; the other commands only need the right
    /// first word. Matching is case-sensitive.
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        let first = line.split_whitespace().next().unwrap_or("");

        match first {
            "list" if line == "list" => CommandType::List,
            "mark" => CommandType::Mark,
            "delete" => CommandType::Delete,
            "todo" => CommandType::Todo,
            "deadline" => CommandType::Deadline,
            "event" => CommandType::Event,
            _ => CommandType::Unknown,
        }
    }

    /// Command word as typed by the user.
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::List => "list",
            CommandType::Mark => "mark",
            CommandType::Delete => "delete",
            CommandType::Todo => "todo",
            CommandType::Deadline => "deadline",
            CommandType::Event => "event",
            CommandType::Unknown => "",
        }
    }
}

/// A fully parsed command, ready for the dispatcher.
///
/// Indices are zero-based and may be out of range; the task list checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Mark(i64),
    Delete(i64),
    Add(Task),
    Unknown,
}
