use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

/// Every failure a single command can run into.
///
/// All of them are recoverable: the dispatcher prints the message and
/// reads the next line. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The text after the command word was empty (`todo`, `deadline`, `event`).
    #[error("The description of a {0} cannot be empty.")]
    EmptyDescription(&'static str),

    /// Holds the character that is kept for the data file layout.
    #[error("A description cannot contain '{0}'.")]
    ReservedCharacter(char),

    #[error("The deadline command must contain a /by.")]
    MissingSeparator,

    #[error("The event command must contain a /from.")]
    MissingFromSeparator,

    #[error("The event command must contain a /to after the /from.")]
    MissingToSeparator,

    /// Holds the marker whose date was missing, e.g. `/by`.
    #[error("The date after {0} cannot be empty.")]
    EmptyDateField(&'static str),

    #[error("'{0}' is not a valid date, use the form 2 Dec 2019 1800.")]
    InvalidDateFormat(String),

    #[error("Invalid command format")]
    InvalidCommandFormat,

    /// `number` is the 1-based value the user typed.
    #[error("There is no task {number}, the list has {size} task(s).")]
    IndexOutOfRange { number: i64, size: usize },

    #[error("I'm sorry, but I don't know what that means :-(")]
    UnknownCommand,

    #[error("Unreadable saved task: {0}")]
    CorruptRecord(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        TaskError::Storage(err.to_string())
    }
}
