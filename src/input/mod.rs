pub mod commands;
pub mod parser;

pub use commands::{Command, EXIT_KEYWORD};
pub use parser::parse_command;
