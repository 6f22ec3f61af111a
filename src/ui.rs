//! Terminal output for the interactive session
use crossterm::style::Stylize;
use std::fmt::Display;
use std::io::{self, Write};

use crate::models::{Task, TaskList};

const DIVIDER: &str = "____________________________________________________________";
const APP_NAME: &str = "ttrack";

/// Renders every reply of the session into `out`.
///
/// Each reply is framed by divider lines. Colour is only used when enabled,
/// so tests can read plain text back.
pub struct Ui<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Ui<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn reply(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}", DIVIDER)?;
        for line in lines {
            writeln!(self.out, " {}", line)?;
        }
        writeln!(self.out, "{}", DIVIDER)?;
        self.out.flush()
    }

    pub fn print_welcome(&mut self) -> io::Result<()> {
        self.reply(&[
            format!("Hello! I'm {}", APP_NAME),
            "What can I do for you?".to_string(),
        ])
    }

    pub fn print_farewell(&mut self) -> io::Result<()> {
        self.reply(&["Bye. Hope to see you again soon!".to_string()])
    }

    /// Tasks with their 1-based numbers. An empty list prints no task lines.
    pub fn print_list(&mut self, tasks: &TaskList) -> io::Result<()> {
        let mut lines = Vec::with_capacity(tasks.len() + 1);
        if tasks.is_empty() {
            lines.push("Your list is empty.".to_string());
        } else {
            lines.push("Here are the tasks in your list:".to_string());
        }
        for (i, task) in tasks.iter().enumerate() {
            lines.push(format!("{}.{}", i + 1, task));
        }
        self.reply(&lines)
    }

    pub fn print_added(&mut self, task: &Task, count: usize) -> io::Result<()> {
        self.reply(&[
            "Got it. I've added this task:".to_string(),
            format!("  {}", task),
            count_line(count),
        ])
    }

    pub fn print_marked(&mut self, task: &Task) -> io::Result<()> {
        self.reply(&[
            "Nice! I've marked this task as done:".to_string(),
            format!("  {}", task),
        ])
    }

    pub fn print_deleted(&mut self, task: &Task, count: usize) -> io::Result<()> {
        self.reply(&[
            "Noted. I've removed this task:".to_string(),
            format!("  {}", task),
            count_line(count),
        ])
    }

    pub fn print_error(&mut self, error: &dyn Display) -> io::Result<()> {
        let text = format!("OOPS!!! {}", error);
        let line = if self.color {
            text.red().to_string()
        } else {
            text
        };
        self.reply(&[line])
    }

    pub fn print_warning(&mut self, message: &str) -> io::Result<()> {
        let line = if self.color {
            message.to_string().yellow().to_string()
        } else {
            message.to_string()
        };
        self.reply(&[line])
    }
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", count, noun)
}
