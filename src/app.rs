use log::{debug, error, info};
use std::io::{self, BufRead, Write};

use crate::error::{TaskError, TaskResult};
use crate::fs::{load_tasks, TaskStore};
use crate::input::{parse_command, Command, EXIT_KEYWORD};
use crate::models::{Task, TaskList};
use crate::ui::Ui;

/// What a successful command wants shown.
#[derive(Debug)]
enum Reply {
    List,
    Added(Task),
    Marked(Task),
    Deleted(Task),
}

/// Owns the task list and wires parsed commands to it, to the store and to
/// the terminal. The list is the source of truth; the store mirrors it after
/// every successful mutation.
pub struct App<S: TaskStore, W: Write> {
    tasks: TaskList,
    store: S,
    ui: Ui<W>,
}

impl<S: TaskStore, W: Write> App<S, W> {
    pub fn new(store: S, ui: Ui<W>) -> Self {
        Self {
            tasks: TaskList::new(),
            store,
            ui,
        }
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the in-memory list with the store's content.
    ///
    /// A store that cannot be read leaves the session with an empty list;
    /// unreadable lines are skipped with a warning each.
    pub fn load(&mut self) -> io::Result<()> {
        match load_tasks(&self.store) {
            Ok(loaded) => {
                info!(
                    "event=load status=ok tasks={} skipped={}",
                    loaded.tasks.len(),
                    loaded.rejected.len()
                );
                self.tasks = loaded.tasks;
                for rejected in &loaded.rejected {
                    self.ui.print_warning(&format!(
                        "Skipped saved task on line {}: {}",
                        rejected.line_number, rejected.error
                    ))?;
                }
            }
            Err(err) => {
                error!("event=load status=error error={}", err);
                self.tasks = TaskList::new();
                self.ui.print_error(&err)?;
            }
        }
        Ok(())
    }

    /// Interactive session: greet, load, then one command per line until
    /// `bye` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.ui.print_welcome()?;
        self.load()?;

        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!("event=read_input status=error error={}", err);
                    self.ui
                        .print_error(&format!("An unexpected error occurred: {}", err))?;
                    break;
                }
            };

            if line.trim() == EXIT_KEYWORD {
                break;
            }

            self.handle_line(&line)?;
        }

        info!("event=session_end tasks={}", self.tasks.len());
        self.ui.print_farewell()
    }

    /// Process one input line. Command errors are printed, never returned;
    /// only terminal write failures come back as `Err`.
    pub fn handle_line(&mut self, line: &str) -> io::Result<()> {
        match self.dispatch(line) {
            Ok(reply) => self.render(reply),
            Err(err) => {
                debug!("event=command status=rejected error={}", err);
                self.ui.print_error(&err)
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> TaskResult<Reply> {
        match parse_command(line)? {
            Command::List => Ok(Reply::List),
            Command::Mark(index) => {
                let task = self.tasks.mark_done(index)?.clone();
                info!("event=mark index={}", index);
                // Rewrites even when the task was already done.
                self.save_all()?;
                Ok(Reply::Marked(task))
            }
            Command::Delete(index) => {
                let task = self.tasks.remove(index)?;
                info!("event=delete index={} remaining={}", index, self.tasks.len());
                self.save_all()?;
                Ok(Reply::Deleted(task))
            }
            Command::Add(task) => {
                let line = task.to_storage_string();
                self.tasks.add(task.clone());
                info!("event=add kind={} total={}", task.kind().letter(), self.tasks.len());
                // Only one new record exists, so it is appended rather than
                // rewriting the whole file.
                self.store.append(&line).inspect_err(log_storage_failure)?;
                Ok(Reply::Added(task))
            }
            Command::Unknown => Err(TaskError::UnknownCommand),
        }
    }

    /// Mirror the full list into the store. A failure leaves memory ahead of storage.
    fn save_all(&mut self) -> TaskResult<()> {
        self.store
            .rewrite(&self.tasks.to_storage_lines())
            .inspect_err(log_storage_failure)
    }

    fn render(&mut self, reply: Reply) -> io::Result<()> {
        match reply {
            Reply::List => self.ui.print_list(&self.tasks),
            Reply::Added(task) => self.ui.print_added(&task, self.tasks.len()),
            Reply::Marked(task) => self.ui.print_marked(&task),
            Reply::Deleted(task) => self.ui.print_deleted(&task, self.tasks.len()),
        }
    }
}

fn log_storage_failure(err: &TaskError) {
    error!("event=store_write status=error error={}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::storage::MemoryStore;
    use crate::fs::FileStore;
    use std::io::Cursor;

    fn shown(tasks: &TaskList) -> Vec<String> {
        tasks.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_todo_then_mark() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        app.handle_line("todo read book").unwrap();
        assert_eq!(shown(app.tasks()), vec!["[T][ ] read book"]);

        app.handle_line("mark 1").unwrap();
        assert_eq!(shown(app.tasks()), vec!["[T][X] read book"]);
        assert_eq!(app.store().lines, vec!["T | 1 | read book"]);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Got it. I've added this task:"));
        assert!(out.contains("Now you have 1 task in the list."));
        assert!(out.contains("Nice! I've marked this task as done:"));
    }

    #[test]
    fn test_add_appends_and_mark_delete_rewrite() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        app.handle_line("todo a").unwrap();
        app.handle_line("deadline b /by 2 Dec 2019 1800").unwrap();
        app.handle_line("event c /from 1 Jan 2020 0900 /to 1 Jan 2020 1000").unwrap();
        assert_eq!(app.store().appends, 3);
        assert_eq!(app.store().rewrites, 0);

        app.handle_line("mark 2").unwrap();
        app.handle_line("delete 1").unwrap();
        assert_eq!(app.store().appends, 3);
        assert_eq!(app.store().rewrites, 2);

        assert_eq!(app.store().lines, app.tasks().to_storage_lines());
    }

    #[test]
    fn test_mark_done_task_still_rewrites() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        app.handle_line("todo a").unwrap();
        app.handle_line("mark 1").unwrap();
        app.handle_line("mark 1").unwrap();
        assert_eq!(app.store().rewrites, 2);
        assert!(app.tasks().get(0).unwrap().is_done());
    }

    #[test]
    fn test_out_of_range_leaves_everything_unchanged() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        app.handle_line("todo a").unwrap();
        app.handle_line("todo b").unwrap();
        let before = app.tasks().clone();

        for line in ["mark 0", "mark 3", "delete 0", "delete 3", "delete -1"] {
            app.handle_line(line).unwrap();
        }

        assert_eq!(app.tasks(), &before);
        assert_eq!(app.store().rewrites, 0);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("OOPS!!! There is no task 3, the list has 2 task(s)."));
        assert!(out.contains("OOPS!!! There is no task 0, the list has 2 task(s)."));
    }

    #[test]
    fn test_delete_removes_only_that_task() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        for line in ["todo a", "todo b", "todo c", "todo d"] {
            app.handle_line(line).unwrap();
        }
        app.handle_line("delete 2").unwrap();

        let kept: Vec<&str> = app.tasks().iter().map(|t| t.description()).collect();
        assert_eq!(kept, vec!["a", "c", "d"]);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Noted. I've removed this task:\n   [T][ ] b"));
        assert!(out.contains("Now you have 3 tasks in the list."));
    }

    #[test]
    fn test_errors_are_reported_and_list_untouched() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        for line in [
            "dance",
            "todo",
            "deadline /by 2 Dec 2019 1800",
            "deadline homework",
            "event meeting /from 1 Jan 2020 0900",
            "deadline homework /by tomorrow",
            "mark one",
        ] {
            app.handle_line(line).unwrap();
        }

        assert!(app.tasks().is_empty());
        assert_eq!(app.store().appends, 0);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("OOPS!!! I'm sorry, but I don't know what that means :-("));
        assert!(out.contains("OOPS!!! The description of a todo cannot be empty."));
        assert!(out.contains("OOPS!!! The description of a deadline cannot be empty."));
        assert!(out.contains("OOPS!!! The deadline command must contain a /by."));
        assert!(out.contains("OOPS!!! The event command must contain a /to after the /from."));
        assert!(out.contains("OOPS!!! 'tomorrow' is not a valid date"));
        assert!(out.contains("OOPS!!! Invalid command format"));
    }

    #[test]
    fn test_storage_failure_keeps_memory_change() {
        let mut out = Vec::new();
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let mut app = App::new(store, Ui::new(&mut out, false));

        app.handle_line("todo a").unwrap();
        assert_eq!(app.tasks().len(), 1);
        assert!(app.store().lines.is_empty());
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("OOPS!!! Storage error: disk full"));
        assert!(!out.contains("Got it."));
    }

    #[test]
    fn test_load_skips_bad_lines_with_warning() {
        let mut out = Vec::new();
        let store = MemoryStore::with_lines(&["T | 0 | a", "nonsense", "T | 1 | b"]);
        let mut app = App::new(store, Ui::new(&mut out, false));

        app.load().unwrap();
        assert_eq!(shown(app.tasks()), vec!["[T][ ] a", "[T][X] b"]);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Skipped saved task on line 2: Unreadable saved task: nonsense"));
    }

    #[test]
    fn test_load_failure_starts_empty() {
        let mut out = Vec::new();
        let store = MemoryStore {
            fail_load: true,
            ..MemoryStore::default()
        };
        let mut app = App::new(store, Ui::new(&mut out, false));

        app.load().unwrap();
        assert!(app.tasks().is_empty());
        drop(app);

        assert!(String::from_utf8(out).unwrap().contains("OOPS!!! Storage error: load refused"));
    }

    #[test]
    fn test_run_stops_at_bye() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        let input = Cursor::new("todo a\nlist\n  bye  \ntodo never\n");
        app.run(input).unwrap();

        assert_eq!(shown(app.tasks()), vec!["[T][ ] a"]);
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Hello! I'm ttrack"));
        assert!(out.contains(" 1.[T][ ] a\n"));
        assert!(out.contains("Bye. Hope to see you again soon!"));
    }

    #[test]
    fn test_run_ends_at_end_of_input() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));

        app.run(Cursor::new("todo a\ntodo b")).unwrap();
        assert_eq!(app.tasks().len(), 2);
        drop(app);

        assert!(String::from_utf8(out).unwrap().contains("Bye."));
    }

    #[test]
    fn test_list_on_empty_session_has_no_task_lines() {
        let mut out = Vec::new();
        let mut app = App::new(MemoryStore::default(), Ui::new(&mut out, false));
        app.handle_line("list").unwrap();
        drop(app);

        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("1."));
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.run(Cursor::new(
            "todo read book\n\
             deadline homework /by 2 Dec 2019 1800\n\
             event meeting /from 1 Jan 2020 0900 /to 1 Jan 2020 1000\n\
             mark 3\n\
             delete 1\n\
             todo water plants\n\
             bye\n",
        ))
        .unwrap();
        let expected = shown(app.tasks());
        drop(app);

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.load().unwrap();

        assert_eq!(shown(app.tasks()), expected);
        assert_eq!(
            expected,
            vec![
                "[D][ ] homework (by: 02-12-2019 18:00)",
                "[E][X] meeting (from: 01-01-2020 09:00 to: 01-01-2020 10:00)",
                "[T][ ] water plants",
            ]
        );
    }

    #[test]
    fn test_pipe_in_description_is_rejected_before_saving() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.run(Cursor::new("todo pay rent | electricity\ntodo pay rent\nbye\n"))
            .unwrap();
        let expected = shown(app.tasks());
        drop(app);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("OOPS!!! A description cannot contain '|'."));

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.load().unwrap();
        assert_eq!(shown(app.tasks()), expected);
        assert_eq!(expected, vec!["[T][ ] pay rent"]);
    }

    #[test]
    fn test_add_after_hand_edited_file_keeps_both_tasks() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "T | 0 | a").unwrap();

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.run(Cursor::new("todo b\nbye\n")).unwrap();
        drop(app);

        let mut out = Vec::new();
        let mut app = App::new(FileStore::new(&path), Ui::new(&mut out, false));
        app.load().unwrap();
        assert_eq!(shown(app.tasks()), vec!["[T][ ] a", "[T][ ] b"]);
    }
}
