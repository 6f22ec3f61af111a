use log::warn;

use crate::error::{TaskError, TaskResult};
use crate::fs::storage::TaskStore;
use crate::models::{Task, TaskList};

/// A stored line that could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the store
    pub line_number: usize,
    pub error: TaskError,
}

#[derive(Debug, Default)]
pub struct LoadedTasks {
    pub tasks: TaskList,
    pub rejected: Vec<RejectedLine>,
}

/// Load every task from the store.
///
/// Lines are decoded independently: blank lines are ignored and a malformed
/// line is skipped and reported while the rest still load. Only a failure to
/// read the store itself is an error.
pub fn load_tasks(store: &dyn TaskStore) -> TaskResult<LoadedTasks> {
    let mut loaded = LoadedTasks::default();

    for (i, line) in store.load()?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match Task::from_storage_line(line) {
            Ok(task) => loaded.tasks.add(task),
            Err(error) => {
                warn!("event=load_skip line={} error={}", i + 1, error);
                loaded.rejected.push(RejectedLine {
                    line_number: i + 1,
                    error,
                });
            }
        }
    }

    Ok(loaded)
}
