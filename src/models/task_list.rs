use crate::error::{TaskError, TaskResult};
use crate::models::Task;

/// Ordered tasks. Insertion order is also display order and storage order.
///
/// Indices taken by this type are zero-based and signed, exactly as they
/// come out of `parse_index` (`mark 0` arrives as `-1`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    #[cfg(test)]
    pub fn get(&self, index: i64) -> TaskResult<&Task> {
        let index = self.check_index(index)?;
        Ok(&self.tasks[index])
    }

    /// Mark the task done and hand back a view of it for confirmation.
    pub fn mark_done(&mut self, index: i64) -> TaskResult<&Task> {
        let index = self.check_index(index)?;
        let task = &mut self.tasks[index];
        task.mark_as_done();
        Ok(task)
    }

    pub fn remove(&mut self, index: i64) -> TaskResult<Task> {
        let index = self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Full data file content, one line per task in list order.
    pub fn to_storage_lines(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_storage_string).collect()
    }

    fn check_index(&self, index: i64) -> TaskResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.tasks.len())
            .ok_or(TaskError::IndexOutOfRange {
                number: index.saturating_add(1),
                size: self.tasks.len(),
            })
    }
}
