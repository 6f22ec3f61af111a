pub mod storage;
pub mod task;

pub use storage::{FileStore, TaskStore};
pub use task::load_tasks;
