pub mod task;
pub mod task_list;

pub use task::Task;
pub use task_list::TaskList;
