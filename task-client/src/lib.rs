pub mod api;

pub use api::{HttpTaskApi, TaskApi, START_TASK_PATH, TASK_STATUS_PATH};
