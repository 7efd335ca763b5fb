pub mod category_service;
pub mod task_service;

pub use category_service::CategoryService;
pub use task_service::{NewTask, TaskService};
