use chrono::NaiveDate;
use sea_orm::*;
use crate::entities::{prelude::*, category, task};
use crate::errors::AppError;

/// Field values for a new task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_name: String,
    pub task_description: String,
    pub is_urgent: bool,
    pub due_date: NaiveDate,
    pub category_id: i32,
}

/// Task queries and mutations.
pub struct TaskService;

impl TaskService {
    /// All tasks by ascending id, each joined with its category.
    pub async fn find_all(
        db: &DatabaseConnection,
    ) -> Result<Vec<(task::Model, Option<category::Model>)>, AppError> {
        Ok(Task::find()
            .find_also_related(Category)
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?)
    }

    /// Inserts a task. An unknown `category_id` is rejected by the foreign key
    /// (`ForeignKeyViolation`), a taken name by the unique index (`UniqueViolation`).
    pub async fn create(db: &DatabaseConnection, new_task: NewTask) -> Result<task::Model, AppError> {
        let created = task::ActiveModel {
            task_name: Set(new_task.task_name),
            task_description: Set(new_task.task_description),
            is_urgent: Set(new_task.is_urgent),
            due_date: Set(new_task.due_date),
            category_id: Set(new_task.category_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::info!("created task {}", created);
        Ok(created)
    }
}
