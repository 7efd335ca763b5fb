use sea_orm::*;
use crate::entities::{prelude::*, category, task};
use crate::errors::AppError;

/// Category queries and mutations.
pub struct CategoryService;

impl CategoryService {
    /// All categories ordered by name.
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<category::Model>, AppError> {
        Ok(Category::find()
            .order_by_asc(category::Column::CategoryName)
            .all(db)
            .await?)
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<category::Model, AppError> {
        Category::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
    }

    /// Tasks of one category, oldest first.
    pub async fn tasks_of(
        db: &DatabaseConnection,
        category: &category::Model,
    ) -> Result<Vec<task::Model>, AppError> {
        Ok(category
            .find_related(Task)
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?)
    }

    /// Fails with `UniqueViolation` when the name is taken.
    pub async fn create(db: &DatabaseConnection, category_name: &str) -> Result<category::Model, AppError> {
        let created = category::ActiveModel {
            category_name: Set(category_name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::info!("created category {} ({})", created, created.id);
        Ok(created)
    }

    /// Renames an existing category. A missing id is `NotFound`; nothing is inserted.
    pub async fn rename(
        db: &DatabaseConnection,
        id: i32,
        category_name: &str,
    ) -> Result<category::Model, AppError> {
        let existing = Self::find_by_id(db, id).await?;
        let old_name = existing.category_name.clone();

        let mut active_model: category::ActiveModel = existing.into();
        active_model.category_name = Set(category_name.to_owned());
        let updated = active_model.update(db).await?;

        log::info!("renamed category {} from {} to {}", id, old_name, updated);
        Ok(updated)
    }

    /// Deletes a category; the database drops its tasks through the
    /// `ON DELETE CASCADE` foreign key. Returns how many tasks went with it.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, AppError> {
        let existing = Self::find_by_id(db, id).await?;
        let task_count = existing.find_related(Task).count(db).await?;
        let name = existing.category_name.clone();

        let result = existing.delete(db).await?;
        if result.rows_affected == 0 {
            // Removed concurrently between lookup and delete
            return Err(AppError::NotFound);
        }

        log::info!("deleted category {} ({}) with {} task(s)", name, id, task_count);
        Ok(task_count)
    }
}
