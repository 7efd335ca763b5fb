use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tasks go away with their category: the cascade lives in the schema,
        // not in application code.
        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Task::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Task::TaskName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Task::TaskDescription).text().not_null())
                    .col(ColumnDef::new(Task::IsUrgent).boolean().not_null().default(false))
                    .col(ColumnDef::new(Task::DueDate).date().not_null())
                    .col(ColumnDef::new(Task::CategoryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task-category_id")
                            .from(Task::Table, Task::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
    TaskName,
    TaskDescription,
    IsUrgent,
    DueDate,
    CategoryId,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
}
