use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

use crate::config::AppConfig;

/// Opens the connection pool for `DB_URL`.
///
/// SQLite connections are opened by sqlx with `PRAGMA foreign_keys = ON`,
/// which the task -> category cascade relies on.
pub async fn set_up_db(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .sqlx_logging(config.debug)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(options).await?;
    log::info!("connected to {:?} database", db.get_database_backend());

    Ok(db)
}
