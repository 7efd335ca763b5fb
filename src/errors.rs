use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket::Request;
use sea_orm::{DbErr, SqlErr};
use std::io::Cursor;

/// Application-wide error type.
#[derive(Debug)]
pub enum AppError {
    /// Any other database error
    Database(DbErr),
    /// A unique column already holds the value (category or task name)
    UniqueViolation(String),
    /// A foreign key points at a row that does not exist
    ForeignKeyViolation(String),
    /// Lookup by id found nothing (404 Not Found)
    NotFound,
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::NotFound => Status::NotFound,
            AppError::Database(_)
            | AppError::UniqueViolation(_)
            | AppError::ForeignKeyViolation(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::NotFound {
            log::warn!("{} {}: {}", request.method(), request.uri(), self);
        } else {
            log::error!("{} {}: {}", request.method(), request.uri(), self);
        }

        // Constraint violations surface as a plain server error page.
        let message = match &self {
            AppError::NotFound => "Not Found",
            AppError::Database(_)
            | AppError::UniqueViolation(_)
            | AppError::ForeignKeyViolation(_) => "Database Error",
        };

        Response::build()
            .status(status)
            .sized_body(message.len(), Cursor::new(message))
            .ok()
    }
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::UniqueViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => AppError::ForeignKeyViolation(msg),
            _ => AppError::Database(e),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::UniqueViolation(msg) => write!(f, "Unique constraint violated: {}", msg),
            AppError::ForeignKeyViolation(msg) => write!(f, "Foreign key constraint violated: {}", msg),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}
