use chrono::NaiveDate;
use validator::{Validate, ValidationErrors};

/// Format of `<input type="date">` values
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Category form checks. The limit matches the `category_name` column.
#[derive(Debug, Validate)]
pub struct CategoryFormValidation {
    #[validate(length(min = 1, max = 25, message = "Category name must be 1 to 25 characters"))]
    pub category_name: String,
}

impl CategoryFormValidation {
    pub fn new(category_name: &str) -> Self {
        Self {
            category_name: category_name.to_string(),
        }
    }

    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        self.validate().map_err(messages)
    }
}

/// Task form checks. Limits match the `task` columns.
#[derive(Debug, Validate)]
pub struct TaskFormValidation {
    #[validate(length(min = 1, max = 50, message = "Task name must be 1 to 50 characters"))]
    pub task_name: String,

    #[validate(length(min = 1, message = "Task description is required"))]
    pub task_description: String,
}

impl TaskFormValidation {
    pub fn new(task_name: &str, task_description: &str) -> Self {
        Self {
            task_name: task_name.to_string(),
            task_description: task_description.to_string(),
        }
    }

    pub fn validate_form(&self) -> Result<(), Vec<String>> {
        self.validate().map_err(messages)
    }
}

/// Parses a due date as submitted by the date input.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| format!("Due date must be a date in YYYY-MM-DD format, got '{}'", value))
}

fn messages(errors: ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let msg = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            messages.push(msg);
        }
    }
    messages.sort();
    messages
}
