use rocket::form::Form;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::context;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::csrf::CsrfToken;
use crate::entities::{category, task};
use crate::errors::AppError;
use crate::services::{CategoryService, NewTask, TaskService};
use crate::validation::{parse_due_date, TaskFormValidation};
use crate::views::app_template::AppTemplate;

/// Add task form
#[derive(FromForm)]
pub struct TaskForm<'r> {
    pub task_name: &'r str,
    pub task_description: &'r str,
    #[field(default = false)]
    pub is_urgent: bool,
    pub due_date: &'r str,
    pub category_id: i32,
    #[field(default = "")]
    pub csrf_token: &'r str,
}

/// One line of the task list.
#[derive(Serialize)]
pub struct TaskRow {
    pub id: i32,
    pub task_name: String,
    pub task_description: String,
    pub is_urgent: bool,
    pub due_date: String,
    pub category_id: i32,
    pub category_name: String,
}

impl From<(task::Model, Option<category::Model>)> for TaskRow {
    fn from((task, category): (task::Model, Option<category::Model>)) -> Self {
        TaskRow {
            id: task.id,
            due_date: task.due_date.format("%d %B %Y").to_string(),
            category_name: category.map(|c| c.to_string()).unwrap_or_default(),
            task_name: task.task_name,
            task_description: task.task_description,
            is_urgent: task.is_urgent,
            category_id: task.category_id,
        }
    }
}

/// Home page: every task with its category, by id
#[get("/")]
pub async fn home(db: &State<DatabaseConnection>) -> Result<AppTemplate, AppError> {
    let tasks: Vec<TaskRow> = TaskService::find_all(db.inner())
        .await?
        .into_iter()
        .map(TaskRow::from)
        .collect();

    Ok(AppTemplate::new("tasks", context! {
        title: "Tasks",
        tasks: tasks,
    }))
}

#[get("/add_task")]
pub async fn add_task_form(db: &State<DatabaseConnection>) -> Result<AppTemplate, AppError> {
    let categories = CategoryService::find_all(db.inner()).await?;

    Ok(AppTemplate::new("add_task", context! {
        title: "Add Task",
        categories: categories,
    }))
}

#[post("/add_task", data = "<form>")]
pub async fn add_task(
    db: &State<DatabaseConnection>,
    csrf: CsrfToken,
    form: Form<TaskForm<'_>>,
) -> Result<Flash<Redirect>, AppError> {
    if !csrf.verify(form.csrf_token) {
        log::warn!("task form rejected: CSRF verification failed");
        return Ok(Flash::error(Redirect::to("/add_task"), "CSRF verification failed"));
    }

    let mut errors = TaskFormValidation::new(form.task_name, form.task_description)
        .validate_form()
        .err()
        .unwrap_or_default();
    let due_date = match parse_due_date(form.due_date) {
        Ok(due_date) => Some(due_date),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let due_date = match due_date {
        Some(due_date) if errors.is_empty() => due_date,
        _ => {
            log::warn!("task form rejected: {}", errors.join("; "));
            return Ok(Flash::error(Redirect::to("/add_task"), errors.join(" ")));
        }
    };

    let task = TaskService::create(db.inner(), NewTask {
        task_name: form.task_name.to_owned(),
        task_description: form.task_description.to_owned(),
        is_urgent: form.is_urgent,
        due_date,
        category_id: form.category_id,
    })
    .await?;

    Ok(Flash::success(
        Redirect::to("/"),
        format!("Task \"{}\" added", task.task_name),
    ))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![home, add_task_form, add_task]
}
