#![allow(dead_code)]

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use rocket::http::ContentType;
use rocket::local::asynchronous::{Client, LocalResponse};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use taskmanager::build_rocket;
use taskmanager::config::AppConfig;
use taskmanager::db::set_up_db;
use taskmanager::services::NewTask;

/// SQLite file inside a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn test_config() -> (AppConfig, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("tasks.db").display());
    (AppConfig::for_database(url), dir)
}

/// Migrated database for service-level tests.
pub async fn test_db() -> (DatabaseConnection, TempDir) {
    let (config, dir) = test_config();
    let db = set_up_db(&config).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    (db, dir)
}

/// Cookie-tracking client over a full application instance.
pub struct TestApp {
    pub client: Client,
    _dir: TempDir,
}

pub async fn setup() -> TestApp {
    let (config, dir) = test_config();
    let rocket = build_rocket(config).await.expect("build rocket");
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    TestApp { client, _dir: dir }
}

impl TestApp {
    pub fn db(&self) -> &DatabaseConnection {
        self.client
            .rocket()
            .state::<DatabaseConnection>()
            .expect("managed database")
    }

    /// GETs a form page and pulls the CSRF token out of its hidden input.
    pub async fn csrf_token(&self, form_path: &str) -> String {
        let body = self
            .client
            .get(form_path.to_string())
            .dispatch()
            .await
            .into_string()
            .await
            .expect("form body");
        extract_csrf_token(&body).expect("csrf token in form")
    }

    pub async fn post_form(&self, path: &str, body: String) -> LocalResponse<'_> {
        self.client
            .post(path.to_string())
            .header(ContentType::Form)
            .body(body)
            .dispatch()
            .await
    }

    pub async fn add_category(&self, name: &str) -> LocalResponse<'_> {
        let token = self.csrf_token("/add_category").await;
        self.post_form("/add_category", format!("category_name={}&csrf_token={}", name, token))
            .await
    }

    pub async fn add_task(&self, name: &str, category_id: i32, due_date: &str) -> LocalResponse<'_> {
        // The task form is hidden until a category exists; the category form always renders.
        let token = self.csrf_token("/add_category").await;
        self.post_form(
            "/add_task",
            format!(
                "task_name={}&task_description=Write+it+up&due_date={}&category_id={}&csrf_token={}",
                name, due_date, category_id, token
            ),
        )
        .await
    }
}

pub fn extract_csrf_token(body: &str) -> Option<String> {
    let marker = "name=\"csrf_token\" value=\"";
    let start = body.find(marker)? + marker.len();
    let end = body[start..].find('"')? + start;
    Some(body[start..end].to_string())
}

pub fn new_task(name: &str, category_id: i32) -> NewTask {
    NewTask {
        task_name: name.to_string(),
        task_description: format!("{} description", name),
        is_urgent: false,
        due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        category_id,
    }
}
