use rocket::form::Form;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::context;
use sea_orm::DatabaseConnection;

use crate::csrf::CsrfToken;
use crate::errors::AppError;
use crate::services::CategoryService;
use crate::validation::CategoryFormValidation;
use crate::views::app_template::AppTemplate;

/// Add/edit category form
#[derive(FromForm)]
pub struct CategoryForm<'r> {
    pub category_name: &'r str,
    #[field(default = "")]
    pub csrf_token: &'r str,
}

impl CategoryForm<'_> {
    /// Flash to send back to `back_to` when the submission must be rejected.
    fn reject(&self, csrf: &CsrfToken, back_to: String) -> Option<Flash<Redirect>> {
        if !csrf.verify(self.csrf_token) {
            log::warn!("category form rejected: CSRF verification failed");
            return Some(Flash::error(Redirect::to(back_to), "CSRF verification failed"));
        }
        if let Err(errors) = CategoryFormValidation::new(self.category_name).validate_form() {
            log::warn!("category form rejected: {}", errors.join("; "));
            return Some(Flash::error(Redirect::to(back_to), errors.join(" ")));
        }
        None
    }
}

/// Path ids that do not parse cannot name a row, so they are `NotFound` too.
fn parse_id(id: &str) -> Result<i32, AppError> {
    id.parse::<i32>().map_err(|_| AppError::NotFound)
}

/// Category list, ordered by name
#[get("/categories")]
pub async fn categories(db: &State<DatabaseConnection>) -> Result<AppTemplate, AppError> {
    let categories = CategoryService::find_all(db.inner()).await?;

    Ok(AppTemplate::new("categories", context! {
        title: "Categories",
        categories: categories,
    }))
}

#[get("/add_category")]
pub fn add_category_form() -> AppTemplate {
    AppTemplate::new("add_category", context! {
        title: "Add Category",
    })
}

#[post("/add_category", data = "<form>")]
pub async fn add_category(
    db: &State<DatabaseConnection>,
    csrf: CsrfToken,
    form: Form<CategoryForm<'_>>,
) -> Result<Flash<Redirect>, AppError> {
    if let Some(rejected) = form.reject(&csrf, "/add_category".to_string()) {
        return Ok(rejected);
    }

    let category = CategoryService::create(db.inner(), form.category_name).await?;

    Ok(Flash::success(
        Redirect::to("/categories"),
        format!("Category \"{}\" added", category),
    ))
}

#[get("/edit_category/<id>")]
pub async fn edit_category_form(db: &State<DatabaseConnection>, id: &str) -> Result<AppTemplate, AppError> {
    let id = parse_id(id)?;
    let category = CategoryService::find_by_id(db.inner(), id).await?;

    Ok(AppTemplate::new("edit_category", context! {
        title: "Edit Category",
        category: category,
    }))
}

#[post("/edit_category/<id>", data = "<form>")]
pub async fn edit_category(
    db: &State<DatabaseConnection>,
    csrf: CsrfToken,
    id: &str,
    form: Form<CategoryForm<'_>>,
) -> Result<Flash<Redirect>, AppError> {
    let id = parse_id(id)?;
    if let Some(rejected) = form.reject(&csrf, format!("/edit_category/{}", id)) {
        return Ok(rejected);
    }

    let category = CategoryService::rename(db.inner(), id, form.category_name).await?;

    Ok(Flash::success(
        Redirect::to("/categories"),
        format!("Category renamed to \"{}\"", category),
    ))
}

/// Deletes the category and, through the foreign key, its tasks.
#[get("/delete_category/<id>")]
pub async fn delete_category(db: &State<DatabaseConnection>, id: &str) -> Result<Flash<Redirect>, AppError> {
    let id = parse_id(id)?;
    let removed_tasks = CategoryService::delete(db.inner(), id).await?;

    let message = match removed_tasks {
        0 => "Category deleted".to_string(),
        1 => "Category and its task deleted".to_string(),
        n => format!("Category and its {} tasks deleted", n),
    };
    Ok(Flash::success(Redirect::to("/categories"), message))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        categories,
        add_category_form,
        add_category,
        edit_category_form,
        edit_category,
        delete_category,
    ]
}
