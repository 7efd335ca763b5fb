use rocket::http::Status;
use sea_orm::{EntityTrait, PaginatorTrait};
use taskmanager::entities::prelude::*;
use taskmanager::services::CategoryService;

mod common;

#[rocket::async_test]
async fn test_categories_page_lists_by_name() {
    let app = common::setup().await;

    for name in ["Work", "Errands", "Home"] {
        let response = app.add_category(name).await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/categories"));
    }

    let response = app.client.get("/categories").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();

    // "Home" is also a nav link, so anchor on the list markup
    let errands = body.find("Errands</span>").unwrap();
    let home = body.find("Home</span>").unwrap();
    let work = body.find("Work</span>").unwrap();
    assert!(errands < home && home < work);
}

#[rocket::async_test]
async fn test_add_category_form_renders_csrf_token() {
    let app = common::setup().await;

    let response = app.client.get("/add_category").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();

    let token = common::extract_csrf_token(&body).unwrap();
    assert!(!token.is_empty());
}

#[rocket::async_test]
async fn test_duplicate_category_is_server_error() {
    let app = common::setup().await;

    assert_eq!(app.add_category("Work").await.status(), Status::SeeOther);
    assert_eq!(app.add_category("Work").await.status(), Status::InternalServerError);
    assert_eq!(Category::find().count(app.db()).await.unwrap(), 1);
}

#[rocket::async_test]
async fn test_post_without_csrf_token_writes_nothing() {
    let app = common::setup().await;

    let response = app.post_form("/add_category", "category_name=Work".to_string()).await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/add_category"));

    let response = app
        .post_form("/add_category", "category_name=Work&csrf_token=forged".to_string())
        .await;
    assert_eq!(response.status(), Status::SeeOther);

    assert_eq!(Category::find().count(app.db()).await.unwrap(), 0);
}

#[rocket::async_test]
async fn test_overlong_category_name_is_rejected_with_flash() {
    let app = common::setup().await;

    let response = app.add_category(&"x".repeat(26)).await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/add_category"));
    assert_eq!(Category::find().count(app.db()).await.unwrap(), 0);

    // The flash shows up on the next page
    let body = app
        .client
        .get("/add_category")
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();
    assert!(body.contains("Category name must be 1 to 25 characters"));
}

#[rocket::async_test]
async fn test_edit_category() {
    let app = common::setup().await;
    let category = CategoryService::create(app.db(), "Wrok").await.unwrap();
    let path = format!("/edit_category/{}", category.id);

    let response = app.client.get(path.clone()).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains("value=\"Wrok\""));

    let token = common::extract_csrf_token(&body).unwrap();
    let response = app
        .post_form(&path, format!("category_name=Work&csrf_token={}", token))
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/categories"));

    let renamed = CategoryService::find_by_id(app.db(), category.id).await.unwrap();
    assert_eq!(renamed.category_name, "Work");
}

#[rocket::async_test]
async fn test_edit_missing_category_is_404() {
    let app = common::setup().await;

    let response = app.client.get("/edit_category/99").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let token = app.csrf_token("/add_category").await;
    let response = app
        .post_form("/edit_category/99", format!("category_name=Ghost&csrf_token={}", token))
        .await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(Category::find().count(app.db()).await.unwrap(), 0);
}

#[rocket::async_test]
async fn test_delete_missing_category_is_404() {
    let app = common::setup().await;

    let response = app.client.get("/delete_category/5").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_unparseable_ids_are_404() {
    let app = common::setup().await;
    CategoryService::create(app.db(), "Work").await.unwrap();

    let response = app.client.get("/edit_category/abc").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let token = app.csrf_token("/add_category").await;
    let response = app
        .post_form(
            "/edit_category/99999999999",
            format!("category_name=Ghost&csrf_token={}", token),
        )
        .await;
    assert_eq!(response.status(), Status::NotFound);

    let response = app.client.get("/delete_category/99999999999").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let names: Vec<String> = CategoryService::find_all(app.db())
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.category_name)
        .collect();
    assert_eq!(names, vec!["Work"]);
}

#[rocket::async_test]
async fn test_overlong_rename_is_rejected_with_flash() {
    let app = common::setup().await;
    let category = CategoryService::create(app.db(), "Work").await.unwrap();
    let path = format!("/edit_category/{}", category.id);

    let token = app.csrf_token(&path).await;
    let response = app
        .post_form(&path, format!("category_name={}&csrf_token={}", "y".repeat(26), token))
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some(path.as_str()));

    let unchanged = CategoryService::find_by_id(app.db(), category.id).await.unwrap();
    assert_eq!(unchanged.category_name, "Work");

    let body = app
        .client
        .get(path.clone())
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();
    assert!(body.contains("Category name must be 1 to 25 characters"));
}
