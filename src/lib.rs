#[macro_use]
extern crate rocket;

use migration::{Migrator, MigratorTrait};
use rocket::fs::{FileServer, relative};
use rocket::Build;
use rocket_dyn_templates::Template;

pub mod config;
pub mod controllers;
pub mod csrf;
pub mod db;
pub mod entities;
pub mod errors;
pub mod fairings;
pub mod services;
pub mod validation;
pub mod views;

use config::AppConfig;
use fairings::context::ContextFairing;

/// Builds the Rocket instance: connects the database, brings the schema up
/// to date and mounts every route. Tests build through this as well.
pub async fn build_rocket(config: AppConfig) -> anyhow::Result<rocket::Rocket<Build>> {
    let figment = config.figment()?;

    let db = db::set_up_db(&config).await?;
    Migrator::up(&db, None).await?;

    Ok(rocket::custom(figment)
        .manage(db)
        .attach(Template::fairing())
        .attach(ContextFairing)
        .mount("/", controllers::tasks::routes())
        .mount("/", controllers::categories::routes())
        .mount("/static", FileServer::from(relative!("static"))))
}
