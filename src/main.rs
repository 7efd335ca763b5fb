#[macro_use]
extern crate rocket;

use taskmanager::build_rocket;
use taskmanager::config::AppConfig;

#[launch]
async fn rocket() -> _ {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");
    build_rocket(config).await.expect("Failed to start application")
}
