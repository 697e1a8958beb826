use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::feed_service::FeedService;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::memory::user_repository::InMemoryUserRepository;
use infrastructure::jwt::TokenService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let tokens = Arc::new(TokenService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));
    info!(ttl_seconds = tokens.ttl_seconds(), "token service ready");
    let auth_service = Arc::new(AuthService::new(InMemoryUserRepository::new(), tokens));
    let feed_service = Arc::new(FeedService::new(InMemoryPostRepository::seeded()));

    for seed in &settings.seed_users {
        if let Some(user) = auth_service
            .seed_user(&seed.username, &seed.password)
            .await?
        {
            info!(user_id = user.id, username = %user.username, "seed user created");
        }
    }

    let state = AppState::new(auth_service, feed_service);
    server::run_http(&settings, state).await
}
