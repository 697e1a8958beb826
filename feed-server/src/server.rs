use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

pub(crate) fn build_router(state: AppState, settings: &Settings) -> anyhow::Result<Router> {
    let app = http::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                ))),
        );

    let app = apply_trace(app);
    apply_cors(app, &settings.cors_origins)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        return (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string());
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("unhandled middleware error: {err}"),
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::auth_service::AuthService;
    use crate::application::feed_service::FeedService;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::data::repositories::memory::user_repository::InMemoryUserRepository;
    use crate::infrastructure::jwt::TokenService;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;

    fn settings(body_limit: usize) -> Settings {
        Settings {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_ttl_seconds: 3600,
            http_addr: "127.0.0.1:0".to_string(),
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
            http_request_body_limit_bytes: body_limit,
            http_request_timeout_secs: 10,
            seed_users: Vec::new(),
        }
    }

    fn state(settings: &Settings) -> AppState {
        let tokens = Arc::new(TokenService::new(
            &settings.jwt_secret,
            settings.jwt_ttl_seconds,
        ));
        AppState::new(
            Arc::new(AuthService::new(InMemoryUserRepository::new(), tokens)),
            Arc::new(FeedService::new(InMemoryPostRepository::seeded())),
        )
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let settings = settings(16);
        let app = build_router(state(&settings), &settings).expect("router must build");

        let body = r#"{"username":"vasya","password":"a-rather-long-password"}"#;
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/registration")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let settings = settings(1024 * 1024);
        let app = build_router(state(&settings), &settings).expect("router must build");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
