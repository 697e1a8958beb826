use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new().nest(
        "/api/v1",
        auth::router(state.clone()).merge(posts::router(state)),
    )
}
