use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::auth::{authenticate, change_password, me, register};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/registration", post(register))
        .route("/authentication", post(authenticate));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/me/password", patch(change_password))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
