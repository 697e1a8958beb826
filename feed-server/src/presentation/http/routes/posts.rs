use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, dislike_post, get_post, like_post, list_posts, repost, share_post,
    update_post,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

/// Every post route requires a bearer token.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/repost", post(repost))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/posts/{id}/likes", post(like_post).delete(dislike_post))
        .route("/posts/{id}/share", post(share_post))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
