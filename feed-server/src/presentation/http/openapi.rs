use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{
    AuthResponseDto, LoginDto, PasswordChangeDto, RegisterDto, UserDto,
};
use crate::presentation::http::handlers::posts::{
    CoordinatesDto, CreatePostDto, PostDto, PostTypeDto, RepostDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::authenticate,
        crate::presentation::http::handlers::auth::me,
        crate::presentation::http::handlers::auth::change_password,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::posts::like_post,
        crate::presentation::http::handlers::posts::dislike_post,
        crate::presentation::http::handlers::posts::share_post,
        crate::presentation::http::handlers::posts::repost
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            PasswordChangeDto,
            AuthResponseDto,
            UserDto,
            PostTypeDto,
            CoordinatesDto,
            CreatePostDto,
            UpdatePostDto,
            RepostDto,
            PostDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and authentication"),
        (name = "posts", description = "Feed endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
