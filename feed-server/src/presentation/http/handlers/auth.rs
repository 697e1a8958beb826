use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, PasswordChangeRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordChangeDto {
    #[validate(length(min = 1))]
    pub(crate) old_password: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) token: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/registration",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            token: result.token,
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/authentication",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto {
            token: result.token,
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Json<UserDto>> {
    let user = state.auth_service.me(auth.user_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/me/password",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    request_body = PasswordChangeDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or wrong old password")
    )
)]
pub(crate) async fn change_password(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<PasswordChangeDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    let req = PasswordChangeRequest {
        old_password: dto.old_password,
        new_password: dto.new_password,
    };
    state
        .auth_service
        .change_password(auth.user_id, req)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
