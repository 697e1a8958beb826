use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } | DomainError::InvalidArgument(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                DomainError::InvalidCredentials | DomainError::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(%detail, "unexpected domain error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_of(DomainError::NotFound("post id: 1".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::InvalidArgument("bad".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::AlreadyExists("username".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Unauthorized.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(DomainError::Forbidden.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(DomainError::Unexpected("boom".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
