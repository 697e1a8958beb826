use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{
    Coordinates, CreatePostRequest, PostType, RepostRequest, UpdatePostRequest,
};
use crate::domain::variant::{PostCommon, PostVariant};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum PostTypeDto {
    Post,
    Event,
    Video,
    #[serde(alias = "ADD")]
    Ad,
    Repost,
    #[serde(other)]
    Unknown,
}

impl From<PostTypeDto> for PostType {
    fn from(dto: PostTypeDto) -> Self {
        match dto {
            PostTypeDto::Post => PostType::Post,
            PostTypeDto::Event => PostType::Event,
            PostTypeDto::Video => PostType::Video,
            PostTypeDto::Ad => PostType::Ad,
            PostTypeDto::Repost => PostType::Repost,
            PostTypeDto::Unknown => PostType::Unknown,
        }
    }
}

impl From<PostType> for PostTypeDto {
    fn from(kind: PostType) -> Self {
        match kind {
            PostType::Post => PostTypeDto::Post,
            PostType::Event => PostTypeDto::Event,
            PostType::Video => PostTypeDto::Video,
            PostType::Ad => PostTypeDto::Ad,
            PostType::Repost => PostTypeDto::Repost,
            PostType::Unknown => PostTypeDto::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct CoordinatesDto {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl From<CoordinatesDto> for Coordinates {
    fn from(dto: CoordinatesDto) -> Self {
        Coordinates {
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

impl From<Coordinates> for CoordinatesDto {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) post_type: PostTypeDto,
    #[validate(url)]
    pub(crate) url: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) coordinates: Option<CoordinatesDto>,
    pub(crate) source_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(url)]
    pub(crate) url: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) coordinates: Option<CoordinatesDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepostDto {
    #[validate(length(min = 1))]
    pub(crate) content: String,
    pub(crate) source_id: Option<i64>,
}

/// Wire shape of every post variant. Fields a variant does not carry are
/// omitted; ads carry no counters or flags.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) post_type: PostTypeDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) share_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) liked_by_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) commented_by_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) shared_by_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub(crate) source: Option<Box<PostDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) coordinates: Option<CoordinatesDto>,
}

impl PostDto {
    fn from_common(common: PostCommon, post_type: PostType) -> Self {
        Self {
            id: common.id,
            author: common.author,
            content: common.content,
            created: common.created,
            post_type: post_type.into(),
            like_count: Some(common.like_count),
            comment_count: Some(common.comment_count),
            share_count: Some(common.share_count),
            liked_by_me: Some(common.liked_by_me),
            commented_by_me: Some(common.commented_by_me),
            shared_by_me: Some(common.shared_by_me),
            source: None,
            url: None,
            address: None,
            coordinates: None,
        }
    }
}

impl From<PostVariant> for PostDto {
    fn from(variant: PostVariant) -> Self {
        match variant {
            PostVariant::Post(common) => Self::from_common(common, PostType::Post),
            PostVariant::Event {
                common,
                address,
                coordinates,
            } => Self {
                address,
                coordinates: Some(coordinates.into()),
                ..Self::from_common(common, PostType::Event)
            },
            PostVariant::Video { common, url } => Self {
                url,
                ..Self::from_common(common, PostType::Video)
            },
            PostVariant::Ad(ad) => Self {
                id: ad.id,
                author: ad.author,
                content: ad.content,
                created: ad.created,
                post_type: PostTypeDto::Ad,
                like_count: None,
                comment_count: None,
                share_count: None,
                liked_by_me: None,
                commented_by_me: None,
                shared_by_me: None,
                source: None,
                url: ad.url,
                address: None,
                coordinates: None,
            },
            PostVariant::Repost { common, source } => Self {
                source: Some(Box::new(PostDto::from(*source))),
                ..Self::from_common(common, PostType::Repost)
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Posts listed", body = [PostDto]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.feed_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.feed_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error or unknown post type"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Repost source not found")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        content: dto.content,
        post_type: dto.post_type.into(),
        url: dto.url,
        address: dto.address,
        coordinates: dto.coordinates.map(Coordinates::from),
        source_id: dto.source_id,
    };

    let post = state.feed_service.create_post(&auth.username, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the author may edit"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = UpdatePostRequest {
        content: dto.content,
        url: dto.url,
        address: dto.address,
        coordinates: dto.coordinates.map(Coordinates::from),
    };

    let post = state
        .feed_service
        .update_post(&auth.username, id, req)
        .await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the author may delete"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.feed_service.delete_post(&auth.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/likes",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post liked", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.feed_service.like_post(id).await?;
    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/likes",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Like withdrawn", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn dislike_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.feed_service.dislike_post(id).await?;
    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/share",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post shared", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn share_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.feed_service.share_post(id).await?;
    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/repost",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = RepostDto,
    responses(
        (status = 201, description = "Repost created", body = PostDto),
        (status = 400, description = "Missing source"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Source post not found")
    )
)]
pub(crate) async fn repost(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<RepostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = RepostRequest {
        content: dto.content,
        source_id: dto.source_id,
    };

    let post = state.feed_service.repost(&auth.username, req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}
