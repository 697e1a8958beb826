use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::variant::PostVariant;

/// Id given to a record that has not been stored yet.
pub(crate) const UNASSIGNED_POST_ID: i64 = -1;

/// Discriminant selecting which variant a stored record represents.
///
/// `Unknown` stands for any tag this server does not recognise; the resolver
/// rejects it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PostType {
    Post,
    Event,
    Video,
    Ad,
    Repost,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Coordinates {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl Coordinates {
    pub(crate) fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation {
                field: "latitude",
                message: "must be within -90..90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation {
                field: "longitude",
                message: "must be within -180..180",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Source of a repost.
///
/// `Reference` only travels into the store as input to `repost`; the store
/// replaces it with a frozen `Snapshot` of the resolved original.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PostSource {
    Reference(i64),
    Snapshot(Box<PostVariant>),
}

impl PostSource {
    pub(crate) fn source_id(&self) -> i64 {
        match self {
            PostSource::Reference(id) => *id,
            PostSource::Snapshot(variant) => variant.id(),
        }
    }
}

/// Generic storage shape holding the fields of every post variant.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PostRecord {
    pub(crate) id: i64,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) like_count: u64,
    pub(crate) comment_count: u64,
    pub(crate) share_count: u64,
    pub(crate) liked_by_me: bool,
    pub(crate) commented_by_me: bool,
    pub(crate) shared_by_me: bool,
    pub(crate) post_type: PostType,
    pub(crate) source: Option<PostSource>,
    pub(crate) url: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) coordinates: Option<Coordinates>,
}

impl PostRecord {
    pub(crate) fn new(
        author: impl Into<String>,
        content: impl Into<String>,
        post_type: PostType,
    ) -> Self {
        Self {
            id: UNASSIGNED_POST_ID,
            author: author.into(),
            content: content.into(),
            created: Utc::now(),
            like_count: 0,
            comment_count: 0,
            share_count: 0,
            liked_by_me: false,
            commented_by_me: false,
            shared_by_me: false,
            post_type,
            source: None,
            url: None,
            address: None,
            coordinates: None,
        }
    }

    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub(crate) fn with_counters(mut self, likes: u64, comments: u64, shares: u64) -> Self {
        self.like_count = likes;
        self.comment_count = comments;
        self.share_count = shares;
        self
    }

    pub(crate) fn with_flags(mut self, liked: bool, commented: bool, shared: bool) -> Self {
        self.liked_by_me = liked;
        self.commented_by_me = commented;
        self.shared_by_me = shared;
        self
    }

    pub(crate) fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub(crate) fn with_location(
        mut self,
        address: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        self.address = Some(address.into());
        self.coordinates = Some(coordinates);
        self
    }

    pub(crate) fn with_source(mut self, source: PostSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Applies an author edit. Identity, discriminant, counters and flags are
    /// left untouched.
    pub(crate) fn apply_patch(mut self, patch: UpdatePostRequest) -> Self {
        self.content = patch.content;
        if patch.url.is_some() {
            self.url = patch.url;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.coordinates.is_some() {
            self.coordinates = patch.coordinates;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) content: String,
    pub(crate) post_type: PostType,
    pub(crate) url: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) coordinates: Option<Coordinates>,
    /// Only read for reposts.
    pub(crate) source_id: Option<i64>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.post_type == PostType::Unknown {
            return Err(DomainError::InvalidArgument(
                "unsupported post type".to_string(),
            ));
        }
        Ok(Self {
            content: normalize_content(&self.content)?,
            post_type: self.post_type,
            url: normalize_optional("url", self.url)?,
            address: normalize_optional("address", self.address)?,
            coordinates: self.coordinates.map(validate_coordinates).transpose()?,
            source_id: self.source_id,
        })
    }

    pub(crate) fn into_record(self, author: &str) -> PostRecord {
        let source = match self.post_type {
            PostType::Repost => self.source_id.map(PostSource::Reference),
            _ => None,
        };
        PostRecord {
            source,
            url: self.url,
            address: self.address,
            coordinates: self.coordinates,
            ..PostRecord::new(author, self.content, self.post_type)
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdatePostRequest {
    pub(crate) content: String,
    pub(crate) url: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) coordinates: Option<Coordinates>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
            url: normalize_optional("url", self.url)?,
            address: normalize_optional("address", self.address)?,
            coordinates: self.coordinates.map(validate_coordinates).transpose()?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RepostRequest {
    pub(crate) content: String,
    pub(crate) source_id: Option<i64>,
}

impl RepostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
            source_id: self.source_id,
        })
    }

    pub(crate) fn into_record(self, author: &str) -> PostRecord {
        PostRecord {
            source: self.source_id.map(PostSource::Reference),
            ..PostRecord::new(author, self.content, PostType::Repost)
        }
    }
}

fn validate_coordinates(coordinates: Coordinates) -> Result<Coordinates, DomainError> {
    Coordinates::new(coordinates.latitude, coordinates.longitude)
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_optional(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, DomainError> {
    match value {
        None => Ok(None),
        Some(value) => {
            let value = value.trim();
            if value.is_empty() {
                return Err(DomainError::Validation {
                    field,
                    message: "must not be blank when present",
                });
            }
            Ok(Some(value.to_string()))
        }
    }
}
