//! Concrete post shapes and the resolver that produces them from stored
//! records.

use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::post::{Coordinates, PostRecord, PostSource, PostType};

/// Fields shared by every variant that carries engagement counters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PostCommon {
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
}

/// Sponsored post. Counters and viewer flags are not meaningful for ads.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdPost {
    pub(crate) id: i64,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PostVariant {
    Post(PostCommon),
    Event {
        common: PostCommon,
        address: Option<String>,
        coordinates: Coordinates,
    },
    Video {
        common: PostCommon,
        url: Option<String>,
    },
    Ad(AdPost),
    Repost {
        common: PostCommon,
        source: Box<PostVariant>,
    },
}

impl PostVariant {
    pub(crate) fn id(&self) -> i64 {
        match self {
            PostVariant::Ad(ad) => ad.id,
            PostVariant::Post(common)
            | PostVariant::Event { common, .. }
            | PostVariant::Video { common, .. }
            | PostVariant::Repost { common, .. } => common.id,
        }
    }

    pub(crate) fn author(&self) -> &str {
        match self {
            PostVariant::Ad(ad) => &ad.author,
            PostVariant::Post(common)
            | PostVariant::Event { common, .. }
            | PostVariant::Video { common, .. }
            | PostVariant::Repost { common, .. } => &common.author,
        }
    }

    pub(crate) fn post_type(&self) -> PostType {
        match self {
            PostVariant::Post(_) => PostType::Post,
            PostVariant::Event { .. } => PostType::Event,
            PostVariant::Video { .. } => PostType::Video,
            PostVariant::Ad(_) => PostType::Ad,
            PostVariant::Repost { .. } => PostType::Repost,
        }
    }

    /// Engagement fields, absent for ads.
    pub(crate) fn common(&self) -> Option<&PostCommon> {
        match self {
            PostVariant::Ad(_) => None,
            PostVariant::Post(common)
            | PostVariant::Event { common, .. }
            | PostVariant::Video { common, .. }
            | PostVariant::Repost { common, .. } => Some(common),
        }
    }
}

/// Converts a stored record into the variant selected by its discriminant.
pub(crate) fn resolve(record: &PostRecord) -> Result<PostVariant, DomainError> {
    let variant = match record.post_type {
        PostType::Post => PostVariant::Post(common_fields(record)),
        PostType::Event => PostVariant::Event {
            common: common_fields(record),
            address: record.address.clone(),
            coordinates: record.coordinates.unwrap_or_default(),
        },
        PostType::Video => PostVariant::Video {
            common: common_fields(record),
            url: record.url.clone(),
        },
        PostType::Ad => PostVariant::Ad(AdPost {
            id: record.id,
            author: record.author.clone(),
            content: record.content.clone(),
            created: record.created,
            url: record.url.clone(),
        }),
        PostType::Repost => {
            let source = match &record.source {
                Some(PostSource::Snapshot(snapshot)) => snapshot.clone(),
                Some(PostSource::Reference(id)) => {
                    return Err(DomainError::InvalidArgument(format!(
                        "repost {} points at unresolved source {id}",
                        record.id
                    )));
                }
                None => {
                    return Err(DomainError::InvalidArgument(format!(
                        "repost {} has no source",
                        record.id
                    )));
                }
            };
            PostVariant::Repost {
                common: common_fields(record),
                source,
            }
        }
        PostType::Unknown => {
            return Err(DomainError::InvalidArgument(format!(
                "post {} has an unknown post type",
                record.id
            )));
        }
    };
    Ok(variant)
}

fn common_fields(record: &PostRecord) -> PostCommon {
    PostCommon {
        id: record.id,
        author: record.author.clone(),
        content: record.content.clone(),
        created: record.created,
        like_count: record.like_count,
        comment_count: record.comment_count,
        share_count: record.share_count,
        liked_by_me: record.liked_by_me,
        commented_by_me: record.commented_by_me,
        shared_by_me: record.shared_by_me,
    }
}

#[cfg(test)]
mod tests {
    use super::{PostVariant, resolve};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Coordinates, PostRecord, PostSource, PostType};

    fn base(post_type: PostType) -> PostRecord {
        PostRecord::new("CATS", "All your base", post_type)
            .with_id(10)
            .with_counters(25, 8, 12)
            .with_flags(true, true, false)
    }

    #[test]
    fn resolves_plain_post_with_common_fields() {
        let variant = resolve(&base(PostType::Post)).expect("must resolve");

        let PostVariant::Post(common) = variant else {
            panic!("expected plain post");
        };
        assert_eq!(common.id, 10);
        assert_eq!(common.like_count, 25);
        assert_eq!(common.comment_count, 8);
        assert_eq!(common.share_count, 12);
        assert!(common.liked_by_me);
        assert!(!common.shared_by_me);
    }

    #[test]
    fn resolves_event_with_location() {
        let coordinates = Coordinates::new(35.7135292, 139.6134291).expect("valid coordinates");
        let record = base(PostType::Event).with_location("Suginami, Tokyo", coordinates);

        let variant = resolve(&record).expect("must resolve");
        let PostVariant::Event {
            common,
            address,
            coordinates: resolved,
        } = variant
        else {
            panic!("expected event");
        };
        assert_eq!(common.id, 10);
        assert_eq!(address.as_deref(), Some("Suginami, Tokyo"));
        assert_eq!(resolved, coordinates);
    }

    #[test]
    fn event_without_coordinates_defaults_to_origin() {
        let variant = resolve(&base(PostType::Event)).expect("must resolve");

        let PostVariant::Event { coordinates, .. } = variant else {
            panic!("expected event");
        };
        assert_eq!(coordinates, Coordinates::default());
        assert_eq!(coordinates.latitude, 0.0);
        assert_eq!(coordinates.longitude, 0.0);
    }

    #[test]
    fn resolves_video_with_url() {
        let record = base(PostType::Video).with_url("https://www.youtube.com/watch?v=jQE66WA2s-A");

        let variant = resolve(&record).expect("must resolve");
        let PostVariant::Video { common, url } = variant else {
            panic!("expected video");
        };
        assert_eq!(common.like_count, 25);
        assert_eq!(
            url.as_deref(),
            Some("https://www.youtube.com/watch?v=jQE66WA2s-A")
        );
    }

    #[test]
    fn resolves_ad_without_engagement() {
        let record = base(PostType::Ad).with_url("https://duckduckgo.com");

        let variant = resolve(&record).expect("must resolve");
        assert!(variant.common().is_none());
        let PostVariant::Ad(ad) = variant else {
            panic!("expected ad");
        };
        assert_eq!(ad.id, 10);
        assert_eq!(ad.author, "CATS");
        assert_eq!(ad.url.as_deref(), Some("https://duckduckgo.com"));
    }

    #[test]
    fn resolves_repost_with_embedded_source() {
        let source = resolve(&base(PostType::Video).with_id(33344).with_url("https://v"))
            .expect("source must resolve");
        let record = base(PostType::Repost)
            .with_source(PostSource::Snapshot(Box::new(source.clone())));

        let variant = resolve(&record).expect("must resolve");
        let PostVariant::Repost {
            common,
            source: embedded,
        } = variant
        else {
            panic!("expected repost");
        };
        assert_eq!(common.id, 10);
        assert_eq!(*embedded, source);
        assert_eq!(embedded.post_type(), PostType::Video);
    }

    #[test]
    fn repost_with_unresolved_reference_is_rejected() {
        let record = base(PostType::Repost).with_source(PostSource::Reference(1));

        let err = resolve(&record).expect_err("reference must not resolve");
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn repost_without_source_is_rejected() {
        let err = resolve(&base(PostType::Repost)).expect_err("source is required");
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let err = resolve(&base(PostType::Unknown)).expect_err("unknown type must fail");
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn variant_reports_its_discriminant() {
        for post_type in [
            PostType::Post,
            PostType::Event,
            PostType::Video,
            PostType::Ad,
        ] {
            let variant = resolve(&base(post_type)).expect("must resolve");
            assert_eq!(variant.post_type(), post_type);
            assert_eq!(variant.id(), 10);
            assert_eq!(variant.author(), "CATS");
        }
    }
}
