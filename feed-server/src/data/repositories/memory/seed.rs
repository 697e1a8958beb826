use chrono::{DateTime, TimeZone, Utc};

use crate::domain::post::{Coordinates, PostRecord, PostSource, PostType};
use crate::domain::variant::{PostCommon, PostVariant};

const AUTHOR: &str = "CATS";
const TEXT: &str = "All your base are belong to us";
const EVENT_ADDRESS: &str = "Shimizu, Suginami City, Tokyo, Japan";
const VIDEO_URL: &str = "https://www.youtube.com/watch?v=jQE66WA2s-A";
const AD_URL: &str = "https://duckduckgo.com/?q=herbalife&atb=v127-3bd&ia=web";

/// Deterministic fixture the post store starts with: 26 records, ids 1..=26.
pub(super) fn seed_posts() -> Vec<PostRecord> {
    let now = Utc::now();
    vec![
        plain(1, true),
        event(2),
        repost_of(3, "Repost 1", source_post(234)),
        repost_of(4, "Repost 2", source_event(523)),
        plain(5, true),
        event(6),
        repost_of(7, "Repost 1", source_post(1234)),
        ad(8),
        repost_of(9, "Repost 2", source_event(1323)),
        video(10),
        event(11),
        repost_of(12, "Repost Video", source_video(33344)),
        repost_of(13, "Repost 1", source_post(21034)),
        plain(14, true),
        repost_of(15, "Repost 2", source_event(32312)),
        plain(16, true),
        event(17),
        repost_of(18, "Repost 1", source_post(14234)),
        plain(19, true),
        repost_of(20, "Repost 2", source_event(33823)),
        plain(21, true),
        event(22),
        repost_of(23, "Repost 1", source_post(19234)),
        plain(24, true),
        repost_of(25, "Repost 2", source_event(29323)),
        plain(26, false),
    ]
    .into_iter()
    .map(|record| record.with_created(now))
    .collect()
}

fn office_location() -> Coordinates {
    Coordinates {
        latitude: 35.7135292,
        longitude: 139.6134291,
    }
}

fn plain(id: i64, commented: bool) -> PostRecord {
    PostRecord::new(AUTHOR, TEXT, PostType::Post)
        .with_id(id)
        .with_counters(3, 1, 0)
        .with_flags(true, commented, false)
}

fn event(id: i64) -> PostRecord {
    PostRecord::new(AUTHOR, format!("Event: {TEXT}"), PostType::Event)
        .with_id(id)
        .with_counters(3, 31, 0)
        .with_flags(true, false, false)
        .with_location(EVENT_ADDRESS, office_location())
}

fn video(id: i64) -> PostRecord {
    PostRecord::new(AUTHOR, TEXT, PostType::Video)
        .with_id(id)
        .with_counters(25, 8, 12)
        .with_flags(true, true, false)
        .with_url(VIDEO_URL)
}

fn ad(id: i64) -> PostRecord {
    PostRecord::new(AUTHOR, format!("Ad: {TEXT}"), PostType::Ad)
        .with_id(id)
        .with_url(AD_URL)
}

fn repost_of(id: i64, label: &str, source: PostVariant) -> PostRecord {
    PostRecord::new(AUTHOR, format!("{label} {TEXT}"), PostType::Repost)
        .with_id(id)
        .with_counters(3, 1, 0)
        .with_flags(true, false, false)
        .with_source(PostSource::Snapshot(Box::new(source)))
}

fn archived() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1992, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn archived_common(id: i64, content: String, likes: u64, comments: u64, shares: u64) -> PostCommon {
    PostCommon {
        id,
        author: AUTHOR.to_string(),
        content,
        created: archived(),
        like_count: likes,
        comment_count: comments,
        share_count: shares,
        liked_by_me: true,
        commented_by_me: false,
        shared_by_me: false,
    }
}

fn source_post(id: i64) -> PostVariant {
    PostVariant::Post(archived_common(
        id,
        format!("Source post for repost. {TEXT}"),
        3,
        1,
        0,
    ))
}

fn source_event(id: i64) -> PostVariant {
    PostVariant::Event {
        common: archived_common(
            id,
            format!("Source event post for repost. Event: {TEXT}"),
            3,
            31,
            0,
        ),
        address: Some(EVENT_ADDRESS.to_string()),
        coordinates: office_location(),
    }
}

fn source_video(id: i64) -> PostVariant {
    let mut common = archived_common(id, TEXT.to_string(), 25, 8, 12);
    common.commented_by_me = true;
    PostVariant::Video {
        common,
        url: Some(VIDEO_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::seed_posts;
    use crate::domain::post::PostType;
    use crate::domain::variant::resolve;

    #[test]
    fn fixture_has_stable_ids_and_authors() {
        let posts = seed_posts();
        let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();

        assert_eq!(ids, (1..=26).collect::<Vec<_>>());
        assert!(posts.iter().all(|post| post.author == "CATS"));
    }

    #[test]
    fn fixture_covers_every_variant_and_resolves() {
        let posts = seed_posts();
        let kinds: HashSet<_> = posts
            .iter()
            .map(|post| resolve(post).expect("seed must resolve").post_type())
            .collect();

        for kind in [
            PostType::Post,
            PostType::Event,
            PostType::Video,
            PostType::Ad,
            PostType::Repost,
        ] {
            assert!(kinds.contains(&kind), "missing {kind:?}");
        }
    }
}
