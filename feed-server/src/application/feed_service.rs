use tracing::{debug, info};

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{
    CreatePostRequest, PostRecord, PostType, RepostRequest, UpdatePostRequest,
};
use crate::domain::variant::{PostVariant, resolve};

/// Feed operations on behalf of an authenticated user. Every post leaving this
/// service has been passed through the variant resolver.
pub(crate) struct FeedService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> FeedService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<PostVariant>, DomainError> {
        self.repo.get_all().await?.iter().map(resolve).collect()
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<PostVariant, DomainError> {
        resolve(&self.repo.get_by_id(id).await?)
    }

    pub(crate) async fn create_post(
        &self,
        author: &str,
        req: CreatePostRequest,
    ) -> Result<PostVariant, DomainError> {
        let req = req.validate()?;
        let record = req.into_record(author);

        let stored = if record.post_type == PostType::Repost {
            self.repo.repost(record).await?
        } else {
            self.repo.create(record).await?
        };
        let post = resolve(&stored)?;
        info!(
            post_id = post.id(),
            post_type = ?post.post_type(),
            author = post.author(),
            "post published"
        );
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        actor: &str,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<PostVariant, DomainError> {
        let req = req.validate()?;
        let existing = self.owned_post(actor, post_id).await?;

        let updated = self
            .repo
            .update(post_id, existing.apply_patch(req))
            .await?;
        resolve(&updated)
    }

    pub(crate) async fn delete_post(&self, actor: &str, post_id: i64) -> Result<(), DomainError> {
        self.owned_post(actor, post_id).await?;

        let deleted = self.repo.remove_by_id(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn like_post(&self, post_id: i64) -> Result<PostVariant, DomainError> {
        let post = resolve(&self.repo.like_by_id(post_id).await?)?;
        if post.common().is_none() {
            debug!(post_id, "like recorded on a post without visible counters");
        }
        Ok(post)
    }

    pub(crate) async fn dislike_post(&self, post_id: i64) -> Result<PostVariant, DomainError> {
        resolve(&self.repo.dislike_by_id(post_id).await?)
    }

    pub(crate) async fn share_post(&self, post_id: i64) -> Result<PostVariant, DomainError> {
        resolve(&self.repo.share_by_id(post_id).await?)
    }

    pub(crate) async fn repost(
        &self,
        author: &str,
        req: RepostRequest,
    ) -> Result<PostVariant, DomainError> {
        let req = req.validate()?;
        resolve(&self.repo.repost(req.into_record(author)).await?)
    }

    async fn owned_post(&self, actor: &str, post_id: i64) -> Result<PostRecord, DomainError> {
        let post = self.repo.get_by_id(post_id).await?;
        if post.author != actor {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::FeedService;
    use crate::data::post_repository::PostRepository;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::domain::error::DomainError;
    use crate::domain::post::{
        Coordinates, CreatePostRequest, PostRecord, PostType, RepostRequest, UpdatePostRequest,
    };
    use crate::domain::variant::PostVariant;

    /// Lands one like right after the first read, between the service's
    /// ownership check and its write.
    struct LikeAfterRead {
        inner: Arc<InMemoryPostRepository>,
        fired: AtomicBool,
    }

    #[async_trait]
    impl PostRepository for LikeAfterRead {
        async fn get_all(&self) -> Result<Vec<PostRecord>, DomainError> {
            self.inner.get_all().await
        }

        async fn get_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
            let record = self.inner.get_by_id(id).await?;
            if !self.fired.swap(true, Ordering::SeqCst) {
                self.inner.like_by_id(id).await?;
            }
            Ok(record)
        }

        async fn create(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
            self.inner.create(record).await
        }

        async fn update(&self, id: i64, record: PostRecord) -> Result<PostRecord, DomainError> {
            self.inner.update(id, record).await
        }

        async fn remove_by_id(&self, id: i64) -> Result<bool, DomainError> {
            self.inner.remove_by_id(id).await
        }

        async fn like_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
            self.inner.like_by_id(id).await
        }

        async fn dislike_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
            self.inner.dislike_by_id(id).await
        }

        async fn share_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
            self.inner.share_by_id(id).await
        }

        async fn repost(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
            self.inner.repost(record).await
        }
    }

    fn service() -> (FeedService<Arc<InMemoryPostRepository>>, Arc<InMemoryPostRepository>) {
        let repo = Arc::new(InMemoryPostRepository::seeded());
        (FeedService::new(Arc::clone(&repo)), repo)
    }

    fn create_req(content: &str, post_type: PostType) -> CreatePostRequest {
        CreatePostRequest {
            content: content.to_string(),
            post_type,
            url: None,
            address: None,
            coordinates: None,
            source_id: None,
        }
    }

    fn update_req(content: &str) -> UpdatePostRequest {
        UpdatePostRequest {
            content: content.to_string(),
            url: None,
            address: None,
            coordinates: None,
        }
    }

    #[tokio::test]
    async fn list_posts_resolves_whole_fixture() {
        let (service, _) = service();

        let posts = service.list_posts().await.expect("list must succeed");

        assert_eq!(posts.len(), 26);
        assert!(matches!(posts[1], PostVariant::Event { .. }));
        assert!(matches!(posts[7], PostVariant::Ad(_)));
        assert!(matches!(posts[9], PostVariant::Video { .. }));
    }

    #[tokio::test]
    async fn create_post_stamps_author_and_normalizes() {
        let (service, repo) = service();
        let mut req = create_req("  meetup  ", PostType::Event);
        req.address = Some("Tokyo".to_string());
        req.coordinates = Some(Coordinates {
            latitude: 35.0,
            longitude: 139.0,
        });

        let created = service
            .create_post("vasya", req)
            .await
            .expect("create must succeed");

        assert_eq!(created.id(), 27);
        assert_eq!(created.author(), "vasya");
        let PostVariant::Event {
            common, address, ..
        } = created
        else {
            panic!("expected event");
        };
        assert_eq!(common.content, "meetup");
        assert_eq!(address.as_deref(), Some("Tokyo"));
        assert_eq!(repo.get_all().await.expect("get_all").len(), 27);
    }

    #[tokio::test]
    async fn create_post_routes_reposts_through_source_resolution() {
        let (service, _) = service();
        let mut req = create_req("look", PostType::Repost);
        req.source_id = Some(10);

        let created = service
            .create_post("vasya", req)
            .await
            .expect("create must succeed");

        let PostVariant::Repost { source, .. } = created else {
            panic!("expected repost");
        };
        assert_eq!(source.id(), 10);
        assert_eq!(source.post_type(), PostType::Video);
    }

    #[tokio::test]
    async fn create_post_rejects_unknown_type() {
        let (service, repo) = service();

        let err = service
            .create_post("vasya", create_req("content", PostType::Unknown))
            .await
            .expect_err("unknown type must fail");

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(repo.get_all().await.expect("get_all").len(), 26);
    }

    #[tokio::test]
    async fn update_post_by_author_patches_content() {
        let (service, _) = service();

        let updated = service
            .update_post("CATS", 1, update_req("edited"))
            .await
            .expect("update must succeed");

        let common = updated.common().expect("plain post has counters");
        assert_eq!(common.content, "edited");
        assert_eq!(common.like_count, 3);
    }

    #[tokio::test]
    async fn like_landing_during_edit_survives() {
        let inner = Arc::new(InMemoryPostRepository::default());
        let created = inner
            .create(PostRecord::new("vasya", "draft", PostType::Post))
            .await
            .expect("create");
        let service = FeedService::new(LikeAfterRead {
            inner: Arc::clone(&inner),
            fired: AtomicBool::new(false),
        });

        service
            .update_post("vasya", created.id, update_req("final"))
            .await
            .expect("update must succeed");

        let stored = inner.get_by_id(created.id).await.expect("stored");
        assert_eq!(stored.content, "final");
        assert_eq!(stored.like_count, 1);
        assert!(stored.liked_by_me);
    }

    #[tokio::test]
    async fn update_post_by_other_user_is_forbidden() {
        let (service, repo) = service();

        let err = service
            .update_post("vasya", 1, update_req("hijacked"))
            .await
            .expect_err("must be forbidden");

        assert!(matches!(err, DomainError::Forbidden));
        let stored = repo.get_by_id(1).await.expect("post 1");
        assert_eq!(stored.content, "All your base are belong to us");
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let (service, _) = service();

        let err = service
            .update_post("CATS", 404, update_req("edited"))
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_post_checks_author() {
        let (service, repo) = service();

        let err = service
            .delete_post("vasya", 26)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));

        service
            .delete_post("CATS", 26)
            .await
            .expect("author may delete");
        assert!(matches!(
            repo.get_by_id(26).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn like_dislike_and_share_return_resolved_posts() {
        let (service, _) = service();
        let created = service
            .create_post("vasya", create_req("fresh", PostType::Post))
            .await
            .expect("create must succeed");

        let liked = service.like_post(created.id()).await.expect("like");
        assert_eq!(liked.common().map(|c| c.like_count), Some(1));

        let disliked = service.dislike_post(created.id()).await.expect("dislike");
        assert_eq!(disliked.common().map(|c| c.like_count), Some(0));

        let shared = service.share_post(created.id()).await.expect("share");
        assert_eq!(shared.common().map(|c| c.share_count), Some(1));
    }

    #[tokio::test]
    async fn repost_requires_source() {
        let (service, _) = service();

        let err = service
            .repost(
                "vasya",
                RepostRequest {
                    content: "look".to_string(),
                    source_id: None,
                },
            )
            .await
            .expect_err("source is required");
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn repost_of_event_carries_location() {
        let (service, _) = service();

        let repost = service
            .repost(
                "vasya",
                RepostRequest {
                    content: "come along".to_string(),
                    source_id: Some(2),
                },
            )
            .await
            .expect("repost must succeed");

        let PostVariant::Repost { common, source } = repost else {
            panic!("expected repost");
        };
        assert_eq!(common.author, "vasya");
        let PostVariant::Event { address, .. } = *source else {
            panic!("source must be an event");
        };
        assert_eq!(address.as_deref(), Some("Shimizu, Suginami City, Tokyo, Japan"));
    }
}
