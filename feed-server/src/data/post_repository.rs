use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::PostRecord;

/// Canonical post collection.
///
/// Implementations own their records: every method returns copies, never
/// handles into the stored collection. A failed call leaves the collection
/// unchanged.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// All records in insertion order.
    async fn get_all(&self) -> Result<Vec<PostRecord>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<PostRecord, DomainError>;
    /// Stores `record` under a freshly assigned id; the caller's id is ignored.
    async fn create(&self, record: PostRecord) -> Result<PostRecord, DomainError>;
    /// Replaces the editable fields of the record stored under `id`. The id,
    /// discriminant, creation time, counters, viewer flags and repost source of
    /// the stored record are kept.
    async fn update(&self, id: i64, record: PostRecord) -> Result<PostRecord, DomainError>;
    async fn remove_by_id(&self, id: i64) -> Result<bool, DomainError>;
    async fn like_by_id(&self, id: i64) -> Result<PostRecord, DomainError>;
    async fn dislike_by_id(&self, id: i64) -> Result<PostRecord, DomainError>;
    async fn share_by_id(&self, id: i64) -> Result<PostRecord, DomainError>;
    /// Creates a repost of the post referenced by `record.source`, embedding a
    /// frozen snapshot of its resolved variant.
    async fn repost(&self, record: PostRecord) -> Result<PostRecord, DomainError>;
}

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn get_all(&self) -> Result<Vec<PostRecord>, DomainError> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
        (**self).create(record).await
    }

    async fn update(&self, id: i64, record: PostRecord) -> Result<PostRecord, DomainError> {
        (**self).update(id, record).await
    }

    async fn remove_by_id(&self, id: i64) -> Result<bool, DomainError> {
        (**self).remove_by_id(id).await
    }

    async fn like_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        (**self).like_by_id(id).await
    }

    async fn dislike_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        (**self).dislike_by_id(id).await
    }

    async fn share_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        (**self).share_by_id(id).await
    }

    async fn repost(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
        (**self).repost(record).await
    }
}
