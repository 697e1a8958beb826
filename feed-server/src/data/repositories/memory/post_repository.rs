use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::seed::seed_posts;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{PostRecord, PostSource, PostType, UNASSIGNED_POST_ID};
use crate::domain::variant::resolve;

/// Post store guarded by a single lock over the whole collection.
///
/// Every operation, `repost` included, runs inside exactly one critical
/// section. The section never awaits anything but the lock itself, and lock
/// waits have no timeout.
#[derive(Debug)]
pub(crate) struct InMemoryPostRepository {
    table: Mutex<PostTable>,
}

impl InMemoryPostRepository {
    /// Store pre-filled with the deterministic fixture.
    pub(crate) fn seeded() -> Self {
        Self::with_records(seed_posts())
    }

    pub(crate) fn with_records(records: Vec<PostRecord>) -> Self {
        Self {
            table: Mutex::new(PostTable::from_records(records)),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

/// Lock-free helpers. Only ever called with the table lock already held.
#[derive(Debug, Default)]
struct PostTable {
    // Ids only grow, so key order is insertion order.
    items: BTreeMap<i64, PostRecord>,
    last_assigned_id: i64,
}

impl PostTable {
    fn from_records(records: Vec<PostRecord>) -> Self {
        let last_assigned_id = records.iter().map(|record| record.id).max().unwrap_or(0);
        let items = records
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        Self {
            items,
            last_assigned_id,
        }
    }

    fn find(&self, id: i64) -> Result<&PostRecord, DomainError> {
        self.items
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut PostRecord, DomainError> {
        self.items
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    fn insert_new(&mut self, mut record: PostRecord) -> Result<PostRecord, DomainError> {
        let id = self
            .last_assigned_id
            .checked_add(1)
            .ok_or_else(|| DomainError::Unexpected("post id space exhausted".to_string()))?;
        self.last_assigned_id = id;
        record.id = id;
        self.items.insert(id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn get_all(&self) -> Result<Vec<PostRecord>, DomainError> {
        let table = self.table.lock().await;
        Ok(table.items.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        let table = self.table.lock().await;
        table.find(id).cloned()
    }

    async fn create(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
        let mut table = self.table.lock().await;
        let created = table.insert_new(record)?;
        info!(post_id = created.id, post_type = ?created.post_type, "post created");
        Ok(created)
    }

    async fn update(&self, id: i64, record: PostRecord) -> Result<PostRecord, DomainError> {
        let mut table = self.table.lock().await;
        let slot = table.find_mut(id)?;
        // Counters, flags and the repost source belong to the store, not the caller.
        let replacement = PostRecord {
            id,
            post_type: slot.post_type,
            created: slot.created,
            like_count: slot.like_count,
            comment_count: slot.comment_count,
            share_count: slot.share_count,
            liked_by_me: slot.liked_by_me,
            commented_by_me: slot.commented_by_me,
            shared_by_me: slot.shared_by_me,
            source: slot.source.clone(),
            ..record
        };
        *slot = replacement.clone();
        info!(post_id = id, "post updated");
        Ok(replacement)
    }

    async fn remove_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let mut table = self.table.lock().await;
        if table.items.remove(&id).is_none() {
            return Err(DomainError::NotFound(format!("post id: {id}")));
        }
        info!(post_id = id, "post removed");
        Ok(true)
    }

    async fn like_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        let mut table = self.table.lock().await;
        let record = table.find_mut(id)?;
        if !record.liked_by_me {
            record.like_count += 1;
            record.liked_by_me = true;
            debug!(post_id = id, likes = record.like_count, "post liked");
        }
        Ok(record.clone())
    }

    async fn dislike_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        let mut table = self.table.lock().await;
        let record = table.find_mut(id)?;
        if record.liked_by_me && record.like_count > 0 {
            record.like_count -= 1;
            record.liked_by_me = false;
            debug!(post_id = id, likes = record.like_count, "post like withdrawn");
        }
        Ok(record.clone())
    }

    async fn share_by_id(&self, id: i64) -> Result<PostRecord, DomainError> {
        let mut table = self.table.lock().await;
        let record = table.find_mut(id)?;
        if !record.shared_by_me {
            record.share_count += 1;
            record.shared_by_me = true;
            debug!(post_id = id, shares = record.share_count, "post shared");
        }
        Ok(record.clone())
    }

    async fn repost(&self, record: PostRecord) -> Result<PostRecord, DomainError> {
        let source_id = record
            .source
            .as_ref()
            .map(PostSource::source_id)
            .ok_or_else(|| DomainError::InvalidArgument("repost source is missing".to_string()))?;

        let mut table = self.table.lock().await;
        let snapshot = resolve(table.find(source_id)?)?;
        let repost = PostRecord {
            id: UNASSIGNED_POST_ID,
            post_type: PostType::Repost,
            source: Some(PostSource::Snapshot(Box::new(snapshot))),
            ..record
        };
        let created = table.insert_new(repost)?;
        info!(post_id = created.id, source_id, "post reposted");
        Ok(created)
    }
}
