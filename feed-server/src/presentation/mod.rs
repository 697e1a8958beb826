use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::feed_service::FeedService;
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
use crate::data::repositories::memory::user_repository::InMemoryUserRepository;

pub(crate) mod http;

/// Services shared by every request handler. Built once in `main` and cloned
/// into the router.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub(crate) feed_service: Arc<FeedService<InMemoryPostRepository>>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<InMemoryUserRepository>>,
        feed_service: Arc<FeedService<InMemoryPostRepository>>,
    ) -> Self {
        Self {
            auth_service,
            feed_service,
        }
    }
}
