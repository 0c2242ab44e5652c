//! Driven port for persisting posts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by post persistence.
    pub enum PostRepositoryError {
        /// Could not reach the record store.
        Connection { message: String } =>
            "post repository unavailable: {message}",
        /// The record store rejected or failed the operation.
        Query { message: String } =>
            "post repository error: {message}",
    }
}

/// Port for the `posts` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a draft; the record store assigns the id and creation time.
    async fn create(&self, draft: &PostDraft) -> Result<Post, PostRepositoryError>;

    /// Persist the mutable fields of an existing post.
    async fn update(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Best-effort status write used when inference fails after the raw
    /// upload succeeded. The row is kept for manual cleanup.
    async fn mark_failed(&self, post_id: Uuid) -> Result<(), PostRepositoryError>;

    /// Load one post.
    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostRepositoryError>;

    /// Completed posts for one technician, newest first.
    async fn list_completed_for_technician(
        &self,
        technician_id: &UserId,
    ) -> Result<Vec<Post>, PostRepositoryError>;
}
