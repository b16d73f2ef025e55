use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostWithUser};

/// Persistence boundary for posts. Each call is a single round trip to the
/// backing store; handlers hold it as `Arc<dyn PostStore>`.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post linked to `owner_id` and return it with its generated id.
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<PostWithUser>, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithUser>, DatabaseError>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<PostWithUser>, DatabaseError>;

    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    /// Cheap connectivity check used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}
