use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostWithUser};
use super::store::PostStore;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i32, Value>,
    posts: BTreeMap<i32, Post>,
    next_id: i32,
}

/// In-process post store. Users are seeded up front; posts for unknown users
/// are refused the way a foreign key would refuse them.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    tables: RwLock<Tables>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row. `id` is written into the row if absent.
    pub async fn insert_user(&self, id: i32, mut row: Value) {
        if let Value::Object(map) = &mut row {
            map.entry("id").or_insert(Value::from(id));
        }
        self.tables.write().await.users.insert(id, row);
    }

    fn join(tables: &Tables, post: &Post) -> Result<PostWithUser, DatabaseError> {
        let user = tables.users.get(&post.user_id).cloned().ok_or_else(|| {
            DatabaseError::QueryError(format!(
                "post {} references missing user {}",
                post.id, post.user_id
            ))
        })?;
        Ok(PostWithUser {
            post: post.clone(),
            user,
        })
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.owner_id) {
            return Err(DatabaseError::QueryError(format!(
                "insert on \"posts\" violates foreign key: user {} does not exist",
                post.owner_id
            )));
        }

        tables.next_id += 1;
        let created = Post {
            id: tables.next_id,
            description: post.description,
            user_id: post.owner_id,
        };
        tables.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<PostWithUser>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.posts.values().map(|p| Self::join(&tables, p)).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithUser>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.posts.get(&id).map(|p| Self::join(&tables, p)).transpose()
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<PostWithUser>, DatabaseError> {
        let tables = self.tables.read().await;
        tables
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .map(|p| Self::join(&tables, p))
            .collect()
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        self.tables
            .write()
            .await
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::QueryError(format!("post {} vanished before delete", id)))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
