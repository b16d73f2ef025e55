use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostWithUser};
use super::store::PostStore;

const SELECT_WITH_USER: &str = r#"
    SELECT p.id, p.description, p.userid, row_to_json(u) AS "user"
    FROM posts p
    JOIN users u ON u.id = p.userid
"#;

/// Postgres-backed post store.
///
/// Expects `posts(id serial primary key, description text not null,
/// userid integer not null references users(id))`. The schema itself is
/// owned by the migration tooling, not by this crate.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let created = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (description, userid) VALUES ($1, $2)
             RETURNING id, description, userid",
        )
        .bind(&post.description)
        .bind(post.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<PostWithUser>, DatabaseError> {
        let sql = format!("{} ORDER BY p.id", SELECT_WITH_USER);
        let posts = sqlx::query_as::<_, PostWithUser>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostWithUser>, DatabaseError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_WITH_USER);
        let post = sqlx::query_as::<_, PostWithUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<PostWithUser>, DatabaseError> {
        let sql = format!("{} WHERE p.userid = $1 ORDER BY p.id", SELECT_WITH_USER);
        let posts = sqlx::query_as::<_, PostWithUser>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::QueryError(format!("post {} vanished before delete", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
