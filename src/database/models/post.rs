use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, Row};

/// A stored post. `user_id` is fixed at creation and decides who may delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub description: String,
    #[serde(rename = "userId")]
    #[sqlx(rename = "userid")]
    pub user_id: i32,
}

/// A post joined with its owning user. The user row is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithUser {
    #[serde(flatten)]
    pub post: Post,
    pub user: Value,
}

impl<'r> FromRow<'r, PgRow> for PostWithUser {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            post: Post::from_row(row)?,
            user: row.try_get("user")?,
        })
    }
}

/// Input for creating a post on behalf of an authenticated owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub description: String,
    pub owner_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_serializes_with_camel_case_owner() {
        let post = Post {
            id: 1,
            description: "hello".into(),
            user_id: 5,
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({ "id": 1, "description": "hello", "userId": 5 })
        );
    }

    #[test]
    fn joined_post_inlines_post_fields() {
        let joined = PostWithUser {
            post: Post {
                id: 2,
                description: "hi".into(),
                user_id: 5,
            },
            user: json!({ "id": 5, "name": "ada" }),
        };
        assert_eq!(
            serde_json::to_value(&joined).unwrap(),
            json!({
                "id": 2,
                "description": "hi",
                "userId": 5,
                "user": { "id": 5, "name": "ada" }
            })
        );
    }
}
