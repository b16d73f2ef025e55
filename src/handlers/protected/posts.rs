use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::{NewPost, Post, PostWithUser};
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub description: Option<String>,
}

/// POST /post - create a post owned by the caller
///
/// A body over the size limit is a 413. A body that is not JSON, or has no
/// non-empty string `description`, is a 400.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let body = match payload {
        Ok(Json(body)) => Some(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::payload_too_large("Request body too large"));
        }
        Err(_) => None,
    };

    let description = body
        .and_then(|body| body.description)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::bad_request("Description is required"))?;

    let post = state
        .store
        .create(NewPost {
            description,
            owner_id: user.user_id,
        })
        .await?;

    tracing::info!("User {} created post {}", user.user_id, post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /post/:id - delete a post the caller owns
///
/// Missing posts and posts owned by someone else get the same 401.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Invalid post id")?;

    let owned = state
        .store
        .find_by_id(id)
        .await?
        .is_some_and(|found| found.post.user_id == user.user_id);

    if !owned {
        tracing::warn!("User {} refused delete of post {}", user.user_id, id);
        return Err(ApiError::not_found_or_unauthorized());
    }

    state.store.delete(id).await?;

    tracing::info!("User {} deleted post {}", user.user_id, id);
    Ok(Json(json!({ "message": "Post deleted" })))
}

/// GET /posts/user/:userid - posts owned by any given user
pub async fn list_user_posts(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PostWithUser>>, ApiError> {
    let user_id = parse_id(&user_id, "User ID is required")?;
    let posts = state.store.find_by_user_id(user_id).await?;
    Ok(Json(posts))
}
