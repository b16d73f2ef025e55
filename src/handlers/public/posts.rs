use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::PostWithUser;
use crate::error::ApiError;
use crate::handlers::utils::parse_id;

/// GET /posts - every post with its owner
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithUser>>, ApiError> {
    let posts = state.store.find_all().await?;
    Ok(Json(posts))
}

/// GET /post/:id - a single post with its owner, 404 when absent
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostWithUser>, ApiError> {
    let id = parse_id(&id, "Invalid post id")?;

    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Post not found"))
}
