//! Comment handlers

use super::params::CommentsQuery;
use crate::handlers::AppState;
use crate::models::Comment;
use crate::utils::error::AppResult;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// List the comments of a post
///
/// GET /comments?postId=
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    query: CommentsQuery,
) -> AppResult<Json<Vec<Comment>>> {
    debug!("Fetching comments for post {}", query.post_id);

    let comments = state.posts.get_comments_by_post_id(query.post_id).await?;
    Ok(Json(comments))
}
