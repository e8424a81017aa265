//! Post handlers
//!
//! `GET /posts`, `GET /posts/{postId}` and `GET /posts/{postId}/comments`

use super::params::{PostIdParam, PostsQuery};
use crate::handlers::AppState;
use crate::models::Post;
use crate::utils::error::{helpers, AppResult};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// Detail returned when `filter` is supplied but blank
pub const BLANK_FILTER_DETAIL: &str = "Filter must not be blank when provided.";

/// List posts
///
/// GET /posts?filter=&page=1&size=10
///
/// A supplied filter must not be blank; without one the posts are only paginated.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    query: PostsQuery,
) -> AppResult<Json<Vec<Post>>> {
    debug!(
        "Listing posts: filter={:?} page={} size={}",
        query.filter, query.page, query.size
    );

    let posts = match query.filter.as_deref() {
        Some(filter) if filter.trim().is_empty() => {
            return Err(helpers::bad_request(BLANK_FILTER_DETAIL));
        }
        Some(filter) => {
            state
                .posts
                .get_posts_with_filter(Some(filter), query.page, query.size)
                .await?
        }
        None => state.posts.get_posts_page(query.page, query.size).await?,
    };

    Ok(Json(posts))
}

/// Get a post
///
/// GET /posts/{postId}
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    PostIdParam(post_id): PostIdParam,
) -> AppResult<Json<Post>> {
    debug!("Fetching post {}", post_id);

    let post = state.posts.get_post_by_id(post_id).await?;
    Ok(Json(post))
}

/// Get a post together with its comments
///
/// GET /posts/{postId}/comments
pub async fn get_post_with_comments(
    State(state): State<Arc<AppState>>,
    PostIdParam(post_id): PostIdParam,
) -> AppResult<Json<Post>> {
    debug!("Fetching post {} with comments", post_id);

    let post = state.posts.get_post_with_comments(post_id).await?;
    Ok(Json(post))
}
