//! Post service
//!
//! Composes upstream calls with pagination and filtering

use super::client::PostSource;
use super::pagination::{filter_and_paginate, paginate};
use crate::models::{Comment, Post};
use crate::utils::error::AppResult;
use std::sync::Arc;
use tracing::debug;

/// Request orchestrator sitting between the HTTP handlers and the post source
#[derive(Clone)]
pub struct PostService {
    source: Arc<dyn PostSource>,
}

impl PostService {
    /// Create a service over the given source
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self { source }
    }

    /// Every post, unpaginated
    pub async fn get_posts(&self) -> AppResult<Vec<Post>> {
        self.source.fetch_all_posts().await
    }

    /// One page of posts
    pub async fn get_posts_page(&self, page: i32, size: i32) -> AppResult<Vec<Post>> {
        let posts = self.get_posts().await?;
        debug!("Paginating {} posts (page {}, size {})", posts.len(), page, size);
        Ok(paginate(posts, page, size))
    }

    /// One page of the posts whose title or body contains `filter`
    pub async fn get_posts_with_filter(
        &self,
        filter: Option<&str>,
        page: i32,
        size: i32,
    ) -> AppResult<Vec<Post>> {
        let posts = self.get_posts().await?;
        debug!("Filtering {} posts with {:?}", posts.len(), filter);
        Ok(filter_and_paginate(posts, filter, page, size))
    }

    /// A single post without comments
    pub async fn get_post_by_id(&self, post_id: i64) -> AppResult<Post> {
        self.source.fetch_post_by_id(post_id).await
    }

    /// A single post with its comments
    pub async fn get_post_with_comments(&self, post_id: i64) -> AppResult<Post> {
        self.source.fetch_post_with_comments(post_id).await
    }

    /// The comments of a post
    pub async fn get_comments_by_post_id(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        self.source.fetch_comments_by_post_id(post_id).await
    }
}
