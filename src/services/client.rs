//! Upstream HTTP client
//!
//! Encapsulates HTTP communication with the upstream post/comment API

use crate::config::ApiConfig;
use crate::models::{Comment, Post};
use crate::utils::error::{AppError, AppResult, ErrorContext};
use crate::utils::logging::summarize_body;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Source of posts and comments
///
/// Implemented by [`UpstreamClient`] in production; the service layer only depends on this trait.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every post
    async fn fetch_all_posts(&self) -> AppResult<Vec<Post>>;

    /// Fetch a single post
    async fn fetch_post_by_id(&self, post_id: i64) -> AppResult<Post>;

    /// Fetch a single post with its comments attached
    async fn fetch_post_with_comments(&self, post_id: i64) -> AppResult<Post>;

    /// Fetch the comments of a post from the comments collection
    async fn fetch_comments_by_post_id(&self, post_id: i64) -> AppResult<Vec<Comment>>;
}

/// Upstream API client
///
/// One GET per call, no retries and no timeout beyond the transport default.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    api: ApiConfig,
}

impl UpstreamClient {
    /// Create a new client instance
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("postproxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api })
    }

    /// Build a GET request carrying the query parameters
    fn build_get(&self, url: &str, query: &[(&str, String)]) -> AppResult<reqwest::Request> {
        self.client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .build()
            .map_err(AppError::upstream)
    }

    /// Send a GET request and decode the JSON body
    ///
    /// Non-success statuses become [`AppError::Upstream`] carrying the upstream status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let request = self.build_get(url, query)?;
        let url = request.url().to_string();
        info!("[Request] GET {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(AppError::upstream)?;

        let status = response.status();
        let body = response.bytes().await.map_err(AppError::upstream)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                "[Response] GET {} - Status: {} - Body: {}",
                url,
                status,
                summarize_body(&body)
            );
        } else {
            info!("[Response] GET {} - Status: {}", url, status);
        }

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("{}: \"{}\"", status, String::from_utf8_lossy(&body).trim()),
                source: None,
            });
        }

        serde_json::from_slice(&body).internal_context("Failed to decode upstream response")
    }
}

#[async_trait]
impl PostSource for UpstreamClient {
    async fn fetch_all_posts(&self) -> AppResult<Vec<Post>> {
        self.get_json(&self.api.posts_url(), &[]).await
    }

    async fn fetch_post_by_id(&self, post_id: i64) -> AppResult<Post> {
        let detail = format!("Cannot find a Post with id {}", post_id);

        self.get_json(&self.api.post_url(post_id), &[])
            .await
            .map_err(|e| e.into_not_found(&detail))
    }

    async fn fetch_post_with_comments(&self, post_id: i64) -> AppResult<Post> {
        let detail = format!("Cannot find a Post and its comments with id {}", post_id);

        let post: Post = self
            .get_json(&self.api.post_url(post_id), &[])
            .await
            .map_err(|e| e.into_not_found(&detail))?;

        let comments: Vec<Comment> = self
            .get_json(&self.api.post_comments_url(post_id), &[])
            .await
            .map_err(|e| e.into_not_found(&detail))?;

        debug!("Attached {} comments to post {}", comments.len(), post_id);
        Ok(post.with_comments(comments))
    }

    async fn fetch_comments_by_post_id(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        self.get_json(&self.api.comments_url(), &[("postId", post_id.to_string())])
            .await
    }
}
