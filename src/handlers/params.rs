//! Request parameter extraction
//!
//! Parameters are taken as raw strings and converted here so that type mismatches and
//! constraint violations surface as problem-detail errors instead of plain-text rejections.

use crate::utils::error::{helpers, AppError, AppResult};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

/// Default page when `page` is absent
pub const DEFAULT_PAGE: i32 = 1;

/// Default page size when `size` is absent
pub const DEFAULT_SIZE: i32 = 10;

/// Largest accepted page size
pub const MAX_SIZE: i32 = 25;

/// Validated `postId` path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostIdParam(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PostIdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| helpers::bad_request(rejection.body_text()))?;

        parse_post_id(Some(&raw)).map(Self)
    }
}

/// Validated query of `GET /posts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsQuery {
    /// Filter text; `Some` only when the parameter was supplied
    pub filter: Option<String>,
    pub page: i32,
    pub size: i32,
}

#[derive(Debug, Default, Deserialize)]
struct RawPostsQuery {
    filter: Option<String>,
    page: Option<String>,
    size: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for PostsQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPostsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| helpers::bad_request(rejection.body_text()))?;

        let page = parse_int("page", raw.page.as_deref(), DEFAULT_PAGE)?;
        let size = parse_int("size", raw.size.as_deref(), DEFAULT_SIZE)?;
        validate_page_and_size(page, size)?;

        Ok(Self {
            filter: raw.filter,
            page,
            size,
        })
    }
}

/// Validated query of `GET /comments`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentsQuery {
    pub post_id: i64,
}

#[derive(Debug, Default, Deserialize)]
struct RawCommentsQuery {
    #[serde(rename = "postId")]
    post_id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CommentsQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawCommentsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| helpers::bad_request(rejection.body_text()))?;

        let post_id = parse_post_id(raw.post_id.as_deref())?;
        Ok(Self { post_id })
    }
}

/// Parse and validate a post identifier
pub fn parse_post_id(raw: Option<&str>) -> AppResult<i64> {
    let raw = match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw) => raw,
        None => return Err(helpers::validation_error("postId is required")),
    };

    let post_id: i64 = raw
        .parse()
        .map_err(|_| helpers::invalid_parameter("postId", "long", raw))?;

    if post_id <= 0 {
        return Err(helpers::validation_error("postId must be greater than 0"));
    }

    Ok(post_id)
}

/// Parse an optional integer query parameter; blank counts as absent
fn parse_int(name: &str, raw: Option<&str>, default: i32) -> AppResult<i32> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|_| helpers::invalid_parameter(name, "int", value)),
        None => Ok(default),
    }
}

/// Check page and size constraints, reporting every violation at once
pub fn validate_page_and_size(page: i32, size: i32) -> AppResult<()> {
    let mut violations = Vec::new();

    if page <= 0 {
        violations.push("'page' value should be positive integer value(>0)".to_string());
    }
    if size <= 0 {
        violations.push("'size' value should be positive integer value".to_string());
    }
    if size > MAX_SIZE {
        violations.push(format!("'size' value should not exceed {}", MAX_SIZE));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
