//! Post model

use super::{null_as_default, Comment};
use serde::{Deserialize, Serialize};

/// A blog post as served by the upstream API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    /// Post identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Identifier of the owning user
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: i64,
    /// Post title
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Post body
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Comments, only present when explicitly requested
    #[serde(skip_serializing_if = "is_none_or_empty")]
    pub comments: Option<Vec<Comment>>,
}

impl Post {
    /// Attach the given comments, replacing any already present
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Whether the title or body contains `needle`
    ///
    /// `needle` must already be lowercased; matching ignores case on the post side.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }
}

fn is_none_or_empty(comments: &Option<Vec<Comment>>) -> bool {
    comments.as_ref().map_or(true, Vec::is_empty)
}
