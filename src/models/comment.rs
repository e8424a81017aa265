//! Comment model

use super::null_as_default;
use serde::{Deserialize, Serialize};

/// A comment left on a post
///
/// Unknown upstream fields are ignored and missing ones fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Comment identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Identifier of the post this comment belongs to
    #[serde(deserialize_with = "null_as_default")]
    pub post_id: i64,
    /// Author name
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Author email
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Comment text
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub body: String,
}
