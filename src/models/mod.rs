//! Data models module
//!
//! Defines the post and comment structures exchanged with the upstream API and API consumers

pub mod comment;
pub mod post;

pub use comment::Comment;
pub use post::Post;

use serde::{Deserialize, Deserializer};

/// Deserialize a field, treating an explicit `null` like a missing value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
