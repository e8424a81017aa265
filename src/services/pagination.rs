//! Pagination and filtering
//!
//! Pure list shaping applied to the posts fetched from upstream

use crate::models::Post;

/// Slice `items` down to the window of page `page` with `size` entries per page
///
/// Pages start at 1. A non-positive page or size, an empty input, or a page past
/// the end all yield an empty result; the window never goes out of bounds.
pub fn paginate<T>(items: Vec<T>, page: i32, size: i32) -> Vec<T> {
    if items.is_empty() || size <= 0 || page <= 0 {
        return Vec::new();
    }

    let size = size as usize;
    let start = match (page as usize - 1).checked_mul(size) {
        Some(start) if start < items.len() => start,
        // page too far
        _ => return Vec::new(),
    };

    items.into_iter().skip(start).take(size).collect()
}

/// Keep the posts whose title or body contains `filter`, then paginate
///
/// Matching is a case-insensitive substring test. An absent or blank filter keeps every post.
pub fn filter_and_paginate(posts: Vec<Post>, filter: Option<&str>, page: i32, size: i32) -> Vec<Post> {
    match filter.filter(|f| !f.trim().is_empty()) {
        Some(filter) => {
            let needle = filter.to_lowercase();
            let matching = posts.into_iter().filter(|post| post.matches(&needle)).collect();
            paginate(matching, page, size)
        }
        None => paginate(posts, page, size),
    }
}
