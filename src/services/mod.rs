//! Service layer module
//!
//! Contains the upstream HTTP client, the pagination/filter engine, and the post service

pub mod client;
pub mod pagination;
pub mod posts;

pub use client::{PostSource, UpstreamClient};
pub use pagination::{filter_and_paginate, paginate};
pub use posts::PostService;
