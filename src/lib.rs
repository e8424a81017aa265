//! Post Proxy Library
//!
//! HTTP facade over a blog post/comment REST API with pagination, filtering,
//! trace headers and problem-detail errors

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{ApiConfig, AppConfig, Settings};
pub use handlers::{create_router, create_router_with_source, AppState};
pub use models::{Comment, Post};
pub use services::{PostService, PostSource, UpstreamClient};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
