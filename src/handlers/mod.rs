//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod comments;
pub mod health;
pub mod params;
pub mod posts;

use crate::config::{ApiConfig, AppConfig, Settings};
use crate::middleware::{request_logging_middleware, trace_headers_middleware};
use crate::services::{PostService, PostSource, UpstreamClient};
use crate::utils::error::AppError;
use anyhow::Result;
use axum::{
    http::{HeaderValue, Method, Uri},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
///
/// Read-only after startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiConfig,
    pub posts: PostService,
}

/// Create application router
pub async fn create_router(settings: Settings, app_config: AppConfig) -> Result<Router> {
    let client = UpstreamClient::new(app_config.api.clone())?;
    Ok(create_router_with_source(settings, app_config.api, Arc::new(client)))
}

/// Create application router over an arbitrary post source
pub fn create_router_with_source(
    settings: Settings,
    api: ApiConfig,
    source: Arc<dyn PostSource>,
) -> Router {
    health::mark_started();

    let app_state = Arc::new(AppState {
        api,
        posts: PostService::new(source),
    });

    let router = Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/comments", get(posts::get_post_with_comments))
        .route("/comments", get(comments::list_comments))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(app_state);

    // Inside the trace stack: preflight answers carry trace headers too
    let router = if settings.security.cors_enabled {
        router.layer(cors_layer(&settings))
    } else {
        router
    };

    // Outermost first: trace ids must be in scope before requests are logged
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_headers_middleware))
        .layer(middleware::from_fn(request_logging_middleware));

    router.layer(middleware_stack)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if settings.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .security
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::Domain {
        detail: format!("Request method '{}' is not supported for {}.", method, uri.path()),
        title: Some("Method Not Allowed".to_string()),
        status: 405,
    }
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::Domain {
        detail: format!("No endpoint {} {}.", method, uri.path()),
        title: Some("Not Found".to_string()),
        status: 404,
    }
}
