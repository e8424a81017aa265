//! File-based configuration loading
//!
//! Loads server and upstream API configuration from a JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable that points at an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "POSTPROXY_CONFIG";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host (default: "127.0.0.1" - localhost only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration loaded from JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (optional, defaults to localhost:8080)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream API configuration
    pub api: ApiConfig,
}

/// Upstream API location
///
/// Immutable once loaded; handed to the upstream client at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL, e.g. `https://jsonplaceholder.typicode.com`
    pub base_url: String,
    /// Posts resource
    pub posts: ResourcePath,
    /// Comments resource
    pub comments: ResourcePath,
}

/// Path of a single upstream resource relative to the base URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePath {
    pub path: String,
}

impl ApiConfig {
    /// Create a configuration from its parts
    pub fn new(
        base_url: impl Into<String>,
        posts_path: impl Into<String>,
        comments_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            posts: ResourcePath {
                path: posts_path.into(),
            },
            comments: ResourcePath {
                path: comments_path.into(),
            },
        }
    }

    /// URL of the posts collection
    pub fn posts_url(&self) -> String {
        join_url(&self.base_url, &self.posts.path)
    }

    /// URL of a single post
    pub fn post_url(&self, post_id: i64) -> String {
        format!("{}/{}", self.posts_url(), post_id)
    }

    /// URL of the comments sub-resource of a post
    pub fn post_comments_url(&self, post_id: i64) -> String {
        format!("{}/comments", self.post_url(post_id))
    }

    /// URL of the comments collection
    pub fn comments_url(&self) -> String {
        join_url(&self.base_url, &self.comments.path)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("Base URL api.baseUrl is required");
        }

        if !self.base_url.starts_with("http") {
            anyhow::bail!("Invalid base URL format, should start with 'http': {}", self.base_url);
        }

        if self.posts.path.trim().is_empty() {
            anyhow::bail!("Posts path api.posts.path is required");
        }

        if self.comments.path.trim().is_empty() {
            anyhow::bail!("Comments path api.comments.path is required");
        }

        Ok(())
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim();
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse config JSON")?;

        config.validate()?;

        debug!("Upstream API: {}", config.api.base_url);
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. $POSTPROXY_CONFIG
    /// 2. ~/.config/postproxy/postproxy.json
    /// 3. ./postproxy.json
    ///
    /// Returns error if no configuration file is found.
    pub fn load_default() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&explicit));
        }

        for candidate in default_locations() {
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }

        anyhow::bail!(
            "Configuration file not found. Please create one at:\n\
             - ~/.config/postproxy/postproxy.json (recommended)\n\
             - ./postproxy.json (current directory)\n\
             or point {} at it.\n\
             \n\
             See postproxy.example.json for reference.",
            CONFIG_PATH_ENV
        )
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        self.api.validate()
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".config").join("postproxy").join("postproxy.json"));
    }
    locations.push(PathBuf::from("postproxy.json"));
    locations
}
