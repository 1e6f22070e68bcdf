//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default path prefix under which published articles are served.
pub const DEFAULT_BLOG_PATH: &str = "/blog";

/// Paths to all Linkweave data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// SQLite database directory (`data/db/`).
    pub db: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            root,
        };
        std::fs::create_dir_all(&paths.db)?;
        Ok(paths)
    }
}

/// Top-level Linkweave configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkweaveConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Canonical blog path prefix used when building link hrefs (no trailing slash).
    pub blog_path: String,
    /// Per-request timeout applied by the HTTP layer.
    pub request_timeout_secs: u64,
}

impl LinkweaveConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3010);

        let blog_path = std::env::var("LINKWEAVE_BLOG_PATH")
            .map(|p| normalize_blog_path(&p))
            .unwrap_or_else(|_| DEFAULT_BLOG_PATH.to_string());

        let request_timeout_secs = std::env::var("LINKWEAVE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            blog_path,
            request_timeout_secs,
        })
    }
}

/// Force a leading slash and drop trailing ones. An empty value means site root.
pub fn normalize_blog_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
