use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Root directory all streamed assets live under. Requests never resolve
    /// outside this directory.
    #[serde(default = "default_media_root")]
    pub root: PathBuf,

    /// Catalog directory, relative to the media root.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,

    /// Extensions admitted into the catalog (case-insensitive).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Filenames pinned to the front of the catalog, in editorial order.
    #[serde(default)]
    pub featured: Vec<String>,

    #[serde(default)]
    pub cache: CachePolicy,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_catalog_dir() -> String {
    "portfolio".to_string()
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "mp4"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            catalog_dir: default_catalog_dir(),
            extensions: default_extensions(),
            featured: Vec::new(),
            cache: CachePolicy::default(),
        }
    }
}

/// Caching stance for media responses.
///
/// A deployment concern, not per-request logic: assets are normally immutable
/// and intermediary-cached for a year, but during active content editing the
/// whole chain (browser and CDN) can be told to revalidate every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    #[default]
    Immutable,
    Bypass,
}

impl CachePolicy {
    pub fn cache_control(&self) -> &'static str {
        match self {
            CachePolicy::Immutable => "public, max-age=31536000, immutable",
            CachePolicy::Bypass => "no-store, no-cache, must-revalidate",
        }
    }

    /// CDN-specific override emitted alongside `Cache-Control` when caching
    /// is bypassed, so intermediaries that ignore `no-store` still comply.
    pub fn cdn_cache_control(&self) -> Option<&'static str> {
        match self {
            CachePolicy::Immutable => None,
            CachePolicy::Bypass => Some("no-store"),
        }
    }
}
