mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./showreel.toml",
        "~/.config/showreel/config.toml",
        "/etc/showreel/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if !config.media.root.exists() {
        tracing::warn!("Media root does not exist: {:?}", config.media.root);
    }

    if config.media.extensions.is_empty() {
        anyhow::bail!("Media extension list cannot be empty");
    }

    // Featured entries are bare filenames matched against directory entries
    for name in &config.media.featured {
        if name.contains('/') || name.contains('\\') {
            anyhow::bail!("Featured entry must be a bare filename: {}", name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_config_parses_media_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[media]
root = "/srv/assets"
catalog_dir = "portfolio"
featured = ["a.mp4", "b.jpg"]
cache = "bypass"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.media.catalog_dir, "portfolio");
        assert_eq!(config.media.featured, vec!["a.mp4", "b.jpg"]);
        assert_eq!(config.media.cache, CachePolicy::Bypass);
    }

    #[test]
    fn validate_rejects_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_rejects_featured_with_path_separator() {
        let mut config = Config::default();
        config.media.featured = vec!["sub/dir.mp4".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn default_extensions_cover_supported_media() {
        let config = Config::default();
        for ext in ["jpg", "jpeg", "png", "mp4"] {
            assert!(config.media.extensions.iter().any(|e| e == ext));
        }
    }
}
