//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which owns a temporary media tree and a config
//! pointing at it. [`TestHarness::serve`] starts Axum on a random port for
//! HTTP-level testing.

use std::net::SocketAddr;
use std::sync::Arc;

use showreel::config::Config;
use showreel::playback::PlaybackSession;
use showreel::server::{create_router, AppContext};

/// Test harness wrapping a temporary media root and a config pointing at it.
pub struct TestHarness {
    _media_root: tempfile::TempDir,
    pub config: Config,
}

impl TestHarness {
    /// Create a new harness with default configuration over an empty
    /// temporary media root.
    pub fn new() -> Self {
        let media_root = tempfile::tempdir().expect("failed to create temp media root");
        let mut config = Config::default();
        config.media.root = media_root.path().to_path_buf();

        Self {
            _media_root: media_root,
            config,
        }
    }

    /// Write an asset file under the media root, creating parent directories.
    pub fn write_asset(&self, rel: &str, data: &[u8]) {
        let path = self.config.media.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, data).unwrap();
    }

    /// Start an Axum server on a random port with the harness's current
    /// config and return the bound socket address.
    pub async fn serve(&self) -> SocketAddr {
        let ctx = AppContext {
            config: Arc::new(self.config.clone()),
            playback: Arc::new(PlaybackSession::new()),
        };
        let app = create_router(ctx, None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        addr
    }
}
