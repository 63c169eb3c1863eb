//! Media streaming module.
//!
//! Serves portfolio assets directly from the media root with HTTP range
//! support, so browsers can seek and preload large videos instead of
//! downloading whole files.
//!
//! # Routes
//!
//! - `GET /media/{path}` - File streaming with range support

mod direct;

pub use direct::serve_media;

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create the media streaming router.
pub fn media_router() -> Router<AppContext> {
    Router::new().route("/*path", get(serve_media))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_router_creation() {
        let _router: Router<AppContext> = media_router();
    }
}
