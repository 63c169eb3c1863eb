//! Direct streaming with HTTP range requests.
//!
//! Serves media files directly with support for HTTP range requests.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::io::SeekFrom;
use std::path::{Component, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::config::CachePolicy;
use crate::error::MediaError;
use crate::server::AppContext;

/// Outcome of parsing a `Range` header against a file of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOutcome {
    /// No usable range; serve the full file. Malformed headers land here on
    /// purpose: clients recover better from a 200 than from a hard failure.
    Full,
    /// Inclusive byte span, already clamped to the file size.
    Partial(u64, u64),
    /// Syntactically valid but impossible to satisfy; must become a 416,
    /// never a short or negative-length 206.
    Unsatisfiable,
}

/// Serve a media file with range request support.
pub async fn serve_media(
    State(ctx): State<AppContext>,
    Path(rel_path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, MediaError> {
    let file_path = resolve_media_path(&ctx.config.media.root, &rel_path)?;

    let metadata = match tokio::fs::metadata(&file_path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(MediaError::NotFound),
        Err(e) => return Err(MediaError::Storage(e)),
    };
    if !metadata.is_file() {
        return Err(MediaError::NotFound);
    }

    let file_size = metadata.len();
    let content_type = determine_content_type(&file_path);
    let cache = ctx.config.media.cache;

    let range = headers
        .get(header::RANGE)
        .and_then(|h| h.to_str().ok())
        .map(|s| parse_range_header(s, file_size))
        .unwrap_or(RangeOutcome::Full);

    match range {
        RangeOutcome::Unsatisfiable => Err(MediaError::RangeNotSatisfiable { size: file_size }),
        RangeOutcome::Partial(start, end) => {
            // Partial content response
            let length = end - start + 1;

            let mut file = match File::open(&file_path).await {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(MediaError::NotFound)
                }
                Err(e) => return Err(MediaError::Storage(e)),
            };

            file.seek(SeekFrom::Start(start))
                .await
                .map_err(MediaError::Storage)?;

            let stream = ReaderStream::new(file.take(length));
            let body = Body::from_stream(stream);

            let builder = Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes");

            with_cache_headers(builder, cache)
                .body(body)
                .map_err(|e| MediaError::Storage(std::io::Error::other(e)))
        }
        RangeOutcome::Full => {
            // Full file response
            let file = match File::open(&file_path).await {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(MediaError::NotFound)
                }
                Err(e) => return Err(MediaError::Storage(e)),
            };

            let stream = ReaderStream::new(file);
            let body = Body::from_stream(stream);

            let builder = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .header(header::ACCEPT_RANGES, "bytes");

            with_cache_headers(builder, cache)
                .body(body)
                .map_err(|e| MediaError::Storage(std::io::Error::other(e)))
        }
    }
}

fn with_cache_headers(
    builder: axum::http::response::Builder,
    cache: CachePolicy,
) -> axum::http::response::Builder {
    let builder = builder.header(header::CACHE_CONTROL, cache.cache_control());
    match cache.cdn_cache_control() {
        Some(value) => builder.header("CDN-Cache-Control", value),
        None => builder,
    }
}

/// Resolve a request path under the media root.
///
/// Only plain normal components are accepted; `..`, absolute paths, and
/// anything else that could escape the root are rejected before the
/// filesystem is touched. Directory scanning alone does not protect the
/// streaming endpoint, so this guard is load-bearing.
fn resolve_media_path(root: &std::path::Path, rel_path: &str) -> Result<PathBuf, MediaError> {
    let rel = std::path::Path::new(rel_path);

    let mut resolved = root.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            _ => return Err(MediaError::NotFound),
        }
    }

    if resolved == root {
        return Err(MediaError::NotFound);
    }

    Ok(resolved)
}

/// Parse HTTP Range header.
///
/// Supports the single-range form only:
/// - bytes=0-499
/// - bytes=500-999
/// - bytes=500-
///
/// Anything else (multi-range, suffix form, garbage) is treated as "no
/// range" and served as a full file. A well-formed range whose start lies
/// past the end of the file is unsatisfiable.
fn parse_range_header(header: &str, file_size: u64) -> RangeOutcome {
    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Full;
    };

    // Multi-range requests are explicitly unsupported
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start, end)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };

    // Start is required; the suffix form `bytes=-N` is not handled
    let Ok(start) = start.trim().parse::<u64>() else {
        return RangeOutcome::Full;
    };

    let end = end.trim();
    let end = if end.is_empty() {
        file_size.saturating_sub(1)
    } else {
        match end.parse::<u64>() {
            Ok(e) => e,
            Err(_) => return RangeOutcome::Full,
        }
    };

    if start >= file_size || start > end {
        return RangeOutcome::Unsatisfiable;
    }

    let end = end.min(file_size.saturating_sub(1));
    RangeOutcome::Partial(start, end)
}

/// Determine content type from the file extension.
fn determine_content_type(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        // mp4, and the fallback players expect for unknown extensions
        _ => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_range_header_full_range() {
        assert_eq!(
            parse_range_header("bytes=0-499", 1000),
            RangeOutcome::Partial(0, 499)
        );
    }

    #[test]
    fn test_parse_range_header_open_end() {
        assert_eq!(
            parse_range_header("bytes=500-", 1000),
            RangeOutcome::Partial(500, 999)
        );
    }

    #[test]
    fn test_parse_range_header_clamps_end() {
        assert_eq!(
            parse_range_header("bytes=0-2000", 1000),
            RangeOutcome::Partial(0, 999)
        );
    }

    #[test]
    fn test_parse_range_header_start_past_eof() {
        assert_eq!(
            parse_range_header("bytes=1500-", 1000),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(
            parse_range_header("bytes=1000-", 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_parse_range_header_inverted_range() {
        assert_eq!(
            parse_range_header("bytes=500-100", 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_parse_range_header_malformed_serves_full_file() {
        assert_eq!(parse_range_header("bytes=abc-def", 1000), RangeOutcome::Full);
        assert_eq!(parse_range_header("bytes=-", 1000), RangeOutcome::Full);
        assert_eq!(parse_range_header("octets=0-499", 1000), RangeOutcome::Full);
        // Suffix form is not supported; fall back to the full file
        assert_eq!(parse_range_header("bytes=-200", 1000), RangeOutcome::Full);
        // Multi-range is not supported either
        assert_eq!(
            parse_range_header("bytes=0-100,200-300", 1000),
            RangeOutcome::Full
        );
    }

    #[test]
    fn test_parse_range_header_empty_file() {
        assert_eq!(parse_range_header("bytes=0-", 0), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn test_determine_content_type() {
        assert_eq!(
            determine_content_type(Path::new("clip.mp4")),
            "video/mp4"
        );
        assert_eq!(
            determine_content_type(Path::new("clip.WEBM")),
            "video/webm"
        );
        assert_eq!(
            determine_content_type(Path::new("clip.mov")),
            "video/quicktime"
        );
        assert_eq!(
            determine_content_type(Path::new("poster.jpg")),
            "image/jpeg"
        );
        // Unknown extensions fall back to video/mp4
        assert_eq!(
            determine_content_type(Path::new("clip.mystery")),
            "video/mp4"
        );
    }

    #[test]
    fn test_resolve_media_path_plain() {
        let resolved = resolve_media_path(Path::new("/srv/assets"), "portfolio/clip.mp4").unwrap();
        assert_eq!(resolved, Path::new("/srv/assets/portfolio/clip.mp4"));
    }

    #[test]
    fn test_resolve_media_path_rejects_traversal() {
        assert!(resolve_media_path(Path::new("/srv/assets"), "../etc/passwd").is_err());
        assert!(resolve_media_path(Path::new("/srv/assets"), "portfolio/../../etc/passwd").is_err());
        assert!(resolve_media_path(Path::new("/srv/assets"), "/etc/passwd").is_err());
        assert!(resolve_media_path(Path::new("/srv/assets"), "").is_err());
    }
}
