//! Catalog listing for the portfolio grid.
//!
//! Scans the catalog directory, classifies each file as image or video, and
//! produces one deterministic "magazine layout" ordering: featured assets
//! first in editorial order, then the remainder interleaved one video / one
//! image with each subset sorted by filename descending (date-stamped
//! filenames come out newest-first).
//!
//! The listing is a pure function of the directory snapshot and the featured
//! list; nothing is persisted and every request recomputes the manifest.

use serde::Serialize;
use std::path::Path;

use crate::error::MediaError;

/// Alt text for portfolio entries; dimensions are layout hints only, not
/// measured from the files.
const PORTFOLIO_ALT: &str = "Stage Design Portfolio";

const HINT_WIDTH: u32 = 600;
const VIDEO_HINT_HEIGHT: u32 = 400;
const IMAGE_HINT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Layout hint passed through to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

/// One catalog entry. `path` is relative to the media root and can be used
/// directly against the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: usize,
    pub path: String,
    pub alt: String,
    pub kind: MediaKind,
    pub size_bytes: u64,
    pub display_order: usize,
    pub size_hint: SizeHint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogManifest {
    pub items: Vec<CatalogItem>,
}

/// A file that survived the extension filter, before ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScannedFile {
    name: String,
    kind: MediaKind,
    size_bytes: u64,
}

/// List the catalog directory and return the ordered manifest.
///
/// An absent directory yields an empty manifest, not an error: the site must
/// degrade gracefully before any assets have been uploaded. I/O failures on
/// a directory that does exist are real storage faults.
pub fn list(
    dir: &Path,
    catalog_prefix: &str,
    featured: &[String],
    extensions: &[String],
) -> Result<CatalogManifest, MediaError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CatalogManifest::default())
        }
        Err(e) => return Err(MediaError::Storage(e)),
    };

    let mut scanned = Vec::new();
    for entry in entries {
        let entry = entry.map_err(MediaError::Storage)?;
        let metadata = entry.metadata().map_err(MediaError::Storage)?;
        if !metadata.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let Some(kind) = classify(&name, extensions) else {
            continue;
        };

        scanned.push(ScannedFile {
            name,
            kind,
            size_bytes: metadata.len(),
        });
    }

    // Directory read order is not stable; sort before partitioning so the
    // manifest is identical across runs over the same snapshot.
    scanned.sort_by(|a, b| a.name.cmp(&b.name));

    let ordered = order_assets(scanned, featured);

    let items = ordered
        .into_iter()
        .enumerate()
        .map(|(index, file)| CatalogItem {
            id: index,
            path: format!("{}/{}", catalog_prefix, file.name),
            alt: PORTFOLIO_ALT.to_string(),
            kind: file.kind,
            size_bytes: file.size_bytes,
            display_order: index,
            size_hint: SizeHint {
                width: HINT_WIDTH,
                height: match file.kind {
                    MediaKind::Video => VIDEO_HINT_HEIGHT,
                    MediaKind::Image => IMAGE_HINT_HEIGHT,
                },
            },
        })
        .collect();

    Ok(CatalogManifest { items })
}

/// Classify a filename against the configured extension set.
///
/// Returns `None` for anything outside the supported media set, which drops
/// the file from the listing entirely.
fn classify(name: &str, extensions: &[String]) -> Option<MediaKind> {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())?;

    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
        return None;
    }

    match ext.as_str() {
        "mp4" | "webm" | "mov" => Some(MediaKind::Video),
        _ => Some(MediaKind::Image),
    }
}

/// Apply the full ordering policy: featured prefix, then interleaved rest.
fn order_assets(scanned: Vec<ScannedFile>, featured: &[String]) -> Vec<ScannedFile> {
    let (mut pinned, rest): (Vec<_>, Vec<_>) = scanned
        .into_iter()
        .partition(|f| featured.iter().any(|name| name == &f.name));

    // Featured order is the editor's list order, not filename order.
    pinned.sort_by_key(|f| featured.iter().position(|name| name == &f.name));

    let (mut videos, mut images): (Vec<_>, Vec<_>) =
        rest.into_iter().partition(|f| f.kind == MediaKind::Video);

    // Filename descending within each subset; date-stamped names sort
    // newest-first.
    videos.sort_by(|a, b| b.name.cmp(&a.name));
    images.sort_by(|a, b| b.name.cmp(&a.name));

    pinned.extend(interleave(videos, images));
    pinned
}

/// Alternate one video / one image, video first, then append whatever is
/// left of the longer subset.
fn interleave(videos: Vec<ScannedFile>, images: Vec<ScannedFile>) -> Vec<ScannedFile> {
    let mut out = Vec::with_capacity(videos.len() + images.len());
    let mut videos = videos.into_iter();
    let mut images = images.into_iter();

    loop {
        match (videos.next(), images.next()) {
            (Some(v), Some(i)) => {
                out.push(v);
                out.push(i);
            }
            (Some(v), None) => {
                out.push(v);
                out.extend(videos);
                break;
            }
            (None, Some(i)) => {
                out.push(i);
                out.extend(images);
                break;
            }
            (None, None) => break,
        }
    }

    out
}
