//! Catalog manifest route.

use axum::{extract::State, Json};

use crate::catalog::{self, CatalogManifest};
use crate::error::MediaError;
use crate::server::AppContext;

/// Return the ordered catalog manifest.
///
/// Recomputed from the directory snapshot on every request; an absent
/// catalog directory yields an empty manifest rather than an error.
pub async fn get_catalog(
    State(ctx): State<AppContext>,
) -> Result<Json<CatalogManifest>, MediaError> {
    let media = &ctx.config.media;
    let dir = media.root.join(&media.catalog_dir);

    let manifest = tokio::task::spawn_blocking({
        let featured = media.featured.clone();
        let extensions = media.extensions.clone();
        let catalog_dir = media.catalog_dir.clone();
        move || catalog::list(&dir, &catalog_dir, &featured, &extensions)
    })
    .await
    .map_err(|e| MediaError::Storage(std::io::Error::other(e)))??;

    Ok(Json(manifest))
}
