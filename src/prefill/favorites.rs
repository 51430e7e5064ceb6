use rusqlite::Transaction;
use serde::Serialize;

use crate::error::Result;
use crate::store::rows;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FavoriteCopyStats {
    pub folders_copied: usize,
    pub favorites_copied: usize,
    /// Favorites left behind because their view was not copied.
    pub favorites_skipped: usize,
}

/// Copies favorite folders and favorites from `template_schema` into
/// `target_schema`.
///
/// Must run after the views are in place: a favorite is only copied when its
/// view already exists in the target, or when it has no view and sits in a
/// folder. No favorite is ever written with a dangling view reference.
pub fn copy_favorites(
    tx: &Transaction<'_>,
    template_schema: &str,
    target_schema: &str,
) -> Result<FavoriteCopyStats> {
    let folders = rows::fetch_favorite_folders(tx, template_schema)?;
    rows::insert_favorite_folders(tx, target_schema, &folders)?;

    let total = rows::fetch_favorites(tx, template_schema)?.len();
    let favorites = rows::fetch_copyable_favorites(tx, template_schema, target_schema)?;
    rows::insert_favorites(tx, target_schema, &favorites)?;

    let skipped = total - favorites.len();
    if skipped > 0 {
        tracing::debug!(skipped, "skipped favorites without a copied view");
    }

    Ok(FavoriteCopyStats {
        folders_copied: folders.len(),
        favorites_copied: favorites.len(),
        favorites_skipped: skipped,
    })
}
