//! Copies the template workspace's reference data into a new workspace.
//!
//! Views, favorites, webhooks and feature flags are written in that order
//! inside a single transaction, so a workspace ends up with all of them or
//! none. Metadata references are rewritten through [`MetadataIdMap`].

mod favorites;
mod feature_flags;
mod id_map;
mod views;
mod webhooks;

pub use favorites::{FavoriteCopyStats, copy_favorites};
pub use feature_flags::copy_feature_flags;
pub use id_map::MetadataIdMap;
pub use views::{ViewCopyStats, copy_views, translate_view};
pub use webhooks::copy_webhooks;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::{catalog, rows};
use crate::types::Workspace;

#[derive(Debug, Clone, Serialize)]
pub struct PrefillReport {
    pub workspace_id: String,
    pub template_workspace_id: String,
    pub views: ViewCopyStats,
    pub favorites: FavoriteCopyStats,
    pub webhooks_copied: usize,
    pub feature_flags_copied: usize,
    pub prefilled_at: DateTime<Utc>,
}

/// Runs the full prefill of `target` from `template`.
///
/// Both data schemas must already be attached to `conn`. The target is
/// re-read inside the transaction and refused with
/// [`Error::AlreadyPrefilled`] if it carries a prefill marker, so a second
/// run never duplicates rows. The id map is built before anything is
/// written; a seed without standard ids aborts with nothing inserted.
pub fn prefill_workspace(
    conn: &mut Connection,
    template: &Workspace,
    target: &Workspace,
) -> Result<PrefillReport> {
    if target.is_template || target.id == template.id {
        return Err(Error::BadRequest(
            "the template workspace cannot be prefilled".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    let current = catalog::get_workspace(&tx, &target.id)?.ok_or(Error::NotFound)?;
    if current.prefilled_at.is_some() {
        return Err(Error::AlreadyPrefilled(target.id.clone()));
    }

    let template_metadata = catalog::fetch_object_metadata(&tx, &template.id)?;
    let target_metadata = catalog::fetch_object_metadata(&tx, &target.id)?;
    let ids = MetadataIdMap::build(&template_metadata, &target_metadata)?;

    let template_views = rows::fetch_views(&tx, &template.schema_name)?;

    let views = copy_views(&tx, &template_views, &ids, &target.schema_name)?;
    let favorites = copy_favorites(&tx, &template.schema_name, &target.schema_name)?;
    let webhooks_copied = copy_webhooks(&tx, &template.schema_name, &target.schema_name)?;
    let feature_flags_copied = copy_feature_flags(&tx, &template.id, &target.id)?;

    let prefilled_at = Utc::now();
    catalog::mark_prefilled(&tx, &target.id, &prefilled_at)?;

    tx.commit()?;

    let report = PrefillReport {
        workspace_id: target.id.clone(),
        template_workspace_id: template.id.clone(),
        views,
        favorites,
        webhooks_copied,
        feature_flags_copied,
        prefilled_at,
    };

    tracing::info!(
        workspace_id = %report.workspace_id,
        views = report.views.views_copied,
        views_skipped = report.views.views_skipped,
        favorites = report.favorites.favorites_copied,
        webhooks = report.webhooks_copied,
        feature_flags = report.feature_flags_copied,
        "workspace prefilled"
    );

    Ok(report)
}
