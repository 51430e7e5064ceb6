use rusqlite::Transaction;
use serde::Serialize;

use super::MetadataIdMap;
use crate::error::Result;
use crate::store::rows;
use crate::types::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewCopyStats {
    pub views_copied: usize,
    /// Views whose object has no counterpart in the target workspace.
    pub views_skipped: usize,
    /// Fields, filters, filter groups, groups and sorts written.
    pub rows_copied: usize,
    /// Child rows dropped because their field has no counterpart.
    pub rows_dropped: usize,
}

/// Rewrites a template view for the target workspace.
///
/// Returns `None` when the view's object does not translate. Child rows whose
/// field does not translate are dropped individually, as are filter groups
/// and filters hanging off a group missing from the view, and untranslatable
/// kanban references are cleared; the second tuple element counts the
/// dropped rows. Every id of the view and its children is kept as is.
#[must_use]
pub fn translate_view(
    template: &ViewWithChildren,
    ids: &MetadataIdMap,
) -> Option<(ViewWithChildren, usize)> {
    let object_metadata_id = ids.translate(&template.view.object_metadata_id)?;

    let view = View {
        object_metadata_id: object_metadata_id.to_string(),
        kanban_field_metadata_id: ids.translate_opt(template.view.kanban_field_metadata_id.as_deref()),
        kanban_aggregate_operation_field_metadata_id: ids.translate_opt(
            template
                .view
                .kanban_aggregate_operation_field_metadata_id
                .as_deref(),
        ),
        ..template.view.clone()
    };

    // A filter in a group that did not survive goes with its group.
    let filter_groups = live_filter_groups(&template.filter_groups);
    let live_filters: Vec<&ViewFilter> = template
        .filters
        .iter()
        .filter(|f| {
            f.view_filter_group_id
                .as_ref()
                .is_none_or(|id| filter_groups.iter().any(|g| &g.id == id))
        })
        .collect();

    let mut dropped = (template.filter_groups.len() - filter_groups.len())
        + (template.filters.len() - live_filters.len());
    let mut keep = |field_metadata_id: &str| -> Option<String> {
        let translated = ids.translate(field_metadata_id).map(str::to_string);
        if translated.is_none() {
            dropped += 1;
        }
        translated
    };

    let fields: Vec<ViewField> = template
        .fields
        .iter()
        .filter_map(|f| {
            keep(&f.field_metadata_id).map(|field_metadata_id| ViewField {
                field_metadata_id,
                ..f.clone()
            })
        })
        .collect();

    let filters: Vec<ViewFilter> = live_filters
        .into_iter()
        .filter_map(|f| {
            keep(&f.field_metadata_id).map(|field_metadata_id| ViewFilter {
                field_metadata_id,
                ..f.clone()
            })
        })
        .collect();

    let groups: Vec<ViewGroup> = template
        .groups
        .iter()
        .filter_map(|g| {
            keep(&g.field_metadata_id).map(|field_metadata_id| ViewGroup {
                field_metadata_id,
                ..g.clone()
            })
        })
        .collect();

    let sorts: Vec<ViewSort> = template
        .sorts
        .iter()
        .filter_map(|s| {
            keep(&s.field_metadata_id).map(|field_metadata_id| ViewSort {
                field_metadata_id,
                ..s.clone()
            })
        })
        .collect();

    Some((
        ViewWithChildren {
            view,
            fields,
            filters,
            filter_groups,
            groups,
            sorts,
        },
        dropped,
    ))
}

/// Filter groups reference no field and travel with their view, except
/// those whose parent group is gone (soft-deleted), along with their
/// descendants.
fn live_filter_groups(groups: &[ViewFilterGroup]) -> Vec<ViewFilterGroup> {
    let mut live: Vec<ViewFilterGroup> = groups.to_vec();
    loop {
        let before = live.len();
        let ids: Vec<String> = live.iter().map(|g| g.id.clone()).collect();
        live.retain(|g| {
            g.parent_view_filter_group_id
                .as_ref()
                .is_none_or(|parent| ids.contains(parent))
        });
        if live.len() == before {
            return live;
        }
    }
}

/// Re-creates the template views in `target_schema`.
///
/// Only inserts; re-running against the same schema would collide on the
/// preserved view ids.
pub fn copy_views(
    tx: &Transaction<'_>,
    views: &[ViewWithChildren],
    ids: &MetadataIdMap,
    target_schema: &str,
) -> Result<ViewCopyStats> {
    let mut stats = ViewCopyStats::default();

    for template in views {
        let Some((view, dropped)) = translate_view(template, ids) else {
            tracing::debug!(
                view_id = %template.view.id,
                object_metadata_id = %template.view.object_metadata_id,
                "skipping view: object not present in target workspace"
            );
            stats.views_skipped += 1;
            continue;
        };

        if dropped > 0 {
            tracing::debug!(view_id = %view.view.id, dropped, "dropped untranslatable view rows");
        }

        rows::insert_view_with_children(tx, target_schema, &view)?;

        stats.views_copied += 1;
        stats.rows_dropped += dropped;
        stats.rows_copied += view.fields.len()
            + view.filters.len()
            + view.filter_groups.len()
            + view.groups.len()
            + view.sorts.len();
    }

    Ok(stats)
}
