use rusqlite::Transaction;
use uuid::Uuid;

use crate::error::Result;
use crate::store::catalog;
use crate::types::FeatureFlag;

/// Copies the template's live feature flags to `target_workspace_id`.
/// Only `key` and `value` carry over; each copy gets a fresh row id.
pub fn copy_feature_flags(
    tx: &Transaction<'_>,
    template_workspace_id: &str,
    target_workspace_id: &str,
) -> Result<usize> {
    let flags = catalog::fetch_feature_flags(tx, template_workspace_id)?;

    for flag in &flags {
        catalog::upsert_feature_flag(
            tx,
            &FeatureFlag {
                id: Uuid::new_v4().to_string(),
                key: flag.key.clone(),
                value: flag.value,
                workspace_id: target_workspace_id.to_string(),
            },
        )?;
    }

    Ok(flags.len())
}
