use rusqlite::Transaction;

use crate::error::Result;
use crate::store::rows;

/// Copies every live webhook verbatim. Webhooks reference no metadata, so
/// nothing is translated.
pub fn copy_webhooks(
    tx: &Transaction<'_>,
    template_schema: &str,
    target_schema: &str,
) -> Result<usize> {
    let webhooks = rows::fetch_webhooks(tx, template_schema)?;
    rows::insert_webhooks(tx, target_schema, &webhooks)?;
    Ok(webhooks.len())
}
