use crate::error::{Error, Result};

const SCHEMA_PREFIX: &str = "workspace_";

/// Derives the data schema name for a workspace id.
///
/// `3f2c...-...` becomes `workspace_3f2c...` with hyphens removed, so the
/// result is a plain SQL identifier and a safe file stem.
pub fn schema_name_for(workspace_id: &str) -> Result<String> {
    let compact: String = workspace_id
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let name = format!("{SCHEMA_PREFIX}{compact}");
    validate_schema_name(&name)?;
    Ok(name)
}

pub fn validate_schema_name(name: &str) -> Result<()> {
    let Some(suffix) = name.strip_prefix(SCHEMA_PREFIX) else {
        return Err(Error::BadRequest(format!(
            "Schema name must start with '{SCHEMA_PREFIX}'"
        )));
    };

    if suffix.is_empty() {
        return Err(Error::BadRequest("Schema name cannot be empty".to_string()));
    }

    if suffix.len() > 64 {
        return Err(Error::BadRequest(
            "Schema name cannot exceed 64 characters".to_string(),
        ));
    }

    if !suffix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(Error::BadRequest(
            "Schema name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Quotes a validated schema name for use as a table qualifier.
#[must_use]
pub(crate) fn quoted(name: &str) -> String {
    format!("\"{name}\"")
}
