//! Catalog queries that also run inside provisioning transactions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{Error, Result};
use crate::types::*;

pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) const WORKSPACE_COLUMNS: &str =
    "id, display_name, schema_name, is_template, prefilled_at, created_at";

pub(crate) fn workspace_from_row(row: &Row<'_>) -> rusqlite::Result<Workspace> {
    Ok(Workspace {
        id: row.get(0)?,
        display_name: row.get(1)?,
        schema_name: row.get(2)?,
        is_template: row.get(3)?,
        prefilled_at: row.get::<_, Option<String>>(4)?.map(|s| parse_datetime(&s)),
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

pub fn get_workspace(conn: &Connection, id: &str) -> Result<Option<Workspace>> {
    conn.query_row(
        &format!("SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id = ?1"),
        params![id],
        workspace_from_row,
    )
    .optional()
    .map_err(Error::from)
}

pub fn mark_prefilled(conn: &Connection, id: &str, at: &DateTime<Utc>) -> Result<()> {
    let rows = conn.execute(
        "UPDATE workspaces SET prefilled_at = ?1 WHERE id = ?2",
        params![format_datetime(at), id],
    )?;

    if rows == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

// Metadata

/// Inserts objects and their fields. Callers wrap this in a transaction.
pub fn insert_object_metadata(conn: &Connection, objects: &[ObjectMetadata]) -> Result<()> {
    let mut object_stmt = conn.prepare_cached(
        "INSERT INTO object_metadata (id, workspace_id, standard_id, name_singular, is_custom)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    let mut field_stmt = conn.prepare_cached(
        "INSERT INTO field_metadata (id, object_metadata_id, workspace_id, standard_id, name, is_custom)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    for object in objects {
        object_stmt.execute(params![
            object.id,
            object.workspace_id,
            object.standard_id,
            object.name_singular,
            object.is_custom,
        ])?;

        for field in &object.fields {
            if field.object_metadata_id != object.id {
                return Err(Error::BadRequest(format!(
                    "field '{}' does not belong to object '{}'",
                    field.name, object.name_singular
                )));
            }
            field_stmt.execute(params![
                field.id,
                field.object_metadata_id,
                object.workspace_id,
                field.standard_id,
                field.name,
                field.is_custom,
            ])?;
        }
    }
    Ok(())
}

/// Loads every object of a workspace with its fields nested.
pub fn fetch_object_metadata(conn: &Connection, workspace_id: &str) -> Result<Vec<ObjectMetadata>> {
    let mut stmt = conn.prepare(
        "SELECT id, workspace_id, standard_id, name_singular, is_custom
         FROM object_metadata WHERE workspace_id = ?1 ORDER BY name_singular",
    )?;
    let rows = stmt.query_map(params![workspace_id], |row| {
        Ok(ObjectMetadata {
            id: row.get(0)?,
            workspace_id: row.get(1)?,
            standard_id: row.get(2)?,
            name_singular: row.get(3)?,
            is_custom: row.get(4)?,
            fields: Vec::new(),
        })
    })?;
    let mut objects = rows.collect::<std::result::Result<Vec<_>, _>>()?;

    let index: HashMap<String, usize> = objects
        .iter()
        .enumerate()
        .map(|(i, object)| (object.id.clone(), i))
        .collect();

    let mut stmt = conn.prepare(
        "SELECT id, object_metadata_id, standard_id, name, is_custom
         FROM field_metadata WHERE workspace_id = ?1 ORDER BY name",
    )?;
    let fields = stmt.query_map(params![workspace_id], |row| {
        Ok(FieldMetadata {
            id: row.get(0)?,
            object_metadata_id: row.get(1)?,
            standard_id: row.get(2)?,
            name: row.get(3)?,
            is_custom: row.get(4)?,
        })
    })?;

    for field in fields {
        let field = field?;
        if let Some(&i) = index.get(&field.object_metadata_id) {
            objects[i].fields.push(field);
        }
    }

    Ok(objects)
}

// Feature flags

pub fn fetch_feature_flags(conn: &Connection, workspace_id: &str) -> Result<Vec<FeatureFlag>> {
    let mut stmt = conn.prepare(
        "SELECT id, key, value, workspace_id FROM feature_flags
         WHERE workspace_id = ?1 AND deleted_at IS NULL ORDER BY key",
    )?;

    let rows = stmt.query_map(params![workspace_id], |row| {
        Ok(FeatureFlag {
            id: row.get(0)?,
            key: row.get(1)?,
            value: row.get(2)?,
            workspace_id: row.get(3)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub fn upsert_feature_flag(conn: &Connection, flag: &FeatureFlag) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO feature_flags (id, key, value, workspace_id)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(workspace_id, key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now'),
            deleted_at = NULL",
    )?
    .execute(params![flag.id, flag.key, flag.value, flag.workspace_id])?;
    Ok(())
}
