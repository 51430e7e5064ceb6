//! Typed readers and writers for the tables of a workspace data schema.
//!
//! Every function takes the connection (usually a transaction) and the
//! schema name explicitly. Rows are decoded into their structs at the query
//! boundary; values that do not fit the expected shape are rejected with
//! [`Error::MalformedRow`].

use std::collections::HashMap;

use rusqlite::{Connection, params};

use super::schema_name::quoted;
use crate::error::{Error, Result};
use crate::types::*;

fn malformed(table: &'static str, id: &str, reason: impl Into<String>) -> Error {
    Error::MalformedRow {
        table,
        id: id.to_string(),
        reason: reason.into(),
    }
}

fn decode<T>(
    table: &'static str,
    id: &str,
    column: &str,
    raw: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T> {
    parse(raw).ok_or_else(|| malformed(table, id, format!("unexpected {column} '{raw}'")))
}

// Views

/// Reads every live view of `schema` with its live child rows, ordered by
/// position. Children of deleted views are ignored.
pub fn fetch_views(conn: &Connection, schema: &str) -> Result<Vec<ViewWithChildren>> {
    let s = quoted(schema);

    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, object_metadata_id, type, key, icon, position, is_compact,
                kanban_field_metadata_id, kanban_aggregate_operation,
                kanban_aggregate_operation_field_metadata_id
         FROM {s}.view WHERE deleted_at IS NULL ORDER BY position, id"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok((
            View {
                id: row.get(0)?,
                name: row.get(1)?,
                object_metadata_id: row.get(2)?,
                view_type: ViewType::default(),
                key: row.get(4)?,
                icon: row.get(5)?,
                position: row.get(6)?,
                is_compact: row.get(7)?,
                kanban_field_metadata_id: row.get(8)?,
                kanban_aggregate_operation: row.get(9)?,
                kanban_aggregate_operation_field_metadata_id: row.get(10)?,
            },
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut views = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let (mut view, raw_type) = row?;
        view.view_type = decode("view", &view.id, "type", &raw_type, ViewType::parse)?;
        index.insert(view.id.clone(), views.len());
        views.push(ViewWithChildren::new(view));
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, view_id, field_metadata_id, position, is_visible, size, aggregate_operation
         FROM {s}.view_field WHERE deleted_at IS NULL ORDER BY position, id"
    ))?;
    let fields = stmt.query_map([], |row| {
        Ok(ViewField {
            id: row.get(0)?,
            view_id: row.get(1)?,
            field_metadata_id: row.get(2)?,
            position: row.get(3)?,
            is_visible: row.get(4)?,
            size: row.get(5)?,
            aggregate_operation: row.get(6)?,
        })
    })?;
    for field in fields {
        let field = field?;
        if let Some(&i) = index.get(&field.view_id) {
            views[i].fields.push(field);
        }
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, view_id, parent_view_filter_group_id, logical_operator, position_in_view_filter_group
         FROM {s}.view_filter_group WHERE deleted_at IS NULL ORDER BY position_in_view_filter_group, id"
    ))?;
    let groups = stmt.query_map([], |row| {
        Ok((
            ViewFilterGroup {
                id: row.get(0)?,
                view_id: row.get(1)?,
                parent_view_filter_group_id: row.get(2)?,
                logical_operator: LogicalOperator::default(),
                position_in_view_filter_group: row.get(4)?,
            },
            row.get::<_, String>(3)?,
        ))
    })?;
    for group in groups {
        let (mut group, raw_op) = group?;
        group.logical_operator = decode(
            "view_filter_group",
            &group.id,
            "logical_operator",
            &raw_op,
            LogicalOperator::parse,
        )?;
        if let Some(&i) = index.get(&group.view_id) {
            views[i].filter_groups.push(group);
        }
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, view_id, field_metadata_id, operand, value, display_value,
                view_filter_group_id, position_in_view_filter_group
         FROM {s}.view_filter WHERE deleted_at IS NULL ORDER BY position_in_view_filter_group, id"
    ))?;
    let filters = stmt.query_map([], |row| {
        Ok(ViewFilter {
            id: row.get(0)?,
            view_id: row.get(1)?,
            field_metadata_id: row.get(2)?,
            operand: row.get(3)?,
            value: row.get(4)?,
            display_value: row.get(5)?,
            view_filter_group_id: row.get(6)?,
            position_in_view_filter_group: row.get(7)?,
        })
    })?;
    for filter in filters {
        let filter = filter?;
        if let Some(&i) = index.get(&filter.view_id) {
            views[i].filters.push(filter);
        }
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, view_id, field_metadata_id, field_value, is_visible, position
         FROM {s}.view_group WHERE deleted_at IS NULL ORDER BY position, id"
    ))?;
    let groups = stmt.query_map([], |row| {
        Ok(ViewGroup {
            id: row.get(0)?,
            view_id: row.get(1)?,
            field_metadata_id: row.get(2)?,
            field_value: row.get(3)?,
            is_visible: row.get(4)?,
            position: row.get(5)?,
        })
    })?;
    for group in groups {
        let group = group?;
        if let Some(&i) = index.get(&group.view_id) {
            views[i].groups.push(group);
        }
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, view_id, field_metadata_id, direction
         FROM {s}.view_sort WHERE deleted_at IS NULL ORDER BY id"
    ))?;
    let sorts = stmt.query_map([], |row| {
        Ok((
            ViewSort {
                id: row.get(0)?,
                view_id: row.get(1)?,
                field_metadata_id: row.get(2)?,
                direction: SortDirection::default(),
            },
            row.get::<_, String>(3)?,
        ))
    })?;
    for sort in sorts {
        let (mut sort, raw_direction) = sort?;
        sort.direction = decode(
            "view_sort",
            &sort.id,
            "direction",
            &raw_direction,
            SortDirection::parse,
        )?;
        if let Some(&i) = index.get(&sort.view_id) {
            views[i].sorts.push(sort);
        }
    }

    Ok(views)
}

pub fn insert_view(conn: &Connection, schema: &str, view: &View) -> Result<()> {
    let s = quoted(schema);
    conn.prepare_cached(&format!(
        "INSERT INTO {s}.view (id, name, object_metadata_id, type, key, icon, position, is_compact,
                               kanban_field_metadata_id, kanban_aggregate_operation,
                               kanban_aggregate_operation_field_metadata_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
    ))?
    .execute(params![
        view.id,
        view.name,
        view.object_metadata_id,
        view.view_type.as_str(),
        view.key,
        view.icon,
        view.position,
        view.is_compact,
        view.kanban_field_metadata_id,
        view.kanban_aggregate_operation,
        view.kanban_aggregate_operation_field_metadata_id,
    ])?;
    Ok(())
}

pub fn insert_view_fields(conn: &Connection, schema: &str, fields: &[ViewField]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.view_field (id, view_id, field_metadata_id, position, is_visible, size, aggregate_operation)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
    ))?;
    for field in fields {
        stmt.execute(params![
            field.id,
            field.view_id,
            field.field_metadata_id,
            field.position,
            field.is_visible,
            field.size,
            field.aggregate_operation,
        ])?;
    }
    Ok(())
}

pub fn insert_view_filter_groups(
    conn: &Connection,
    schema: &str,
    groups: &[ViewFilterGroup],
) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.view_filter_group (id, view_id, parent_view_filter_group_id, logical_operator, position_in_view_filter_group)
         VALUES (?1, ?2, ?3, ?4, ?5)"
    ))?;
    for group in groups {
        stmt.execute(params![
            group.id,
            group.view_id,
            group.parent_view_filter_group_id,
            group.logical_operator.as_str(),
            group.position_in_view_filter_group,
        ])?;
    }
    Ok(())
}

pub fn insert_view_filters(conn: &Connection, schema: &str, filters: &[ViewFilter]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.view_filter (id, view_id, field_metadata_id, operand, value, display_value,
                                      view_filter_group_id, position_in_view_filter_group)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
    ))?;
    for filter in filters {
        stmt.execute(params![
            filter.id,
            filter.view_id,
            filter.field_metadata_id,
            filter.operand,
            filter.value,
            filter.display_value,
            filter.view_filter_group_id,
            filter.position_in_view_filter_group,
        ])?;
    }
    Ok(())
}

pub fn insert_view_groups(conn: &Connection, schema: &str, groups: &[ViewGroup]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.view_group (id, view_id, field_metadata_id, field_value, is_visible, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
    ))?;
    for group in groups {
        stmt.execute(params![
            group.id,
            group.view_id,
            group.field_metadata_id,
            group.field_value,
            group.is_visible,
            group.position,
        ])?;
    }
    Ok(())
}

pub fn insert_view_sorts(conn: &Connection, schema: &str, sorts: &[ViewSort]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.view_sort (id, view_id, field_metadata_id, direction)
         VALUES (?1, ?2, ?3, ?4)"
    ))?;
    for sort in sorts {
        stmt.execute(params![
            sort.id,
            sort.view_id,
            sort.field_metadata_id,
            sort.direction.as_str(),
        ])?;
    }
    Ok(())
}

/// Inserts a view and all of its child rows.
pub fn insert_view_with_children(
    conn: &Connection,
    schema: &str,
    view: &ViewWithChildren,
) -> Result<()> {
    insert_view(conn, schema, &view.view)?;
    insert_view_fields(conn, schema, &view.fields)?;
    insert_view_filter_groups(conn, schema, &view.filter_groups)?;
    insert_view_filters(conn, schema, &view.filters)?;
    insert_view_groups(conn, schema, &view.groups)?;
    insert_view_sorts(conn, schema, &view.sorts)?;
    Ok(())
}

// Favorites

pub fn fetch_favorite_folders(conn: &Connection, schema: &str) -> Result<Vec<FavoriteFolder>> {
    let s = quoted(schema);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, position FROM {s}.favorite_folder
         WHERE deleted_at IS NULL ORDER BY position, id"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(FavoriteFolder {
            id: row.get(0)?,
            name: row.get(1)?,
            position: row.get(2)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub fn fetch_favorites(conn: &Connection, schema: &str) -> Result<Vec<Favorite>> {
    let s = quoted(schema);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, position, view_id, favorite_folder_id FROM {s}.favorite
         WHERE deleted_at IS NULL ORDER BY position, id"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(Favorite {
            id: row.get(0)?,
            position: row.get(1)?,
            view_id: row.get(2)?,
            favorite_folder_id: row.get(3)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Reads the live favorites of `source` that can be copied into `target`:
/// those whose view already exists in the target `view` table, and view-less
/// favorites that sit in a folder. A favorite whose folder is missing from
/// the target is left out as well, so folders must be copied first.
pub fn fetch_copyable_favorites(
    conn: &Connection,
    source: &str,
    target: &str,
) -> Result<Vec<Favorite>> {
    let (src, dst) = (quoted(source), quoted(target));
    let mut stmt = conn.prepare(&format!(
        "SELECT f.id, f.position, f.view_id, f.favorite_folder_id
         FROM {src}.favorite f
         LEFT JOIN {dst}.view v ON v.id = f.view_id
         LEFT JOIN {dst}.favorite_folder ff ON ff.id = f.favorite_folder_id
         WHERE f.deleted_at IS NULL
           AND ((f.view_id IS NULL AND f.favorite_folder_id IS NOT NULL) OR v.id IS NOT NULL)
           AND (f.favorite_folder_id IS NULL OR ff.id IS NOT NULL)
         ORDER BY f.position, f.id"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(Favorite {
            id: row.get(0)?,
            position: row.get(1)?,
            view_id: row.get(2)?,
            favorite_folder_id: row.get(3)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub fn insert_favorite_folders(
    conn: &Connection,
    schema: &str,
    folders: &[FavoriteFolder],
) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.favorite_folder (id, name, position) VALUES (?1, ?2, ?3)"
    ))?;
    for folder in folders {
        stmt.execute(params![folder.id, folder.name, folder.position])?;
    }
    Ok(())
}

pub fn insert_favorites(conn: &Connection, schema: &str, favorites: &[Favorite]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.favorite (id, position, view_id, favorite_folder_id) VALUES (?1, ?2, ?3, ?4)"
    ))?;
    for favorite in favorites {
        stmt.execute(params![
            favorite.id,
            favorite.position,
            favorite.view_id,
            favorite.favorite_folder_id,
        ])?;
    }
    Ok(())
}

// Webhooks

pub fn fetch_webhooks(conn: &Connection, schema: &str) -> Result<Vec<Webhook>> {
    let s = quoted(schema);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, target_url, secret, operations, description FROM {s}.webhook
         WHERE deleted_at IS NULL ORDER BY id"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok((
            Webhook {
                id: row.get(0)?,
                target_url: row.get(1)?,
                secret: row.get(2)?,
                operations: Vec::new(),
                description: row.get(4)?,
            },
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut webhooks = Vec::new();
    for row in rows {
        let (mut webhook, raw_operations) = row?;
        webhook.operations = serde_json::from_str(&raw_operations).map_err(|e| {
            malformed("webhook", &webhook.id, format!("invalid operations: {e}"))
        })?;
        webhooks.push(webhook);
    }
    Ok(webhooks)
}

pub fn insert_webhooks(conn: &Connection, schema: &str, webhooks: &[Webhook]) -> Result<()> {
    let s = quoted(schema);
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {s}.webhook (id, target_url, secret, operations, description)
         VALUES (?1, ?2, ?3, ?4, ?5)"
    ))?;
    for webhook in webhooks {
        stmt.execute(params![
            webhook.id,
            webhook.target_url,
            webhook.secret,
            serde_json::to_string(&webhook.operations)?,
            webhook.description,
        ])?;
    }
    Ok(())
}
