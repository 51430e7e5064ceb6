use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::catalog::{self, WORKSPACE_COLUMNS, format_datetime, parse_datetime, workspace_from_row};
use super::rows;
use super::schema::{CORE_SCHEMA, WORKSPACE_SCHEMA};
use super::schema_name::validate_schema_name;
use crate::error::{Error, Result};
use crate::prefill::{self, PrefillReport};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
    workspaces_dir: PathBuf,
}

impl SqliteStore {
    /// Opens the catalog database. Workspace data databases live in a
    /// `workspaces/` directory next to it.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let workspaces_dir = db_path
            .parent()
            .map(|p| p.join("workspaces"))
            .unwrap_or_else(|| PathBuf::from("workspaces"));

        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        // Rollback journal keeps commits that span the catalog and an
        // attached workspace database atomic across both files.
        conn.pragma_update(None, "journal_mode", "DELETE")?;

        Ok(Self {
            conn: Mutex::new(conn),
            workspaces_dir,
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[must_use]
    pub fn workspaces_dir(&self) -> &Path {
        &self.workspaces_dir
    }

    fn schema_path(&self, schema_name: &str) -> PathBuf {
        self.workspaces_dir.join(format!("{schema_name}.db"))
    }

    /// Runs `f` with the given workspace schemas attached, detaching
    /// afterwards whatever this call attached.
    pub fn with_schemas<T>(
        &self,
        schemas: &[&str],
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn();
        let mut attached = Vec::new();

        let result = self
            .attach_all(&conn, schemas, &mut attached)
            .and_then(|()| f(&mut conn));

        if !attached.is_empty() {
            conn.flush_prepared_statement_cache();
        }
        for schema in attached {
            if let Err(e) = conn.execute("DETACH DATABASE ?1", params![schema]) {
                tracing::warn!("Failed to detach schema {schema}: {e}");
            }
        }

        result
    }

    fn attach_all<'a>(
        &self,
        conn: &Connection,
        schemas: &[&'a str],
        attached: &mut Vec<&'a str>,
    ) -> Result<()> {
        let already = attached_schemas(conn)?;

        for &schema in schemas {
            validate_schema_name(schema)?;
            if already.iter().any(|name| name == schema) || attached.contains(&schema) {
                continue;
            }

            let path = self.schema_path(schema);
            if !path.exists() {
                return Err(Error::NotFound);
            }

            conn.execute(
                "ATTACH DATABASE ?1 AS ?2",
                params![path.to_string_lossy().to_string(), schema],
            )?;
            attached.push(schema);
        }
        Ok(())
    }
}

fn attached_schemas(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA database_list")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(CORE_SCHEMA)?;
        std::fs::create_dir_all(&self.workspaces_dir)?;
        Ok(())
    }

    // Workspace operations

    fn create_workspace(&self, ws: &Workspace) -> Result<()> {
        validate_schema_name(&ws.schema_name)?;

        let result = self.conn().execute(
            "INSERT INTO workspaces (id, display_name, schema_name, is_template, prefilled_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                ws.id,
                ws.display_name,
                ws.schema_name,
                ws.is_template,
                ws.prefilled_at.as_ref().map(format_datetime),
                format_datetime(&ws.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_workspace(&self, id: &str) -> Result<Option<Workspace>> {
        catalog::get_workspace(&self.conn(), id)
    }

    fn get_template_workspace(&self) -> Result<Option<Workspace>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE is_template = 1"),
            [],
            workspace_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_workspaces(&self, cursor: &str, limit: i32) -> Result<Vec<Workspace>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM workspaces WHERE id > ?1 ORDER BY id LIMIT ?2"
        ))?;

        let rows = stmt.query_map(params![cursor, limit], workspace_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_workspace(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM workspaces WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Data schema operations

    fn create_workspace_schema(&self, schema_name: &str) -> Result<()> {
        validate_schema_name(schema_name)?;
        std::fs::create_dir_all(&self.workspaces_dir)?;

        let path = self.schema_path(schema_name);
        if path.exists() {
            return Err(Error::AlreadyExists);
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch(WORKSPACE_SCHEMA)?;
        Ok(())
    }

    fn drop_workspace_schema(&self, schema_name: &str) -> Result<()> {
        validate_schema_name(schema_name)?;

        match std::fs::remove_file(self.schema_path(schema_name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn list_views(&self, schema_name: &str) -> Result<Vec<ViewWithChildren>> {
        self.with_schemas(&[schema_name], |conn| rows::fetch_views(conn, schema_name))
    }

    fn create_view(&self, schema_name: &str, view: &ViewWithChildren) -> Result<()> {
        self.with_schemas(&[schema_name], |conn| {
            let tx = conn.transaction()?;
            rows::insert_view_with_children(&tx, schema_name, view)?;
            tx.commit()?;
            Ok(())
        })
    }

    fn list_favorite_folders(&self, schema_name: &str) -> Result<Vec<FavoriteFolder>> {
        self.with_schemas(&[schema_name], |conn| {
            rows::fetch_favorite_folders(conn, schema_name)
        })
    }

    fn create_favorite_folder(&self, schema_name: &str, folder: &FavoriteFolder) -> Result<()> {
        self.with_schemas(&[schema_name], |conn| {
            rows::insert_favorite_folders(conn, schema_name, std::slice::from_ref(folder))
        })
    }

    fn list_favorites(&self, schema_name: &str) -> Result<Vec<Favorite>> {
        self.with_schemas(&[schema_name], |conn| rows::fetch_favorites(conn, schema_name))
    }

    fn create_favorite(&self, schema_name: &str, favorite: &Favorite) -> Result<()> {
        self.with_schemas(&[schema_name], |conn| {
            rows::insert_favorites(conn, schema_name, std::slice::from_ref(favorite))
        })
    }

    fn list_webhooks(&self, schema_name: &str) -> Result<Vec<Webhook>> {
        self.with_schemas(&[schema_name], |conn| rows::fetch_webhooks(conn, schema_name))
    }

    fn create_webhook(&self, schema_name: &str, webhook: &Webhook) -> Result<()> {
        self.with_schemas(&[schema_name], |conn| {
            rows::insert_webhooks(conn, schema_name, std::slice::from_ref(webhook))
        })
    }

    // Metadata operations

    fn create_object_metadata(&self, objects: &[ObjectMetadata]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        catalog::insert_object_metadata(&tx, objects)?;
        tx.commit()?;
        Ok(())
    }

    fn list_object_metadata(&self, workspace_id: &str) -> Result<Vec<ObjectMetadata>> {
        catalog::fetch_object_metadata(&self.conn(), workspace_id)
    }

    // Feature flag operations

    fn upsert_feature_flag(&self, flag: &FeatureFlag) -> Result<()> {
        catalog::upsert_feature_flag(&self.conn(), flag)
    }

    fn list_feature_flags(&self, workspace_id: &str) -> Result<Vec<FeatureFlag>> {
        catalog::fetch_feature_flags(&self.conn(), workspace_id)
    }

    fn prefill_workspace(
        &self,
        template: &Workspace,
        target: &Workspace,
    ) -> Result<PrefillReport> {
        self.with_schemas(
            &[template.schema_name.as_str(), target.schema_name.as_str()],
            |conn| prefill::prefill_workspace(conn, template, target),
        )
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO tokens (id, token_hash, token_lookup, is_admin, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                token.id,
                token.token_hash,
                token.token_lookup,
                token.is_admin,
                format_datetime(&token.created_at),
                token.expires_at.as_ref().map(format_datetime),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::TokenLookupCollision)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, is_admin, created_at, expires_at, last_used_at
             FROM tokens WHERE token_lookup = ?1",
            params![lookup],
            |row| {
                Ok(Token {
                    id: row.get(0)?,
                    token_hash: row.get(1)?,
                    token_lookup: row.get(2)?,
                    is_admin: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                    expires_at: row.get::<_, Option<String>>(5)?.map(|s| parse_datetime(&s)),
                    last_used_at: row.get::<_, Option<String>>(6)?.map(|s| parse_datetime(&s)),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_token_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE tokens SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn has_admin_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM tokens WHERE is_admin = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn workspace(id: &str, is_template: bool) -> Workspace {
        Workspace {
            id: id.to_string(),
            display_name: format!("Agency {id}"),
            schema_name: format!("workspace_{id}"),
            is_template,
            prefilled_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"workspaces".to_string()));
        assert!(tables.contains(&"tokens".to_string()));
        assert!(tables.contains(&"object_metadata".to_string()));
        assert!(tables.contains(&"field_metadata".to_string()));
        assert!(tables.contains(&"feature_flags".to_string()));
        assert!(store.workspaces_dir().is_dir());
    }

    #[test]
    fn test_workspace_crud() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_workspace(&workspace("a1", false)).unwrap();

        let fetched = store.get_workspace("a1").unwrap().unwrap();
        assert_eq!(fetched.display_name, "Agency a1");
        assert_eq!(fetched.schema_name, "workspace_a1");
        assert!(fetched.prefilled_at.is_none());

        let listed = store.list_workspaces("", 10).unwrap();
        assert_eq!(listed.len(), 1);

        assert!(store.delete_workspace("a1").unwrap());
        assert!(store.get_workspace("a1").unwrap().is_none());
    }

    #[test]
    fn test_only_one_template_workspace() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_workspace(&workspace("t1", true)).unwrap();
        let result = store.create_workspace(&workspace("t2", true));
        assert!(matches!(result, Err(Error::AlreadyExists)));

        let template = store.get_template_workspace().unwrap().unwrap();
        assert_eq!(template.id, "t1");
    }

    #[test]
    fn test_workspace_schema_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_workspace_schema("workspace_a1").unwrap();
        assert!(matches!(
            store.create_workspace_schema("workspace_a1"),
            Err(Error::AlreadyExists)
        ));

        let webhook = Webhook {
            id: "wh-1".to_string(),
            target_url: "https://hooks.example.com/leads".to_string(),
            secret: "s3cret".to_string(),
            operations: vec!["lead.created".to_string()],
            description: None,
        };
        store.create_webhook("workspace_a1", &webhook).unwrap();

        let webhooks = store.list_webhooks("workspace_a1").unwrap();
        assert_eq!(webhooks.len(), 1);
        assert_eq!(webhooks[0].operations, vec!["lead.created".to_string()]);

        // detached again after each call
        let attached = attached_schemas(&store.conn()).unwrap();
        assert!(!attached.contains(&"workspace_a1".to_string()));

        store.drop_workspace_schema("workspace_a1").unwrap();
        assert!(matches!(
            store.list_webhooks("workspace_a1"),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_malformed_webhook_operations_rejected() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        store.create_workspace_schema("workspace_a1").unwrap();

        let path = store.workspaces_dir().join("workspace_a1.db");
        Connection::open(path)
            .unwrap()
            .execute(
                "INSERT INTO webhook (id, target_url, secret, operations) VALUES ('wh-1', 'https://x', 's', 'not json')",
                [],
            )
            .unwrap();

        let result = store.list_webhooks("workspace_a1");
        assert!(matches!(
            result,
            Err(Error::MalformedRow { table: "webhook", .. })
        ));
    }

    #[test]
    fn test_token_lookup_collision() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let token1 = Token {
            id: "token-1".to_string(),
            token_hash: "hash1".to_string(),
            token_lookup: "lookup123".to_string(),
            is_admin: true,
            created_at: Utc::now(),
            expires_at: None,
            last_used_at: None,
        };
        store.create_token(&token1).unwrap();
        assert!(store.has_admin_token().unwrap());

        let token2 = Token {
            id: "token-2".to_string(),
            token_hash: "hash2".to_string(),
            ..token1
        };

        let result = store.create_token(&token2);
        assert!(matches!(result, Err(Error::TokenLookupCollision)));
    }
}
