#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use propcrm::auth::{TokenGenerator, issue_admin_token};
use propcrm::config::ProvisionConfig;
use propcrm::metadata::standard_metadata;
use propcrm::provision::Provisioner;
use propcrm::server::{AppState, create_router};
use propcrm::store::{SqliteStore, Store, schema_name_for};
use propcrm::types::Workspace;
use rusqlite::{Connection, params};
use tempfile::TempDir;
use uuid::Uuid;

/// An initialized data directory: catalog, seeded template and admin token.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Arc<dyn Store>,
    pub template: Workspace,
    pub admin_token: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("propcrm.db")).expect("open store");
        store.initialize().expect("initialize store");

        let template = Provisioner::init_template(&store, "Template").expect("init template");

        let (token, admin_token) =
            issue_admin_token(&TokenGenerator::new()).expect("issue admin token");
        store.create_token(&token).expect("store admin token");

        Self {
            temp_dir,
            store: Arc::new(store),
            template,
            admin_token,
        }
    }

    pub fn provisioner(&self) -> Provisioner {
        Provisioner::new(
            Arc::clone(&self.store),
            ProvisionConfig {
                template_workspace_id: self.template.id.clone(),
            },
        )
    }

    pub fn router(&self) -> Router {
        create_router(Arc::new(AppState {
            store: Arc::clone(&self.store),
            provisioner: self.provisioner(),
        }))
    }
}

/// Creates a workspace with its schema but no metadata.
pub fn bare_workspace(store: &dyn Store, name: &str, is_template: bool) -> Workspace {
    let id = Uuid::new_v4().to_string();
    let ws = Workspace {
        schema_name: schema_name_for(&id).expect("schema name"),
        id,
        display_name: name.to_string(),
        is_template,
        prefilled_at: None,
        created_at: Utc::now(),
    };
    store.create_workspace(&ws).expect("create workspace");
    store
        .create_workspace_schema(&ws.schema_name)
        .expect("create workspace schema");
    ws
}

/// Creates a workspace carrying the standard metadata, ready to be prefilled.
pub fn standard_workspace(store: &dyn Store, name: &str) -> Workspace {
    let ws = bare_workspace(store, name, false);
    store
        .create_object_metadata(&standard_metadata(&ws.id))
        .expect("create standard metadata");
    ws
}

/// Path of a workspace's data database under `data_dir`.
pub fn workspace_db(data_dir: &Path, ws: &Workspace) -> PathBuf {
    data_dir
        .join("workspaces")
        .join(format!("{}.db", ws.schema_name))
}

/// Marks one row as deleted the way the application does, leaving it in place.
pub fn soft_delete(db: &Path, table: &str, id: &str) {
    let conn = Connection::open(db).expect("open database");
    let rows = conn
        .execute(
            &format!("UPDATE {table} SET deleted_at = datetime('now') WHERE id = ?1"),
            params![id],
        )
        .expect("soft delete");
    assert_eq!(rows, 1, "no {table} row {id}");
}
