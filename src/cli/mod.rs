mod admin;
mod commands;
mod workspace;

pub use admin::run_init;
pub use commands::{AdminCommands, WorkspaceCommands};
pub use workspace::{run_workspace_create, run_workspace_list, run_workspace_prefill};

use std::path::Path;
use std::sync::Arc;

use crate::config::ProvisionConfig;
use crate::provision::Provisioner;
use crate::store::SqliteStore;

/// Initialize store from data directory, checking it exists
pub fn init_store(data_dir: &str) -> anyhow::Result<SqliteStore> {
    let data_path: std::path::PathBuf = data_dir.into();
    let db_path = data_path.join("propcrm.db");

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'propcrm admin init' first.",
            db_path.display()
        );
    }

    SqliteStore::new(&db_path).map_err(Into::into)
}

/// Opens the store and loads the provisioning config written by `admin init`.
pub fn init_provisioner(data_dir: &str) -> anyhow::Result<Provisioner> {
    let store = init_store(data_dir)?;
    let config = ProvisionConfig::load(Path::new(data_dir))?;
    Ok(Provisioner::new(Arc::new(store), config))
}
