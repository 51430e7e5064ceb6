use std::fs;
use std::path::PathBuf;

use anyhow::bail;

use crate::auth::{TokenGenerator, issue_admin_token};
use crate::config::{CONFIG_FILE_NAME, ProvisionConfig};
use crate::provision::Provisioner;
use crate::store::{SqliteStore, Store};

#[cfg(unix)]
fn set_restrictive_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

pub fn run_init(data_dir: String, template_name: String) -> anyhow::Result<()> {
    let data_path: PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let db_path = data_path.join("propcrm.db");
    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    let token_file = data_path.join(".admin_token");

    if store.has_admin_token()? {
        bail!(
            "Server already initialized. Admin token exists at: {}",
            token_file.display()
        );
    }

    let template = Provisioner::init_template(&store, &template_name)?;
    ProvisionConfig {
        template_workspace_id: template.id.clone(),
    }
    .save(&data_path)?;

    let generator = TokenGenerator::new();
    let (token, raw_token) = issue_admin_token(&generator)?;

    store.create_token(&token)?;
    fs::write(&token_file, &raw_token)?;

    #[cfg(unix)]
    set_restrictive_permissions(&token_file);

    println!();
    println!("========================================");
    println!("Template workspace \"{}\" ({})", template.display_name, template.id);
    println!("Config written to: {}", data_path.join(CONFIG_FILE_NAME).display());
    println!();
    println!("Admin token (save this, it won't be shown again):");
    println!();
    println!("  {raw_token}");
    println!();
    println!("Token also written to: {}", token_file.display());
    println!("========================================");
    println!();

    Ok(())
}
