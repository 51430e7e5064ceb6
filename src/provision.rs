//! Workspace creation: catalog row, data schema, standard metadata, prefill.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::ProvisionConfig;
use crate::error::{Error, Result};
use crate::metadata;
use crate::prefill::PrefillReport;
use crate::store::{Store, schema_name_for};
use crate::types::Workspace;

const MAX_DISPLAY_NAME_LEN: usize = 64;

pub fn validate_display_name(name: &str) -> Result<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::BadRequest("Name cannot be empty".to_string()));
    }

    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(Error::BadRequest(format!(
            "Name cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(Error::BadRequest(
            "Name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

fn new_workspace(display_name: &str, is_template: bool) -> Result<Workspace> {
    validate_display_name(display_name)?;

    let id = Uuid::new_v4().to_string();
    Ok(Workspace {
        schema_name: schema_name_for(&id)?,
        id,
        display_name: display_name.trim().to_string(),
        is_template,
        prefilled_at: None,
        created_at: Utc::now(),
    })
}

pub struct Provisioner {
    store: Arc<dyn Store>,
    config: ProvisionConfig,
}

impl Provisioner {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ProvisionConfig) -> Self {
        Self { store, config }
    }

    /// Creates the template workspace with the standard metadata and the
    /// default views, favorites and feature flags.
    pub fn init_template(store: &dyn Store, display_name: &str) -> Result<Workspace> {
        if store.get_template_workspace()?.is_some() {
            return Err(Error::AlreadyExists);
        }

        let ws = new_workspace(display_name, true)?;
        store.create_workspace(&ws)?;

        if let Err(e) = seed_template(store, &ws) {
            discard_workspace(store, &ws);
            return Err(e);
        }

        tracing::info!(workspace_id = %ws.id, "template workspace created");
        Ok(ws)
    }

    /// Returns the configured template workspace.
    pub fn template(&self) -> Result<Workspace> {
        let id = &self.config.template_workspace_id;
        let ws = self
            .store
            .get_workspace(id)?
            .ok_or_else(|| Error::Config(format!("template workspace {id} not found")))?;

        if !ws.is_template {
            return Err(Error::Config(format!(
                "workspace {id} is not the template workspace"
            )));
        }
        Ok(ws)
    }

    /// Provisions a new workspace and prefills it from the template.
    ///
    /// On failure the partially created workspace is removed again, so the
    /// caller sees either a fully provisioned workspace or none.
    pub fn create_workspace(&self, display_name: &str) -> Result<(Workspace, PrefillReport)> {
        let template = self.template()?;
        let mut ws = new_workspace(display_name, false)?;

        self.store.create_workspace(&ws)?;

        let report = match self.setup_workspace(&template, &ws) {
            Ok(report) => report,
            Err(e) => {
                if matches!(e, Error::MissingStandardId { .. }) {
                    tracing::error!(workspace_id = %ws.id, "metadata seed is broken: {e}");
                }
                discard_workspace(self.store.as_ref(), &ws);
                return Err(e);
            }
        };

        ws.prefilled_at = Some(report.prefilled_at);
        tracing::info!(workspace_id = %ws.id, schema = %ws.schema_name, "workspace created");
        Ok((ws, report))
    }

    /// Runs the prefill for an existing workspace.
    pub fn prefill(&self, workspace_id: &str) -> Result<PrefillReport> {
        let template = self.template()?;
        let ws = self
            .store
            .get_workspace(workspace_id)?
            .ok_or(Error::NotFound)?;

        self.store.prefill_workspace(&template, &ws)
    }

    fn setup_workspace(&self, template: &Workspace, ws: &Workspace) -> Result<PrefillReport> {
        self.store.create_workspace_schema(&ws.schema_name)?;
        self.store
            .create_object_metadata(&metadata::standard_metadata(&ws.id))?;
        self.store.prefill_workspace(template, ws)
    }
}

fn seed_template(store: &dyn Store, ws: &Workspace) -> Result<()> {
    store.create_workspace_schema(&ws.schema_name)?;

    let objects = metadata::standard_metadata(&ws.id);
    store.create_object_metadata(&objects)?;

    let views = metadata::default_views(&objects);
    for view in &views {
        store.create_view(&ws.schema_name, view)?;
    }

    let (folder, favorites) = metadata::default_favorites(&views, &objects);
    store.create_favorite_folder(&ws.schema_name, &folder)?;
    for favorite in &favorites {
        store.create_favorite(&ws.schema_name, favorite)?;
    }

    for flag in metadata::default_feature_flags(&ws.id) {
        store.upsert_feature_flag(&flag)?;
    }

    Ok(())
}

/// Best-effort removal of a workspace whose setup failed.
fn discard_workspace(store: &dyn Store, ws: &Workspace) {
    if let Err(e) = store.drop_workspace_schema(&ws.schema_name) {
        tracing::warn!("Failed to drop schema {}: {e}", ws.schema_name);
    }
    if let Err(e) = store.delete_workspace(&ws.id) {
        tracing::warn!("Failed to delete workspace {}: {e}", ws.id);
    }
}
