pub mod catalog;
pub mod rows;
mod schema;
pub mod schema_name;
mod sqlite;

pub use schema_name::schema_name_for;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::prefill::PrefillReport;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Workspace operations
    fn create_workspace(&self, ws: &Workspace) -> Result<()>;
    fn get_workspace(&self, id: &str) -> Result<Option<Workspace>>;
    fn get_template_workspace(&self) -> Result<Option<Workspace>>;
    fn list_workspaces(&self, cursor: &str, limit: i32) -> Result<Vec<Workspace>>;
    fn delete_workspace(&self, id: &str) -> Result<bool>;

    // Data schema operations (one attached database per workspace)
    fn create_workspace_schema(&self, schema_name: &str) -> Result<()>;
    fn drop_workspace_schema(&self, schema_name: &str) -> Result<()>;
    fn list_views(&self, schema_name: &str) -> Result<Vec<ViewWithChildren>>;
    fn create_view(&self, schema_name: &str, view: &ViewWithChildren) -> Result<()>;
    fn list_favorite_folders(&self, schema_name: &str) -> Result<Vec<FavoriteFolder>>;
    fn create_favorite_folder(&self, schema_name: &str, folder: &FavoriteFolder) -> Result<()>;
    fn list_favorites(&self, schema_name: &str) -> Result<Vec<Favorite>>;
    fn create_favorite(&self, schema_name: &str, favorite: &Favorite) -> Result<()>;
    fn list_webhooks(&self, schema_name: &str) -> Result<Vec<Webhook>>;
    fn create_webhook(&self, schema_name: &str, webhook: &Webhook) -> Result<()>;

    // Metadata operations
    fn create_object_metadata(&self, objects: &[ObjectMetadata]) -> Result<()>;
    fn list_object_metadata(&self, workspace_id: &str) -> Result<Vec<ObjectMetadata>>;

    // Feature flag operations
    fn upsert_feature_flag(&self, flag: &FeatureFlag) -> Result<()>;
    fn list_feature_flags(&self, workspace_id: &str) -> Result<Vec<FeatureFlag>>;

    /// Copies the template's reference data into `target` atomically.
    fn prefill_workspace(&self, template: &Workspace, target: &Workspace)
    -> Result<PrefillReport>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>>;
    fn update_token_last_used(&self, id: &str) -> Result<()>;

    // Admin token check
    fn has_admin_token(&self) -> Result<bool>;
}
