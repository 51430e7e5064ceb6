use serde::{Deserialize, Serialize};

use crate::prefill::PrefillReport;
use crate::types::Workspace;

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub display_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkspaceResponse {
    pub workspace: Workspace,
    pub prefill: PrefillReport,
}
