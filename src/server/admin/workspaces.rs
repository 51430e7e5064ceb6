use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::{CreateWorkspaceRequest, CreateWorkspaceResponse, PaginationParams};
use crate::server::response::{
    ApiError, ApiResponse, DEFAULT_PAGE_SIZE, PaginatedResponse, StoreOptionExt, StoreResultExt,
    paginate,
};

pub async fn create_workspace(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateWorkspaceRequest>,
) -> impl IntoResponse {
    let (workspace, prefill) = state
        .provisioner
        .create_workspace(&req.display_name)
        .map_err(ApiError::from)?;

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateWorkspaceResponse {
            workspace,
            prefill,
        })),
    ))
}

pub async fn list_workspaces(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let cursor = params.cursor.as_deref().unwrap_or("");

    let workspaces = state
        .store
        .list_workspaces(cursor, DEFAULT_PAGE_SIZE + 1)
        .api_err("Failed to list workspaces")?;

    let (workspaces, next_cursor, has_more) =
        paginate(workspaces, DEFAULT_PAGE_SIZE as usize, |ws| ws.id.clone());

    Ok::<_, ApiError>(Json(PaginatedResponse::new(
        workspaces,
        next_cursor,
        has_more,
    )))
}

pub async fn get_workspace(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let workspace = state
        .store
        .get_workspace(&id)
        .api_err("Failed to get workspace")?
        .or_not_found("Workspace not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(workspace)))
}

pub async fn prefill_workspace(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let report = state.provisioner.prefill(&id).map_err(ApiError::from)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(report)))
}

pub async fn list_workspace_views(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let workspace = state
        .store
        .get_workspace(&id)
        .api_err("Failed to get workspace")?
        .or_not_found("Workspace not found")?;

    let views = state
        .store
        .list_views(&workspace.schema_name)
        .map_err(ApiError::from)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(views)))
}
