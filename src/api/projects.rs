//! Project listing endpoint handlers

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use tracing::debug;

use crate::api::middleware::AuthorizedRead;
use crate::api::render;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ProjectsQuery};
use crate::domain::project::ProjectId;
use crate::domain::DomainError;

/// GET /projects
pub async fn list_projects(
    State(state): State<AppState>,
    read: AuthorizedRead,
    Query(query): Query<ProjectsQuery>,
) -> Result<Response, ApiError> {
    debug!(format = %read.format, grant = ?read.grant, "Listing projects");

    let has_ids = query.has_ids();
    let page = state
        .project_ranker
        .list(&query.into_request())
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } if has_ids => ApiError::from(e)
                .with_param("ids")
                .with_code("all_ids_unresolved"),
            other => ApiError::from(other),
        })?;

    render::projects(read.format, &page)
}

/// GET /accounts/{account}/projects
pub async fn list_account_projects(
    State(state): State<AppState>,
    read: AuthorizedRead,
    Path(account): Path<String>,
    Query(query): Query<ProjectsQuery>,
) -> Result<Response, ApiError> {
    debug!(account = %account, format = %read.format, "Listing managed projects");

    let page = state
        .project_ranker
        .list(&query.into_managed_by(account))
        .await?;

    render::projects(read.format, &page)
}

/// GET /projects/{id}/similar
pub async fn similar_projects(
    State(state): State<AppState>,
    read: AuthorizedRead,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    debug!(project = %id, format = %read.format, "Finding similar projects");

    let project_id = id
        .trim()
        .parse::<u64>()
        .map(ProjectId::new)
        .map_err(|_| ApiError::not_found(format!("Project '{}' not found", id)))?;

    let similar = state.similar_projects.similar(project_id).await?;

    render::similar_projects(read.format, &similar)
}
