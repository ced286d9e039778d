//! API key administration endpoints

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::middleware::AuthorizedAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiKeyResponse, Json};
use crate::domain::api_key::ApiKeyId;

fn parse_key_id(raw: &str) -> Result<ApiKeyId, ApiError> {
    ApiKeyId::new(raw).map_err(|_| ApiError::not_found(format!("API key '{}' not found", raw)))
}

/// POST /api_keys/{id}/disable
pub async fn disable_api_key(
    State(state): State<AppState>,
    AuthorizedAdmin(admin): AuthorizedAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(admin = %admin, api_key = %id, "Disabling API key");

    let key = state.api_key_service.disable(&parse_key_id(&id)?).await?;
    Ok(Json(ApiKeyResponse::from(&key)))
}

/// POST /api_keys/{id}/enable
pub async fn enable_api_key(
    State(state): State<AppState>,
    AuthorizedAdmin(admin): AuthorizedAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(admin = %admin, api_key = %id, "Enabling API key");

    let key = state.api_key_service.enable(&parse_key_id(&id)?).await?;
    Ok(Json(ApiKeyResponse::from(&key)))
}
