//! Kudo endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::middleware::{AuthorizedMutation, AuthorizedRead};
use crate::api::render;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, KudoResponse};
use crate::domain::kudo::{KudoId, NewKudo};

/// GET /accounts/{account}/kudos
pub async fn received_kudos(
    State(state): State<AppState>,
    read: AuthorizedRead,
    Path(account): Path<String>,
) -> Result<Response, ApiError> {
    debug!(account = %account, format = %read.format, "Listing received kudos");

    let listing = state.kudo_service.received(&account).await?;
    let title = format!("Kudos received by {}", listing.account.display_name());

    render::kudos(read.format, &listing, &title)
}

/// GET /accounts/{account}/kudos/sent
pub async fn sent_kudos(
    State(state): State<AppState>,
    read: AuthorizedRead,
    Path(account): Path<String>,
) -> Result<Response, ApiError> {
    debug!(account = %account, format = %read.format, "Listing sent kudos");

    let listing = state.kudo_service.sent(&account).await?;
    let title = format!("Kudos sent by {}", listing.account.display_name());

    render::kudos(read.format, &listing, &title)
}

/// POST /kudos
pub async fn give_kudo(
    State(state): State<AppState>,
    AuthorizedMutation(sender): AuthorizedMutation,
    Json(request): Json<NewKudo>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(sender = %sender, "Giving kudo");

    let kudo = state.kudo_service.give(sender, request).await?;

    Ok((StatusCode::CREATED, Json(KudoResponse::from(&kudo))))
}

/// DELETE /kudos/{id}
pub async fn rescind_kudo(
    State(state): State<AppState>,
    AuthorizedMutation(actor): AuthorizedMutation,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(actor = %actor, kudo = %id, "Rescinding kudo");

    let kudo_id = id
        .trim()
        .parse::<u64>()
        .map(KudoId::new)
        .map_err(|_| ApiError::not_found(format!("Kudo '{}' not found", id)))?;

    state.kudo_service.rescind(actor, kudo_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
