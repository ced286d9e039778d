//! Access gate extractors
//!
//! Handlers declare what they need by taking [`AuthorizedRead`],
//! [`AuthorizedMutation`] or [`AuthorizedAdmin`]; the extractor builds the
//! request context, asks the gate, and turns a denial into a 401.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderMap, HeaderName},
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::access::{
    AccessDecision, AccessGrant, ActionKind, DenialReason, RequestContext, ResponseFormat,
};
use crate::domain::account::AccountId;

/// Query parameters the gate cares about; everything else is ignored
#[derive(Debug, Default, Deserialize)]
struct AccessParams {
    format: Option<String>,
    api_key: Option<String>,
}

/// A read the gate has let through
#[derive(Debug, Clone)]
pub struct AuthorizedRead {
    pub grant: AccessGrant,
    pub format: ResponseFormat,
}

/// A mutation by a signed-in account
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedMutation(pub AccountId);

/// An admin-only mutation by a signed-in administrator
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedAdmin(pub AccountId);

impl FromRequestParts<AppState> for AuthorizedRead {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = request_context(parts, &state.session_header, ActionKind::Read);
        let format = ctx.format();

        let grant = authorize(state, &ctx).await?;
        Ok(AuthorizedRead { grant, format })
    }
}

impl FromRequestParts<AppState> for AuthorizedMutation {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = request_context(parts, &state.session_header, ActionKind::Mutation);

        authorize(state, &ctx)
            .await?
            .principal()
            .map(AuthorizedMutation)
            .ok_or_else(|| denial(DenialReason::SessionRequired))
    }
}

impl FromRequestParts<AppState> for AuthorizedAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = request_context(parts, &state.session_header, ActionKind::AdminMutation);

        match authorize(state, &ctx).await? {
            AccessGrant::Admin(id) => Ok(AuthorizedAdmin(id)),
            _ => Err(denial(DenialReason::AdminRequired)),
        }
    }
}

async fn authorize(state: &AppState, ctx: &RequestContext) -> Result<AccessGrant, ApiError> {
    match state.access_gate.authorize(ctx).await? {
        AccessDecision::Allowed(grant) => Ok(grant),
        AccessDecision::Denied(reason) => Err(denial(reason)),
    }
}

fn denial(reason: DenialReason) -> ApiError {
    ApiError::unauthorized(reason.message()).with_code(reason.code())
}

/// Build the gate's view of a request
///
/// `format` and `api_key` come from the query string. When the query
/// carries no key, `Authorization: Bearer` and then `X-API-Key` are tried.
/// The session principal is read from the trusted `session_header`.
pub fn request_context(
    parts: &Parts,
    session_header: &HeaderName,
    action: ActionKind,
) -> RequestContext {
    let params = Query::<AccessParams>::try_from_uri(&parts.uri)
        .map(|Query(params)| params)
        .unwrap_or_default();

    let format = ResponseFormat::parse(params.format.as_deref());
    let api_key = params
        .api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| api_key_from_headers(&parts.headers));
    let session = session_principal(&parts.headers, session_header);

    debug!(
        format = %format,
        has_key = api_key.is_some(),
        session = ?session,
        "Built access context"
    );

    RequestContext::new(format, action)
        .with_session(session)
        .with_api_key(api_key)
}

fn api_key_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer
        .or_else(|| {
            headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|t| !t.is_empty())
        })
        .map(str::to_string)
}

fn session_principal(headers: &HeaderMap, session_header: &HeaderName) -> Option<AccountId> {
    headers
        .get(session_header)
        .and_then(|v| v.to_str().ok())
        .and_then(AccountId::parse)
}
