//! Access decisions
//!
//! The decision is split in two pure steps so the gate service only has to
//! fetch the key between them:
//! 1. [`requirement`] looks at the request alone and either settles the
//!    outcome or names the key token or account that must be checked;
//! 2. [`evaluate_key`] applies the status and quota rules to the stored key,
//!    and [`evaluate_admin`] checks the signed-in account's admin flag.

use serde::Serialize;

use super::context::RequestContext;
use crate::domain::account::{Account, AccountId};
use crate::domain::api_key::{validate_client_id, ApiKey, ApiKeyId};

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Machine format requested with neither session nor key
    MissingKey,
    /// Key token is malformed or matches no key
    InvalidKey,
    /// Key exists but has been banned
    KeyDisabled,
    /// Key has used up today's allowance
    QuotaExceeded,
    /// Mutation attempted without a signed-in account
    SessionRequired,
    /// Admin-only action attempted by an ordinary account
    AdminRequired,
}

impl DenialReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingKey => "missing_key",
            Self::InvalidKey => "invalid_key",
            Self::KeyDisabled => "key_disabled",
            Self::QuotaExceeded => "quota_exceeded",
            Self::SessionRequired => "session_required",
            Self::AdminRequired => "admin_required",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingKey => "An API key is required for this format",
            Self::InvalidKey => "The API key is not recognised",
            Self::KeyDisabled => "The API key has been disabled",
            Self::QuotaExceeded => "The API key has exceeded its daily request limit",
            Self::SessionRequired => "You must be signed in to do that",
            Self::AdminRequired => "Only administrators may do that",
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What an allowed request was allowed on the strength of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGrant {
    /// Public HTML read, nothing to check
    Public,
    /// Signed-in account
    Session(AccountId),
    /// Signed-in administrator, confirmed against the account store
    Admin(AccountId),
    /// API key; usage has been counted
    ApiKey(ApiKeyId),
}

impl AccessGrant {
    /// The signed-in account, if the grant came from a session
    pub fn principal(&self) -> Option<AccountId> {
        match self {
            Self::Session(id) | Self::Admin(id) => Some(*id),
            _ => None,
        }
    }
}

/// Outcome of the access gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed(AccessGrant),
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// Metric/log label for the outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Allowed(_) => "allowed",
            Self::Denied(reason) => reason.code(),
        }
    }
}

/// First step of a decision, computed from the request alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Outcome is already known
    Settled(AccessDecision),
    /// Look up this client token and pass the result to [`evaluate_key`]
    CheckKey(String),
    /// Look up this account and pass the result to [`evaluate_admin`]
    CheckAdmin(AccountId),
}

/// Decide what a request needs before any key lookup
pub fn requirement(ctx: &RequestContext) -> Requirement {
    if let Some(principal) = ctx.session_principal() {
        if ctx.action().requires_admin() {
            return Requirement::CheckAdmin(principal);
        }
        return Requirement::Settled(AccessDecision::Allowed(AccessGrant::Session(principal)));
    }

    if ctx.action().requires_session() {
        return Requirement::Settled(AccessDecision::Denied(DenialReason::SessionRequired));
    }

    if !ctx.format().requires_api_key() {
        return Requirement::Settled(AccessDecision::Allowed(AccessGrant::Public));
    }

    match ctx.api_key() {
        None => Requirement::Settled(AccessDecision::Denied(DenialReason::MissingKey)),
        Some(token) if validate_client_id(token).is_err() => {
            Requirement::Settled(AccessDecision::Denied(DenialReason::InvalidKey))
        }
        Some(token) => Requirement::CheckKey(token.to_string()),
    }
}

/// Apply status and quota rules to the key found for a token
///
/// Status is checked before quota, so a disabled key is reported as such
/// whatever its count.
pub fn evaluate_key(key: Option<&ApiKey>) -> AccessDecision {
    let Some(key) = key else {
        return AccessDecision::Denied(DenialReason::InvalidKey);
    };

    if !key.status().is_usable() {
        return AccessDecision::Denied(DenialReason::KeyDisabled);
    }

    if key.is_over_quota() {
        return AccessDecision::Denied(DenialReason::QuotaExceeded);
    }

    AccessDecision::Allowed(AccessGrant::ApiKey(key.id().clone()))
}

/// Allow an admin-only action when the signed-in account is an administrator
///
/// A session naming an account that does not exist is treated as a
/// non-admin.
pub fn evaluate_admin(account: Option<&Account>) -> AccessDecision {
    match account {
        Some(account) if account.is_admin() => {
            AccessDecision::Allowed(AccessGrant::Admin(account.id()))
        }
        _ => AccessDecision::Denied(DenialReason::AdminRequired),
    }
}
