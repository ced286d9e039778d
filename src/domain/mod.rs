//! Domain layer - Core business logic and entities

pub mod access;
pub mod account;
pub mod api_key;
pub mod error;
pub mod kudo;
pub mod project;

pub use access::{
    AccessDecision, AccessGrant, ActionKind, DenialReason, RequestContext, ResponseFormat,
};
pub use account::{Account, AccountId, AccountRepository};
pub use api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyStatus, RequestCounter};
pub use error::DomainError;
pub use kudo::{Kudo, KudoId, KudoRecipient, KudoRepository, NewKudo};
pub use project::{
    CandidateSource, Page, PageLimits, PageRequest, ProjectId, ProjectRepository, ProjectSummary,
    SortKey,
};
