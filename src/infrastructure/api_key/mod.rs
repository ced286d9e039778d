//! API Key infrastructure implementations
//!
//! In-memory key storage with an atomic request counter, the admin service
//! that bans keys, and the job that zeroes daily counts at UTC midnight.

mod quota_reset;
mod repository;
mod service;

pub use quota_reset::{reset_quotas, spawn_quota_reset, until_next_midnight};
pub use repository::InMemoryApiKeyRepository;
pub use service::ApiKeyService;
