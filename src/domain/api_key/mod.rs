//! API Key domain
//!
//! API keys grant machine-readable (XML/Atom) access to read actions and
//! carry a per-day request allowance.

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId, ApiKeyStatus, DEFAULT_DAILY_LIMIT};
pub use repository::{ApiKeyRepository, RequestCounter};
pub use validation::{validate_api_key_id, validate_client_id, ApiKeyValidationError, KeyField};

#[cfg(test)]
pub use repository::{MockApiKeyRepository, MockRequestCounter};
