//! API Key repository and request counter traits

use async_trait::async_trait;

use super::entity::{ApiKey, ApiKeyId, ApiKeyStatus};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for API key storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Get an API key by its ID
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Get an API key by the client token callers present
    async fn get_by_client_id(&self, client_id: &str) -> Result<Option<ApiKey>, DomainError>;

    /// Create a new API key
    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError>;

    /// Update an existing API key
    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError>;

    /// List all API keys (optionally filtered by status)
    async fn list(&self, status: Option<ApiKeyStatus>) -> Result<Vec<ApiKey>, DomainError>;

    /// Zero every key's daily count, returning how many keys were touched
    async fn reset_daily_counts(&self) -> Result<usize, DomainError>;
}

/// Atomically incrementing per-key request counter
///
/// The access gate reads a snapshot of `daily_count` from the repository and
/// asks this collaborator to bump it; consistency of the count is owned here.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Count one request for the key and return the new daily count
    async fn increment(&self, id: &ApiKeyId) -> Result<u64, DomainError>;
}
