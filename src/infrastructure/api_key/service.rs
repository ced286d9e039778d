//! API key administration

use std::sync::Arc;

use tracing::info;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::DomainError;

/// Ban and unban keys; callers must already be cleared as administrators
#[derive(Debug)]
pub struct ApiKeyService<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Ban a key; it is refused with `key_disabled` until re-enabled
    pub async fn disable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        let mut key = self.find(id).await?;
        key.disable();

        let key = self.repository.update(&key).await?;
        info!(api_key = %id, "API key disabled");
        Ok(key)
    }

    /// Lift a ban; the daily count is left as it was
    pub async fn enable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        let mut key = self.find(id).await?;
        key.enable();

        let key = self.repository.update(&key).await?;
        info!(api_key = %id, "API key enabled");
        Ok(key)
    }

    async fn find(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))
    }
}
