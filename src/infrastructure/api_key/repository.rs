//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyStatus, RequestCounter};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct KeyStore {
    keys: HashMap<String, ApiKey>,
    /// client token -> key id
    client_index: HashMap<String, String>,
}

/// In-memory implementation of ApiKeyRepository and RequestCounter
///
/// Both maps live behind one lock so a counter bump and a client lookup
/// always see the same key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApiKeyRepository {
    store: Arc<RwLock<KeyStore>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial keys
    ///
    /// Keys with a duplicate id or client token are rejected.
    pub fn with_keys(keys: Vec<ApiKey>) -> Result<Self, DomainError> {
        let mut store = KeyStore::default();
        for key in keys {
            insert_key(&mut store, key)?;
        }

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }
}

fn insert_key(store: &mut KeyStore, api_key: ApiKey) -> Result<(), DomainError> {
    let id = api_key.id().as_str().to_string();
    let client_id = api_key.client_id().to_string();

    if store.keys.contains_key(&id) {
        return Err(DomainError::conflict(format!(
            "API key with ID '{}' already exists",
            id
        )));
    }

    if store.client_index.contains_key(&client_id) {
        return Err(DomainError::conflict(format!(
            "API key with client ID '{}' already exists",
            client_id
        )));
    }

    store.client_index.insert(client_id, id.clone());
    store.keys.insert(id, api_key);
    Ok(())
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let store = self.store.read().await;
        Ok(store.keys.get(id.as_str()).cloned())
    }

    async fn get_by_client_id(&self, client_id: &str) -> Result<Option<ApiKey>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .client_index
            .get(client_id)
            .and_then(|id| store.keys.get(id))
            .cloned())
    }

    async fn create(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut store = self.store.write().await;
        insert_key(&mut store, api_key.clone())?;
        Ok(api_key)
    }

    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
        let mut store = self.store.write().await;
        let id = api_key.id().as_str().to_string();

        let Some(existing) = store.keys.get(&id) else {
            return Err(DomainError::not_found(format!("API key '{}' not found", id)));
        };

        if existing.client_id() != api_key.client_id() {
            return Err(DomainError::validation(format!(
                "Client ID of API key '{}' cannot change",
                id
            )));
        }

        store.keys.insert(id, api_key.clone());
        Ok(api_key.clone())
    }

    async fn list(&self, status: Option<ApiKeyStatus>) -> Result<Vec<ApiKey>, DomainError> {
        let store = self.store.read().await;

        let mut result: Vec<ApiKey> = store
            .keys
            .values()
            .filter(|k| status.is_none_or(|s| k.status() == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));

        Ok(result)
    }

    async fn reset_daily_counts(&self) -> Result<usize, DomainError> {
        let mut store = self.store.write().await;

        for key in store.keys.values_mut() {
            key.reset_daily_count();
        }

        Ok(store.keys.len())
    }
}

#[async_trait]
impl RequestCounter for InMemoryApiKeyRepository {
    async fn increment(&self, id: &ApiKeyId) -> Result<u64, DomainError> {
        let mut store = self.store.write().await;

        match store.keys.get_mut(id.as_str()) {
            Some(key) => Ok(key.record_request()),
            None => Err(DomainError::not_found(format!("API key '{}' not found", id))),
        }
    }
}
