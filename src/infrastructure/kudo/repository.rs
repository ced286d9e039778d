//! In-memory kudo repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::AccountId;
use crate::domain::kudo::{Kudo, KudoId, KudoRecipient, KudoRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct KudoStore {
    kudos: BTreeMap<KudoId, Kudo>,
    last_id: u64,
}

/// In-memory implementation of KudoRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryKudoRepository {
    store: Arc<RwLock<KudoStore>>,
}

impl InMemoryKudoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding existing kudos
    ///
    /// New kudos get ids above the highest existing one.
    pub fn with_kudos(kudos: Vec<Kudo>) -> Result<Self, DomainError> {
        let mut store = KudoStore::default();

        for kudo in kudos {
            let id = kudo.id();
            store.last_id = store.last_id.max(id.value());
            if store.kudos.insert(id, kudo).is_some() {
                return Err(DomainError::conflict(format!(
                    "Kudo '{}' is defined twice",
                    id
                )));
            }
        }

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }
}

#[async_trait]
impl KudoRepository for InMemoryKudoRepository {
    async fn get(&self, id: KudoId) -> Result<Option<Kudo>, DomainError> {
        Ok(self.store.read().await.kudos.get(&id).cloned())
    }

    async fn received_by(&self, account: AccountId) -> Result<Vec<Kudo>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .kudos
            .values()
            .filter(|k| k.recipient().account_id() == Some(account))
            .cloned()
            .collect())
    }

    async fn sent_by(&self, account: AccountId) -> Result<Vec<Kudo>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .kudos
            .values()
            .filter(|k| k.sender_id() == account)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        sender: AccountId,
        recipient: KudoRecipient,
        message: Option<String>,
    ) -> Result<Kudo, DomainError> {
        let mut store = self.store.write().await;

        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::storage("Kudo id space exhausted"))?;
        store.last_id = next;

        let kudo = Kudo::new(KudoId::new(next), sender, recipient).with_message(message);
        store.kudos.insert(kudo.id(), kudo.clone());

        Ok(kudo)
    }

    async fn delete(&self, id: KudoId) -> Result<bool, DomainError> {
        Ok(self.store.write().await.kudos.remove(&id).is_some())
    }
}
