//! Kudo repository trait

use async_trait::async_trait;

use super::entity::{Kudo, KudoId, KudoRecipient};
use crate::domain::account::AccountId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for kudo storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KudoRepository: Send + Sync {
    /// Get a kudo by ID
    async fn get(&self, id: KudoId) -> Result<Option<Kudo>, DomainError>;

    /// Kudos addressed to the account
    async fn received_by(&self, account: AccountId) -> Result<Vec<Kudo>, DomainError>;

    /// Kudos the account has given
    async fn sent_by(&self, account: AccountId) -> Result<Vec<Kudo>, DomainError>;

    /// Store a new kudo, assigning its ID
    async fn create(
        &self,
        sender: AccountId,
        recipient: KudoRecipient,
        message: Option<String>,
    ) -> Result<Kudo, DomainError>;

    /// Delete a kudo, returning whether it existed
    async fn delete(&self, id: KudoId) -> Result<bool, DomainError>;
}
