//! Account repository trait

use async_trait::async_trait;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

/// Read access to accounts
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug {
    /// Get an account by its numeric ID
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Get an account by login (case-insensitive)
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError>;

    /// Resolve a route parameter that is either a numeric ID or a login
    async fn resolve(&self, param: &str) -> Result<Option<Account>, DomainError> {
        match AccountId::parse(param) {
            Some(id) => self.get(id).await,
            None => self.find_by_login(param.trim()).await,
        }
    }
}
