//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::DomainError;

/// In-memory implementation of AccountRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given accounts
    ///
    /// Duplicate ids or logins (compared case-insensitively) are rejected.
    pub fn with_accounts(accounts: Vec<Account>) -> Result<Self, DomainError> {
        let mut map = HashMap::with_capacity(accounts.len());

        for account in accounts {
            if map.contains_key(&account.id()) {
                return Err(DomainError::conflict(format!(
                    "Account '{}' is defined twice",
                    account.id()
                )));
            }

            let login = account.login().to_lowercase();
            if map
                .values()
                .any(|a: &Account| a.login().to_lowercase() == login)
            {
                return Err(DomainError::conflict(format!(
                    "Account login '{}' is defined twice",
                    account.login()
                )));
            }

            map.insert(account.id(), account);
        }

        Ok(Self {
            accounts: Arc::new(RwLock::new(map)),
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let login = login.to_lowercase();
        let accounts = self.accounts.read().await;

        Ok(accounts
            .values()
            .find(|a| a.login().to_lowercase() == login)
            .cloned())
    }
}
