//! Kudo service

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::kudo::{validate_new_kudo, Kudo, KudoId, KudoRecipient, KudoRepository, NewKudo};
use crate::domain::project::ProjectRepository;
use crate::domain::DomainError;

/// Kudos for one account, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KudoListing {
    pub account: Account,
    pub kudos: Vec<Kudo>,
}

/// Lists, gives and rescinds kudos
#[derive(Debug)]
pub struct KudoService<K, A, P>
where
    K: KudoRepository,
    A: AccountRepository,
    P: ProjectRepository,
{
    kudos: Arc<K>,
    accounts: Arc<A>,
    projects: Arc<P>,
}

impl<K, A, P> KudoService<K, A, P>
where
    K: KudoRepository,
    A: AccountRepository,
    P: ProjectRepository,
{
    pub fn new(kudos: Arc<K>, accounts: Arc<A>, projects: Arc<P>) -> Self {
        Self {
            kudos,
            accounts,
            projects,
        }
    }

    /// Kudos received by an account (id or login)
    pub async fn received(&self, account: &str) -> Result<KudoListing, DomainError> {
        let account = self.account(account).await?;
        let mut kudos = self.kudos.received_by(account.id()).await?;
        kudos.sort_by(Kudo::newest_first);

        Ok(KudoListing { account, kudos })
    }

    /// Kudos sent by an account (id or login)
    pub async fn sent(&self, account: &str) -> Result<KudoListing, DomainError> {
        let account = self.account(account).await?;
        let mut kudos = self.kudos.sent_by(account.id()).await?;
        kudos.sort_by(Kudo::newest_first);

        Ok(KudoListing { account, kudos })
    }

    /// Give a kudo on behalf of the signed-in account
    pub async fn give(&self, sender: AccountId, request: NewKudo) -> Result<Kudo, DomainError> {
        validate_new_kudo(sender, &request).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.accounts.get(sender).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                sender
            )));
        }

        match &request.recipient {
            KudoRecipient::Account { account_id } => {
                if self.accounts.get(*account_id).await?.is_none() {
                    return Err(DomainError::not_found(format!(
                        "Account '{}' not found",
                        account_id
                    )));
                }
            }
            KudoRecipient::Contribution { project_id, .. } => {
                if self.projects.get(*project_id).await?.is_none() {
                    return Err(DomainError::not_found(format!(
                        "Project '{}' not found",
                        project_id
                    )));
                }
            }
        }

        let recipient = match request.recipient {
            KudoRecipient::Contribution { project_id, name } => KudoRecipient::Contribution {
                project_id,
                name: name.trim().to_string(),
            },
            other => other,
        };
        let message = request
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let kudo = self.kudos.create(sender, recipient, message).await?;
        info!(kudo = %kudo.id(), sender = %sender, "Kudo given");

        Ok(kudo)
    }

    /// Withdraw a kudo; only its sender or receiving account may do this
    pub async fn rescind(&self, actor: AccountId, id: KudoId) -> Result<(), DomainError> {
        let kudo = self
            .kudos
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Kudo '{}' not found", id)))?;

        if !kudo.can_be_rescinded_by(actor) && !self.is_admin(actor).await? {
            return Err(DomainError::forbidden(
                "Only the sender, the recipient or an administrator may rescind a kudo",
            ));
        }

        self.kudos.delete(id).await?;
        info!(kudo = %id, actor = %actor, "Kudo rescinded");

        Ok(())
    }

    async fn is_admin(&self, id: AccountId) -> Result<bool, DomainError> {
        Ok(self
            .accounts
            .get(id)
            .await?
            .is_some_and(|account| account.is_admin()))
    }

    async fn account(&self, param: &str) -> Result<Account, DomainError> {
        self.accounts
            .resolve(param)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", param)))
    }
}
