//! Kudo entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;
use crate::domain::project::ProjectId;

/// Numeric kudo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KudoId(u64);

impl KudoId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for KudoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who a kudo is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KudoRecipient {
    /// A registered account
    Account { account_id: AccountId },
    /// A named contributor to a project who may not have an account
    Contribution { project_id: ProjectId, name: String },
}

impl KudoRecipient {
    /// The receiving account, when the kudo went to one
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Account { account_id } => Some(*account_id),
            Self::Contribution { .. } => None,
        }
    }
}

/// A kudo as submitted, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewKudo {
    pub recipient: KudoRecipient,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewKudo {
    pub fn to_account(account_id: AccountId) -> Self {
        Self {
            recipient: KudoRecipient::Account { account_id },
            message: None,
        }
    }

    pub fn to_contribution(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            recipient: KudoRecipient::Contribution {
                project_id,
                name: name.into(),
            },
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A stored kudo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kudo {
    id: KudoId,
    sender_id: AccountId,
    recipient: KudoRecipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    created_at: DateTime<Utc>,
}

impl Kudo {
    pub fn new(id: KudoId, sender_id: AccountId, recipient: KudoRecipient) -> Self {
        Self {
            id,
            sender_id,
            recipient,
            message: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> KudoId {
        self.id
    }

    pub fn sender_id(&self) -> AccountId {
        self.sender_id
    }

    pub fn recipient(&self) -> &KudoRecipient {
        &self.recipient
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Only the sender or the receiving account may withdraw a kudo
    pub fn can_be_rescinded_by(&self, actor: AccountId) -> bool {
        self.sender_id == actor || self.recipient.account_id() == Some(actor)
    }

    /// Newest first, ties by id descending
    pub fn newest_first(a: &Kudo, b: &Kudo) -> std::cmp::Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn kudo_to_account(id: u64, sender: u64, recipient: u64) -> Kudo {
        Kudo::new(
            KudoId::new(id),
            AccountId::new(sender),
            KudoRecipient::Account {
                account_id: AccountId::new(recipient),
            },
        )
    }

    #[test]
    fn test_rescind_rights() {
        let kudo = kudo_to_account(1, 10, 20);
        assert!(kudo.can_be_rescinded_by(AccountId::new(10)));
        assert!(kudo.can_be_rescinded_by(AccountId::new(20)));
        assert!(!kudo.can_be_rescinded_by(AccountId::new(30)));
    }

    #[test]
    fn test_contribution_kudo_only_sender_rescinds() {
        let kudo = Kudo::new(
            KudoId::new(1),
            AccountId::new(10),
            KudoRecipient::Contribution {
                project_id: ProjectId::new(5),
                name: "Robin".to_string(),
            },
        );
        assert!(kudo.can_be_rescinded_by(AccountId::new(10)));
        assert!(!kudo.can_be_rescinded_by(AccountId::new(5)));
    }

    #[test]
    fn test_newest_first_ordering() {
        let now = Utc::now();
        let older = kudo_to_account(1, 1, 2).with_created_at(now - Duration::days(1));
        let newer = kudo_to_account(2, 1, 2).with_created_at(now);
        let same_time = kudo_to_account(3, 1, 2).with_created_at(now);

        let mut kudos = vec![older.clone(), newer.clone(), same_time.clone()];
        kudos.sort_by(Kudo::newest_first);

        let ids: Vec<u64> = kudos.iter().map(|k| k.id().value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_recipient_serde_shape() {
        let json = r#"{"type":"contribution","project_id":4,"name":"Robin"}"#;
        let recipient: KudoRecipient = serde_json::from_str(json).unwrap();
        assert_eq!(
            recipient,
            KudoRecipient::Contribution {
                project_id: ProjectId::new(4),
                name: "Robin".to_string()
            }
        );
    }
}
