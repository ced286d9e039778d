//! Kudo wire types

use serde::Serialize;

use crate::domain::account::Account;
use crate::domain::kudo::{Kudo, KudoRecipient};
use crate::infrastructure::kudo::KudoListing;

/// A kudo as it appears in responses
///
/// The recipient is flattened so the same shape works for JSON and XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KudoResponse {
    pub id: u64,
    pub sender_id: u64,
    pub recipient_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
}

impl From<&Kudo> for KudoResponse {
    fn from(kudo: &Kudo) -> Self {
        let (recipient_type, recipient_id, project_id, contributor_name) = match kudo.recipient() {
            KudoRecipient::Account { account_id } => {
                ("account", Some(account_id.value()), None, None)
            }
            KudoRecipient::Contribution { project_id, name } => (
                "contribution",
                None,
                Some(project_id.value()),
                Some(name.clone()),
            ),
        };

        Self {
            id: kudo.id().value(),
            sender_id: kudo.sender_id().value(),
            recipient_type,
            recipient_id,
            project_id,
            contributor_name,
            message: kudo.message().map(str::to_string),
            created_at: kudo.created_at().to_rfc3339(),
        }
    }
}

impl KudoResponse {
    /// One-line description used as an Atom entry title
    pub fn title(&self) -> String {
        match (&self.contributor_name, self.recipient_id) {
            (Some(name), _) => format!("Kudo from account {} to {}", self.sender_id, name),
            (None, Some(recipient)) => {
                format!("Kudo from account {} to account {}", self.sender_id, recipient)
            }
            (None, None) => format!("Kudo from account {}", self.sender_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponse {
    pub id: u64,
    pub login: String,
    pub name: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().value(),
            login: account.login().to_string(),
            name: account.display_name().to_string(),
        }
    }
}

/// Body of the kudo listing endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KudoListResponse {
    pub status: &'static str,
    pub items_returned: usize,
    pub account: AccountResponse,
    pub kudos: Vec<KudoResponse>,
}

impl From<&KudoListing> for KudoListResponse {
    fn from(listing: &KudoListing) -> Self {
        Self {
            status: "success",
            items_returned: listing.kudos.len(),
            account: AccountResponse::from(&listing.account),
            kudos: listing.kudos.iter().map(KudoResponse::from).collect(),
        }
    }
}
