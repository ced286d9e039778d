//! Directory seed data
//!
//! The service keeps its data in memory; a JSON seed file supplies the
//! accounts, keys, projects, relations and kudos it starts with.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::account::{Account, AccountId};
use crate::domain::api_key::{validate_client_id, ApiKey, ApiKeyId, ApiKeyStatus};
use crate::domain::kudo::{Kudo, KudoRecipient};
use crate::domain::project::{Manage, ProjectId, ProjectSummary, StackEntry, Tagging};
use crate::domain::DomainError;
use crate::infrastructure::account::InMemoryAccountRepository;
use crate::infrastructure::api_key::InMemoryApiKeyRepository;
use crate::infrastructure::kudo::InMemoryKudoRepository;
use crate::infrastructure::project::InMemoryProjectRepository;

/// Errors raised while loading seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid seed data: {0}")]
    Invalid(String),
}

impl From<DomainError> for SeedError {
    fn from(e: DomainError) -> Self {
        Self::Invalid(e.to_string())
    }
}

/// An API key as written in a seed file
///
/// `daily_limit` may be left out, in which case the configured default
/// applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeySeed {
    pub id: ApiKeyId,
    pub client_id: String,
    pub account_id: AccountId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ApiKeyStatus,
    #[serde(default)]
    pub daily_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u64>,
}

impl ApiKeySeed {
    pub fn into_api_key(self, default_daily_limit: u64) -> Result<ApiKey, SeedError> {
        let id = self.id.clone();
        let key = ApiKey::new(self.id, self.client_id, self.account_id, self.name)
            .map_err(|e| SeedError::Invalid(format!("API key '{}': {}", id, e)))?
            .with_status(self.status)
            .with_daily_count(self.daily_count)
            .with_daily_limit(self.daily_limit.unwrap_or(default_daily_limit));

        Ok(match self.description {
            Some(description) => key.with_description(description),
            None => key,
        })
    }
}

/// Everything the directory starts with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub api_keys: Vec<ApiKeySeed>,
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
    #[serde(default)]
    pub manages: Vec<Manage>,
    #[serde(default)]
    pub taggings: Vec<Tagging>,
    #[serde(default)]
    pub stack_entries: Vec<StackEntry>,
    #[serde(default)]
    pub kudos: Vec<Kudo>,
}

/// Repositories populated from a seed
#[derive(Debug, Clone)]
pub struct SeededRepositories {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub api_keys: Arc<InMemoryApiKeyRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub kudos: Arc<InMemoryKudoRepository>,
}

/// Short description of a seed for logs and the `check-seed` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub accounts: usize,
    pub api_keys: usize,
    pub projects: usize,
    pub manages: usize,
    pub taggings: usize,
    pub stack_entries: usize,
    pub kudos: usize,
}

impl DirectorySeed {
    /// Load and validate a seed file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading directory seed");

        let content = std::fs::read_to_string(path)?;
        let seed = Self::from_json(&content)?;

        debug!(summary = ?seed.summary(), "Directory seed loaded");
        Ok(seed)
    }

    /// Parse and validate seed JSON
    pub fn from_json(content: &str) -> Result<Self, SeedError> {
        let seed: DirectorySeed = serde_json::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            accounts: self.accounts.len(),
            api_keys: self.api_keys.len(),
            projects: self.projects.len(),
            manages: self.manages.len(),
            taggings: self.taggings.len(),
            stack_entries: self.stack_entries.len(),
            kudos: self.kudos.len(),
        }
    }

    /// Check cross references the repositories cannot see on their own
    pub fn validate(&self) -> Result<(), SeedError> {
        let accounts: HashSet<AccountId> = self.accounts.iter().map(Account::id).collect();
        let projects: HashSet<ProjectId> = self.projects.iter().map(ProjectSummary::id).collect();

        let account_exists = |id: AccountId, what: &str| {
            if accounts.contains(&id) {
                Ok(())
            } else {
                Err(SeedError::Invalid(format!(
                    "{} refers to unknown account '{}'",
                    what, id
                )))
            }
        };

        for key in &self.api_keys {
            validate_client_id(&key.client_id)
                .map_err(|e| SeedError::Invalid(format!("API key '{}': {}", key.id, e)))?;
            account_exists(key.account_id, &format!("API key '{}'", key.id))?;
        }

        for manage in &self.manages {
            account_exists(manage.account_id, "Management relation")?;
        }

        for kudo in &self.kudos {
            let what = format!("Kudo '{}'", kudo.id());
            account_exists(kudo.sender_id(), &what)?;

            match kudo.recipient() {
                KudoRecipient::Account { account_id } => account_exists(*account_id, &what)?,
                KudoRecipient::Contribution { project_id, .. } => {
                    if !projects.contains(project_id) {
                        return Err(SeedError::Invalid(format!(
                            "{} refers to unknown project '{}'",
                            what, project_id
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Build the in-memory repositories
    pub fn into_repositories(
        self,
        default_daily_limit: u64,
    ) -> Result<SeededRepositories, SeedError> {
        let summary = self.summary();
        let api_keys = self
            .api_keys
            .into_iter()
            .map(|k| k.into_api_key(default_daily_limit))
            .collect::<Result<Vec<_>, _>>()?;

        let repositories = SeededRepositories {
            accounts: Arc::new(InMemoryAccountRepository::with_accounts(self.accounts)?),
            api_keys: Arc::new(InMemoryApiKeyRepository::with_keys(api_keys)?),
            projects: Arc::new(InMemoryProjectRepository::from_records(
                self.projects,
                self.manages,
                self.taggings,
                self.stack_entries,
            )?),
            kudos: Arc::new(InMemoryKudoRepository::with_kudos(self.kudos)?),
        };

        info!(
            accounts = summary.accounts,
            api_keys = summary.api_keys,
            projects = summary.projects,
            kudos = summary.kudos,
            "Directory repositories ready"
        );

        Ok(repositories)
    }
}
