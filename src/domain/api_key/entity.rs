//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_api_key_id, validate_client_id, ApiKeyValidationError};
use crate::domain::account::AccountId;

/// Requests allowed per key per day unless the key says otherwise
pub const DEFAULT_DAILY_LIMIT: u64 = 1000;

/// API Key identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKeyId(String);

impl ApiKeyId {
    /// Create a new ApiKeyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ApiKeyValidationError> {
        let id = id.into();
        validate_api_key_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ApiKeyId {
    type Error = ApiKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiKeyId> for String {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    /// Key is active and can be used
    #[default]
    Active,
    /// Key has been banned and cannot be used
    Disabled,
}

impl ApiKeyStatus {
    /// Check if the key is usable
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// API Key entity
///
/// `daily_count` only grows during a day. It is bumped through the
/// request counter and zeroed by the daily reset job; nothing else writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier for the key
    id: ApiKeyId,
    /// Token presented by clients (uid of the owning OAuth application)
    client_id: String,
    /// Account that owns this key
    account_id: AccountId,
    /// Display name for the key
    name: String,
    /// Description of the key's purpose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    status: ApiKeyStatus,
    /// Requests made today
    #[serde(default)]
    daily_count: u64,
    /// Requests allowed per day
    #[serde(default = "default_daily_limit")]
    daily_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_used_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

fn default_daily_limit() -> u64 {
    DEFAULT_DAILY_LIMIT
}

impl ApiKey {
    /// Create a new active API key with the default daily limit
    pub fn new(
        id: ApiKeyId,
        client_id: impl Into<String>,
        account_id: AccountId,
        name: impl Into<String>,
    ) -> Result<Self, ApiKeyValidationError> {
        let client_id = client_id.into();
        validate_client_id(&client_id)?;
        let now = Utc::now();

        Ok(Self {
            id,
            client_id,
            account_id,
            name: name.into(),
            description: None,
            status: ApiKeyStatus::Active,
            daily_count: 0,
            daily_limit: DEFAULT_DAILY_LIMIT,
            last_used_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the daily request allowance
    pub fn with_daily_limit(mut self, daily_limit: u64) -> Self {
        self.daily_limit = daily_limit;
        self
    }

    /// Set today's request count
    pub fn with_daily_count(mut self, daily_count: u64) -> Self {
        self.daily_count = daily_count;
        self
    }

    /// Set status
    pub fn with_status(mut self, status: ApiKeyStatus) -> Self {
        self.status = status;
        self
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ApiKeyStatus {
        self.status
    }

    pub fn daily_count(&self) -> u64 {
        self.daily_count
    }

    pub fn daily_limit(&self) -> u64 {
        self.daily_limit
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Status checks

    /// Check if today's allowance is used up
    pub fn is_over_quota(&self) -> bool {
        self.daily_count >= self.daily_limit
    }

    /// Requests left today
    pub fn remaining_quota(&self) -> u64 {
        self.daily_limit.saturating_sub(self.daily_count)
    }

    /// Check if the key may authorize a request right now
    pub fn is_valid(&self) -> bool {
        self.status.is_usable() && !self.is_over_quota()
    }

    // Mutators

    /// Count one request against today's allowance, returning the new count
    pub fn record_request(&mut self) -> u64 {
        self.daily_count = self.daily_count.saturating_add(1);
        self.last_used_at = Some(Utc::now());
        self.daily_count
    }

    /// Start a new day
    pub fn reset_daily_count(&mut self) {
        self.daily_count = 0;
    }

    /// Ban the key
    pub fn disable(&mut self) {
        self.status = ApiKeyStatus::Disabled;
        self.touch();
    }

    /// Lift a ban
    pub fn enable(&mut self) {
        self.status = ApiKeyStatus::Active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
