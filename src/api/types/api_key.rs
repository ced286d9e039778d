//! API key wire types

use serde::Serialize;

use crate::domain::api_key::ApiKey;

/// Key as shown to administrators
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub client_id: String,
    pub account_id: u64,
    pub name: String,
    pub status: String,
    pub daily_count: u64,
    pub daily_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<String>,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            client_id: key.client_id().to_string(),
            account_id: key.account_id().value(),
            name: key.name().to_string(),
            status: key.status().to_string(),
            daily_count: key.daily_count(),
            daily_limit: key.daily_limit(),
            last_used_at: key.last_used_at().map(|t| t.to_rfc3339()),
        }
    }
}
