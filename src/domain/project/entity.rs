//! Project summary and relation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

/// Numeric project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only projection of a project used for ranking and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    id: ProjectId,
    name: String,
    /// Vanity slug used in links
    url_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    activity_level_index: i32,
    #[serde(default)]
    user_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating_average: Option<f64>,
    #[serde(default)]
    active_committers: u32,
}

impl ProjectSummary {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        url_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url_name: url_name.into(),
            description: None,
            created_at,
            activity_level_index: 0,
            user_count: 0,
            rating_average: None,
            active_committers: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_activity_level_index(mut self, index: i32) -> Self {
        self.activity_level_index = index;
        self
    }

    pub fn with_user_count(mut self, count: u32) -> Self {
        self.user_count = count;
        self
    }

    pub fn with_rating_average(mut self, rating: f64) -> Self {
        self.rating_average = Some(rating);
        self
    }

    pub fn with_active_committers(mut self, count: u32) -> Self {
        self.active_committers = count;
        self
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url_name(&self) -> &str {
        &self.url_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn activity_level_index(&self) -> i32 {
        self.activity_level_index
    }

    pub fn user_count(&self) -> u32 {
        self.user_count
    }

    pub fn rating_average(&self) -> Option<f64> {
        self.rating_average
    }

    pub fn active_committers(&self) -> u32 {
        self.active_committers
    }

    /// Case-insensitive substring match against name and description
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// An account managing a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manage {
    pub account_id: AccountId,
    pub project_id: ProjectId,
    /// Set when the management right was withdrawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Manage {
    pub fn new(account_id: AccountId, project_id: ProjectId) -> Self {
        Self {
            account_id,
            project_id,
            revoked_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// A tag applied to a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tagging {
    pub project_id: ProjectId,
    pub tag: String,
}

/// A project listed in a user's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntry {
    pub stack_id: u64,
    pub project_id: ProjectId,
}
