//! Sort keys for project listings

use std::cmp::Ordering;

use serde::Serialize;

use super::entity::ProjectSummary;

/// Caller-selectable ordering for project listings
///
/// Every key is descending except `ProjectName` (ascending, case-insensitive)
/// and the default `Id` (ascending). Ties always fall back to id ascending so
/// pages stay stable across identical calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    New,
    ActivityLevel,
    Users,
    Rating,
    ActiveCommitters,
    ProjectName,
}

impl SortKey {
    /// Parse a `sort` parameter; unknown or blank values give the default
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("new") => Self::New,
            Some("activity_level") => Self::ActivityLevel,
            Some("users") => Self::Users,
            Some("rating") => Self::Rating,
            Some("active_committers") => Self::ActiveCommitters,
            Some("project_name") => Self::ProjectName,
            _ => Self::Id,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::New => "new",
            Self::ActivityLevel => "activity_level",
            Self::Users => "users",
            Self::Rating => "rating",
            Self::ActiveCommitters => "active_committers",
            Self::ProjectName => "project_name",
        }
    }

    /// Total order used for ranking
    pub fn compare(&self, a: &ProjectSummary, b: &ProjectSummary) -> Ordering {
        let primary = match self {
            Self::Id => Ordering::Equal,
            Self::New => b.created_at().cmp(&a.created_at()),
            Self::ActivityLevel => b.activity_level_index().cmp(&a.activity_level_index()),
            Self::Users => b.user_count().cmp(&a.user_count()),
            Self::Rating => rating_descending(a.rating_average(), b.rating_average()),
            Self::ActiveCommitters => b.active_committers().cmp(&a.active_committers()),
            Self::ProjectName => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        };

        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unrated projects go last.
fn rating_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
