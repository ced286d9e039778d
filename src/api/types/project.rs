//! Project wire types

use serde::{Deserialize, Serialize};

use crate::domain::project::{Page, ProjectSummary};
use crate::infrastructure::project::{ListProjectsRequest, SimilarProject, SimilarProjects};

/// Query string of the project listing endpoints
///
/// Values stay as raw strings; malformed numbers degrade to defaults further
/// down rather than failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsQuery {
    pub query: Option<String>,
    pub ids: Option<String>,
    pub account_id: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ProjectsQuery {
    /// Whether the caller asked for an explicit id list
    pub fn has_ids(&self) -> bool {
        self.ids.as_deref().is_some_and(|ids| !ids.trim().is_empty())
    }

    pub fn into_request(self) -> ListProjectsRequest {
        ListProjectsRequest {
            ids: self.ids,
            account: self.account_id,
            query: self.query,
            sort: self.sort,
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Listing scoped to one account from the route, other filters dropped
    pub fn into_managed_by(self, account: impl Into<String>) -> ListProjectsRequest {
        ListProjectsRequest {
            sort: self.sort,
            page: self.page,
            per_page: self.per_page,
            ..ListProjectsRequest::managed_by(account)
        }
    }
}

/// A project as it appears in responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectResponse {
    pub id: u64,
    pub name: String,
    pub url_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub activity_level_index: i32,
    pub user_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_average: Option<f64>,
    pub active_committers: u32,
}

impl From<&ProjectSummary> for ProjectResponse {
    fn from(project: &ProjectSummary) -> Self {
        Self {
            id: project.id().value(),
            name: project.name().to_string(),
            url_name: project.url_name().to_string(),
            description: project.description().map(str::to_string),
            created_at: project.created_at().to_rfc3339(),
            activity_level_index: project.activity_level_index(),
            user_count: project.user_count(),
            rating_average: project.rating_average(),
            active_committers: project.active_committers(),
        }
    }
}

/// JSON body of a project listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectListResponse {
    pub status: &'static str,
    pub items_returned: usize,
    pub items_available: usize,
    pub first_item_position: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub projects: Vec<ProjectResponse>,
}

impl From<&Page<ProjectSummary>> for ProjectListResponse {
    fn from(page: &Page<ProjectSummary>) -> Self {
        Self {
            status: "success",
            items_returned: page.items.len(),
            items_available: page.total,
            first_item_position: page.first_item_position(),
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(),
            projects: page.items.iter().map(ProjectResponse::from).collect(),
        }
    }
}

/// A suggested project and how much it has in common with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProjectResponse {
    pub shared: usize,
    pub project: ProjectResponse,
}

impl From<&SimilarProject> for SimilarProjectResponse {
    fn from(similar: &SimilarProject) -> Self {
        Self {
            shared: similar.shared,
            project: ProjectResponse::from(&similar.project),
        }
    }
}

/// Body of the similar projects endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProjectsResponse {
    pub status: &'static str,
    pub project: ProjectResponse,
    pub by_tags: Vec<SimilarProjectResponse>,
    pub by_stacks: Vec<SimilarProjectResponse>,
}

impl From<&SimilarProjects> for SimilarProjectsResponse {
    fn from(similar: &SimilarProjects) -> Self {
        Self {
            status: "success",
            project: ProjectResponse::from(&similar.project),
            by_tags: similar.by_tags.iter().map(SimilarProjectResponse::from).collect(),
            by_stacks: similar.by_stacks.iter().map(SimilarProjectResponse::from).collect(),
        }
    }
}
