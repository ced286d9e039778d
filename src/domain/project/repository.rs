//! Project repository trait

use async_trait::async_trait;

use super::entity::{ProjectId, ProjectSummary};
use crate::domain::account::AccountId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to project summaries and the relations used for ranking
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Get a single project
    async fn get(&self, id: ProjectId) -> Result<Option<ProjectSummary>, DomainError>;

    /// Every known project
    async fn list_all(&self) -> Result<Vec<ProjectSummary>, DomainError>;

    /// Projects matching any of the ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<ProjectSummary>, DomainError>;

    /// Case-insensitive substring search over name and description
    async fn search(&self, text: &str) -> Result<Vec<ProjectSummary>, DomainError>;

    /// Projects the account currently manages; revoked relations are skipped
    async fn managed_by(&self, account: AccountId) -> Result<Vec<ProjectSummary>, DomainError>;

    /// Tags applied to a project
    async fn tags_of(&self, id: ProjectId) -> Result<Vec<String>, DomainError>;

    /// One entry per (project, tag) pair for projects carrying any of the tags
    async fn projects_tagged(&self, tags: &[String]) -> Result<Vec<ProjectId>, DomainError>;

    /// Stacks that list a project
    async fn stacks_of(&self, id: ProjectId) -> Result<Vec<u64>, DomainError>;

    /// One entry per (project, stack) pair for projects listed in any of the stacks
    async fn projects_in_stacks(&self, stacks: &[u64]) -> Result<Vec<ProjectId>, DomainError>;
}
