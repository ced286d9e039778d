//! Similar project suggestions

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::project::{co_occurrence, ProjectId, ProjectRepository, ProjectSummary};
use crate::domain::DomainError;

/// Suggestions returned when none is configured
pub const DEFAULT_SIMILAR_LIMIT: usize = 10;

/// A suggested project and how many signals it shares with the subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProject {
    pub project: ProjectSummary,
    pub shared: usize,
}

/// Projects related to one subject project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProjects {
    pub project: ProjectSummary,
    pub by_tags: Vec<SimilarProject>,
    pub by_stacks: Vec<SimilarProject>,
}

/// Finds projects that share tags or stacks with a project
#[derive(Debug)]
pub struct SimilarProjectsService<P: ProjectRepository> {
    projects: Arc<P>,
    limit: usize,
}

impl<P: ProjectRepository> SimilarProjectsService<P> {
    pub fn new(projects: Arc<P>) -> Self {
        Self {
            projects,
            limit: DEFAULT_SIMILAR_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub async fn similar(&self, id: ProjectId) -> Result<SimilarProjects, DomainError> {
        let project = self
            .projects
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Project '{}' not found", id)))?;

        let tags = self.projects.tags_of(id).await?;
        let tag_neighbours = if tags.is_empty() {
            Vec::new()
        } else {
            self.projects.projects_tagged(&tags).await?
        };

        let stacks = self.projects.stacks_of(id).await?;
        let stack_neighbours = if stacks.is_empty() {
            Vec::new()
        } else {
            self.projects.projects_in_stacks(&stacks).await?
        };

        let by_tags = self
            .resolve(co_occurrence(id, tag_neighbours, self.limit))
            .await?;
        let by_stacks = self
            .resolve(co_occurrence(id, stack_neighbours, self.limit))
            .await?;

        debug!(
            project = %id,
            by_tags = by_tags.len(),
            by_stacks = by_stacks.len(),
            "Similar projects computed"
        );

        Ok(SimilarProjects {
            project,
            by_tags,
            by_stacks,
        })
    }

    // Keeps the ranked order of `ranked`.
    async fn resolve(
        &self,
        ranked: Vec<(ProjectId, usize)>,
    ) -> Result<Vec<SimilarProject>, DomainError> {
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ProjectId> = ranked.iter().map(|(id, _)| *id).collect();
        let mut found: HashMap<ProjectId, ProjectSummary> = self
            .projects
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id(), p))
            .collect();

        Ok(ranked
            .into_iter()
            .filter_map(|(id, shared)| {
                found
                    .remove(&id)
                    .map(|project| SimilarProject { project, shared })
            })
            .collect())
    }
}
