//! In-memory project repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::AccountId;
use crate::domain::project::{
    Manage, ProjectId, ProjectRepository, ProjectSummary, StackEntry, Tagging,
};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct ProjectStore {
    projects: BTreeMap<ProjectId, ProjectSummary>,
    manages: Vec<Manage>,
    taggings: Vec<Tagging>,
    stack_entries: Vec<StackEntry>,
}

impl ProjectStore {
    fn summaries<'a>(
        &'a self,
        ids: impl IntoIterator<Item = &'a ProjectId>,
    ) -> Vec<ProjectSummary> {
        ids.into_iter()
            .filter_map(|id| self.projects.get(id))
            .cloned()
            .collect()
    }
}

/// In-memory implementation of ProjectRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    store: Arc<RwLock<ProjectStore>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding only projects
    pub fn with_projects(projects: Vec<ProjectSummary>) -> Result<Self, DomainError> {
        Self::from_records(projects, Vec::new(), Vec::new(), Vec::new())
    }

    /// Create a repository from projects and their relations
    ///
    /// Duplicate project ids and relations pointing at unknown projects are
    /// rejected. Duplicate tag and stack rows collapse.
    pub fn from_records(
        projects: Vec<ProjectSummary>,
        manages: Vec<Manage>,
        taggings: Vec<Tagging>,
        stack_entries: Vec<StackEntry>,
    ) -> Result<Self, DomainError> {
        let mut store = ProjectStore::default();

        for project in projects {
            let id = project.id();
            if store.projects.insert(id, project).is_some() {
                return Err(DomainError::conflict(format!(
                    "Project '{}' is defined twice",
                    id
                )));
            }
        }

        let known = |id: ProjectId, relation: &str| -> Result<(), DomainError> {
            if store.projects.contains_key(&id) {
                Ok(())
            } else {
                Err(DomainError::validation(format!(
                    "{} refers to unknown project '{}'",
                    relation, id
                )))
            }
        };

        for manage in &manages {
            known(manage.project_id, "Management relation")?;
        }

        let mut seen_tags = HashSet::new();
        let mut unique_taggings = Vec::new();
        for tagging in taggings {
            known(tagging.project_id, "Tagging")?;
            let normalized = Tagging {
                project_id: tagging.project_id,
                tag: tagging.tag.trim().to_lowercase(),
            };
            if !normalized.tag.is_empty() && seen_tags.insert(normalized.clone()) {
                unique_taggings.push(normalized);
            }
        }

        let mut seen_stacks = HashSet::new();
        let mut unique_entries = Vec::new();
        for entry in stack_entries {
            known(entry.project_id, "Stack entry")?;
            if seen_stacks.insert(entry) {
                unique_entries.push(entry);
            }
        }

        store.manages = manages;
        store.taggings = unique_taggings;
        store.stack_entries = unique_entries;

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// Number of stored projects
    pub async fn len(&self) -> usize {
        self.store.read().await.projects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.projects.is_empty()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn get(&self, id: ProjectId) -> Result<Option<ProjectSummary>, DomainError> {
        Ok(self.store.read().await.projects.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ProjectSummary>, DomainError> {
        Ok(self.store.read().await.projects.values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<ProjectSummary>, DomainError> {
        let store = self.store.read().await;
        Ok(store.summaries(ids))
    }

    async fn search(&self, text: &str) -> Result<Vec<ProjectSummary>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .projects
            .values()
            .filter(|p| p.matches_text(text))
            .cloned()
            .collect())
    }

    async fn managed_by(&self, account: AccountId) -> Result<Vec<ProjectSummary>, DomainError> {
        let store = self.store.read().await;

        let ids: Vec<ProjectId> = store
            .manages
            .iter()
            .filter(|m| m.account_id == account && m.is_active())
            .map(|m| m.project_id)
            .collect();

        Ok(store.summaries(&ids))
    }

    async fn tags_of(&self, id: ProjectId) -> Result<Vec<String>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .taggings
            .iter()
            .filter(|t| t.project_id == id)
            .map(|t| t.tag.clone())
            .collect())
    }

    async fn projects_tagged(&self, tags: &[String]) -> Result<Vec<ProjectId>, DomainError> {
        let store = self.store.read().await;
        let wanted: HashSet<String> = tags.iter().map(|t| t.trim().to_lowercase()).collect();

        Ok(store
            .taggings
            .iter()
            .filter(|t| wanted.contains(&t.tag))
            .map(|t| t.project_id)
            .collect())
    }

    async fn stacks_of(&self, id: ProjectId) -> Result<Vec<u64>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .stack_entries
            .iter()
            .filter(|e| e.project_id == id)
            .map(|e| e.stack_id)
            .collect())
    }

    async fn projects_in_stacks(&self, stacks: &[u64]) -> Result<Vec<ProjectId>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .stack_entries
            .iter()
            .filter(|e| stacks.contains(&e.stack_id))
            .map(|e| e.project_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(id: u64, name: &str) -> ProjectSummary {
        ProjectSummary::new(ProjectId::new(id), name, name.to_lowercase(), Utc::now())
    }

    fn tagging(project: u64, tag: &str) -> Tagging {
        Tagging {
            project_id: ProjectId::new(project),
            tag: tag.to_string(),
        }
    }

    fn repo() -> InMemoryProjectRepository {
        let mut revoked = Manage::new(AccountId::new(7), ProjectId::new(3));
        revoked.revoked_at = Some(Utc::now());

        InMemoryProjectRepository::from_records(
            vec![
                project(1, "Foo").with_description("The original"),
                project(2, "FooBar"),
                project(3, "Goobaz").with_description("not related"),
            ],
            vec![Manage::new(AccountId::new(7), ProjectId::new(1)), revoked],
            vec![tagging(1, "rust"), tagging(2, "Rust"), tagging(2, "rust")],
            vec![StackEntry {
                stack_id: 11,
                project_id: ProjectId::new(3),
            }],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let found = repo().search("foo").await.unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Foo", "FooBar"]);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let found = repo()
            .find_by_ids(&[ProjectId::new(2), ProjectId::new(99)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), ProjectId::new(2));
    }

    #[tokio::test]
    async fn test_managed_by_skips_revoked_relations() {
        let managed = repo().managed_by(AccountId::new(7)).await.unwrap();
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].id(), ProjectId::new(1));
    }

    #[tokio::test]
    async fn test_taggings_are_normalized_and_deduplicated() {
        let repo = repo();
        assert_eq!(repo.tags_of(ProjectId::new(2)).await.unwrap(), vec!["rust"]);

        let tagged = repo
            .projects_tagged(&["RUST".to_string()])
            .await
            .unwrap();
        assert_eq!(tagged, vec![ProjectId::new(1), ProjectId::new(2)]);
    }

    #[tokio::test]
    async fn test_stacks() {
        let repo = repo();
        assert_eq!(repo.stacks_of(ProjectId::new(3)).await.unwrap(), vec![11]);
        assert_eq!(
            repo.projects_in_stacks(&[11]).await.unwrap(),
            vec![ProjectId::new(3)]
        );
    }

    #[test]
    fn test_duplicate_project_rejected() {
        let result =
            InMemoryProjectRepository::with_projects(vec![project(1, "A"), project(1, "B")]);
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_relation_to_unknown_project_rejected() {
        let result = InMemoryProjectRepository::from_records(
            vec![project(1, "A")],
            Vec::new(),
            vec![tagging(2, "rust")],
            Vec::new(),
        );
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
