//! Project listing service

use std::sync::Arc;

use tracing::debug;

use crate::domain::account::AccountRepository;
use crate::domain::project::{
    rank, CandidateSource, Page, PageLimits, PageRequest, ProjectRepository, ProjectSummary,
    SortKey,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_listing;

/// Raw listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default)]
pub struct ListProjectsRequest {
    pub ids: Option<String>,
    pub account: Option<String>,
    pub query: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListProjectsRequest {
    /// Projects managed by one account, addressed by id or login
    pub fn managed_by(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            ..Self::default()
        }
    }
}

/// Resolves candidates and ranks them into a page
#[derive(Debug)]
pub struct ProjectRanker<P, A>
where
    P: ProjectRepository,
    A: AccountRepository,
{
    projects: Arc<P>,
    accounts: Arc<A>,
    limits: PageLimits,
}

impl<P: ProjectRepository, A: AccountRepository> ProjectRanker<P, A> {
    pub fn new(projects: Arc<P>, accounts: Arc<A>) -> Self {
        Self {
            projects,
            accounts,
            limits: PageLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// List one page of projects
    ///
    /// Fails with `NotFound` only when an explicit, fully numeric id list
    /// resolves to no project at all.
    pub async fn list(
        &self,
        request: &ListProjectsRequest,
    ) -> Result<Page<ProjectSummary>, DomainError> {
        let source = CandidateSource::select(
            request.ids.as_deref(),
            request.account.as_deref(),
            request.query.as_deref(),
        );
        let sort = SortKey::parse(request.sort.as_deref());
        let page_request = PageRequest::from_params(
            request.page.as_deref(),
            request.per_page.as_deref(),
            &self.limits,
        );

        let candidates = self.candidates(&source).await?;
        let page = rank(candidates, sort, page_request);

        record_listing(source.strategy(), sort.as_str(), page.items.len());
        debug!(
            strategy = source.strategy(),
            sort = %sort,
            page = page.page,
            per_page = page.per_page,
            total = page.total,
            returned = page.items.len(),
            "Projects ranked"
        );

        Ok(page)
    }

    async fn candidates(&self, source: &CandidateSource) -> Result<Vec<ProjectSummary>, DomainError> {
        match source {
            CandidateSource::All => self.projects.list_all().await,
            CandidateSource::Query(text) => self.projects.search(text).await,
            CandidateSource::Ids(list) => {
                let found = self.projects.find_by_ids(list.ids()).await?;
                if list.is_not_found(found.len()) {
                    return Err(DomainError::not_found(
                        "None of the requested project ids exist",
                    ));
                }
                Ok(found)
            }
            CandidateSource::ManagedBy(param) => match self.accounts.resolve(param).await? {
                Some(account) => self.projects.managed_by(account.id()).await,
                None => {
                    debug!(account = %param, "Unknown account, no managed projects");
                    Ok(Vec::new())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Account, AccountId};
    use crate::domain::project::{Manage, MockProjectRepository, ProjectId};
    use crate::infrastructure::account::InMemoryAccountRepository;
    use crate::infrastructure::project::InMemoryProjectRepository;
    use chrono::Utc;

    fn project(id: u64, name: &str) -> ProjectSummary {
        ProjectSummary::new(ProjectId::new(id), name, name.to_lowercase(), Utc::now())
    }

    fn accounts() -> Arc<InMemoryAccountRepository> {
        Arc::new(
            InMemoryAccountRepository::with_accounts(vec![Account::new(AccountId::new(7), "robin")])
                .unwrap(),
        )
    }

    fn ranker() -> ProjectRanker<InMemoryProjectRepository, InMemoryAccountRepository> {
        let projects = InMemoryProjectRepository::from_records(
            (1..=30)
                .map(|i| project(i, &format!("Project {i}")).with_user_count((i % 4) as u32))
                .collect(),
            vec![
                Manage::new(AccountId::new(7), ProjectId::new(4)),
                Manage::new(AccountId::new(7), ProjectId::new(2)),
            ],
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

        ProjectRanker::new(Arc::new(projects), accounts())
    }

    fn ids(page: &Page<ProjectSummary>) -> Vec<u64> {
        page.items.iter().map(|p| p.id().value()).collect()
    }

    #[tokio::test]
    async fn test_default_listing() {
        let page = ranker().list(&ListProjectsRequest::default()).await.unwrap();
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
        assert_eq!(page.total, 30);
    }

    #[tokio::test]
    async fn test_per_page_capped_at_25() {
        let request = ListProjectsRequest {
            per_page: Some("50".to_string()),
            ..Default::default()
        };
        let page = ranker().list(&request).await.unwrap();
        assert_eq!(page.items.len(), 25);
    }

    #[tokio::test]
    async fn test_unresolved_numeric_ids_not_found() {
        let request = ListProjectsRequest {
            ids: Some("111112222222".to_string()),
            ..Default::default()
        };
        let result = ranker().list(&request).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_non_numeric_ids_give_empty_page() {
        let request = ListProjectsRequest {
            ids: Some("not_a_number".to_string()),
            ..Default::default()
        };
        let page = ranker().list(&request).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_ids_drop_unknown_and_keep_known() {
        let request = ListProjectsRequest {
            ids: Some("3, 999, 1".to_string()),
            ..Default::default()
        };
        let page = ranker().list(&request).await.unwrap();
        assert_eq!(ids(&page), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_ids_take_precedence_over_query() {
        let request = ListProjectsRequest {
            ids: Some("5".to_string()),
            query: Some("Project 1".to_string()),
            ..Default::default()
        };
        let page = ranker().list(&request).await.unwrap();
        assert_eq!(ids(&page), vec![5]);
    }

    #[tokio::test]
    async fn test_managed_by_login() {
        let page = ranker()
            .list(&ListProjectsRequest::managed_by("robin"))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_managed_by_unknown_account_is_empty() {
        let page = ranker()
            .list(&ListProjectsRequest::managed_by("nobody"))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_sorted_by_users_then_id() {
        let request = ListProjectsRequest {
            sort: Some("users".to_string()),
            per_page: Some("3".to_string()),
            ..Default::default()
        };
        let page = ranker().list(&request).await.unwrap();
        assert_eq!(ids(&page), vec![3, 7, 11]);
    }

    #[tokio::test]
    async fn test_listing_is_idempotent() {
        let ranker = ranker();
        let request = ListProjectsRequest {
            query: Some("project 2".to_string()),
            sort: Some("project_name".to_string()),
            ..Default::default()
        };

        let first = ranker.list(&request).await.unwrap();
        let second = ranker.list(&request).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_query_uses_repository_search() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![project(2, "FooBar"), project(1, "Foo")]));
        projects.expect_list_all().times(0);

        let ranker = ProjectRanker::new(Arc::new(projects), accounts());
        let request = ListProjectsRequest {
            query: Some("foo".to_string()),
            ..Default::default()
        };

        let page = ranker.list(&request).await.unwrap();
        assert_eq!(ids(&page), vec![1, 2]);
    }
}
