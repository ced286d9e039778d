//! Application state for shared services

use std::sync::Arc;

use axum::http::HeaderName;

use crate::domain::access::{AccessDecision, RequestContext};
use crate::domain::account::{AccountId, AccountRepository};
use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, RequestCounter};
use crate::domain::kudo::{Kudo, KudoId, KudoRepository, NewKudo};
use crate::domain::project::{Page, ProjectId, ProjectRepository, ProjectSummary};
use crate::domain::DomainError;
use crate::infrastructure::access::AccessGate;
use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::kudo::{KudoListing, KudoService};
use crate::infrastructure::project::{
    ListProjectsRequest, ProjectRanker, SimilarProjects, SimilarProjectsService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub access_gate: Arc<dyn AccessGateTrait>,
    pub project_ranker: Arc<dyn ProjectRankerTrait>,
    pub similar_projects: Arc<dyn SimilarProjectsTrait>,
    pub kudo_service: Arc<dyn KudoServiceTrait>,
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
    pub api_keys: Arc<dyn ApiKeyRepository>,
    /// Trusted header set by the upstream authenticator
    pub session_header: HeaderName,
}

/// Trait for access gate operations
#[async_trait::async_trait]
pub trait AccessGateTrait: Send + Sync {
    async fn authorize(&self, ctx: &RequestContext) -> Result<AccessDecision, DomainError>;
}

/// Trait for project listing operations
#[async_trait::async_trait]
pub trait ProjectRankerTrait: Send + Sync {
    async fn list(&self, request: &ListProjectsRequest)
    -> Result<Page<ProjectSummary>, DomainError>;
}

/// Trait for similar project lookups
#[async_trait::async_trait]
pub trait SimilarProjectsTrait: Send + Sync {
    async fn similar(&self, id: ProjectId) -> Result<SimilarProjects, DomainError>;
}

/// Trait for kudo operations
#[async_trait::async_trait]
pub trait KudoServiceTrait: Send + Sync {
    async fn received(&self, account: &str) -> Result<KudoListing, DomainError>;
    async fn sent(&self, account: &str) -> Result<KudoListing, DomainError>;
    async fn give(&self, sender: AccountId, request: NewKudo) -> Result<Kudo, DomainError>;
    async fn rescind(&self, actor: AccountId, id: KudoId) -> Result<(), DomainError>;
}

/// Trait for API key administration
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn disable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError>;
    async fn enable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, C, A> AccessGateTrait for AccessGate<R, C, A>
where
    R: ApiKeyRepository + 'static,
    C: RequestCounter + 'static,
    A: AccountRepository + 'static,
{
    async fn authorize(&self, ctx: &RequestContext) -> Result<AccessDecision, DomainError> {
        AccessGate::authorize(self, ctx).await
    }
}

#[async_trait::async_trait]
impl<P, A> ProjectRankerTrait for ProjectRanker<P, A>
where
    P: ProjectRepository + 'static,
    A: AccountRepository + 'static,
{
    async fn list(
        &self,
        request: &ListProjectsRequest,
    ) -> Result<Page<ProjectSummary>, DomainError> {
        ProjectRanker::list(self, request).await
    }
}

#[async_trait::async_trait]
impl<P: ProjectRepository + 'static> SimilarProjectsTrait for SimilarProjectsService<P> {
    async fn similar(&self, id: ProjectId) -> Result<SimilarProjects, DomainError> {
        SimilarProjectsService::similar(self, id).await
    }
}

#[async_trait::async_trait]
impl<K, A, P> KudoServiceTrait for KudoService<K, A, P>
where
    K: KudoRepository + 'static,
    A: AccountRepository + 'static,
    P: ProjectRepository + 'static,
{
    async fn received(&self, account: &str) -> Result<KudoListing, DomainError> {
        KudoService::received(self, account).await
    }

    async fn sent(&self, account: &str) -> Result<KudoListing, DomainError> {
        KudoService::sent(self, account).await
    }

    async fn give(&self, sender: AccountId, request: NewKudo) -> Result<Kudo, DomainError> {
        KudoService::give(self, sender, request).await
    }

    async fn rescind(&self, actor: AccountId, id: KudoId) -> Result<(), DomainError> {
        KudoService::rescind(self, actor, id).await
    }
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyServiceTrait for ApiKeyService<R> {
    async fn disable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        ApiKeyService::disable(self, id).await
    }

    async fn enable(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        ApiKeyService::enable(self, id).await
    }
}
