//! Project Directory API
//!
//! Ranked project listings, similar-project suggestions and kudos, served
//! as JSON for the template layer or as XML and Atom feeds behind an
//! API-key access gate with daily quotas.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderName;

use api::state::AppState;
use infrastructure::access::AccessGate;
use infrastructure::api_key::ApiKeyService;
use infrastructure::kudo::KudoService;
use infrastructure::project::{ProjectRanker, SimilarProjectsService};
use infrastructure::seed::{DirectorySeed, SeededRepositories};

/// Load the configured seed, or start empty when none is set
pub fn load_repositories(config: &AppConfig) -> anyhow::Result<SeededRepositories> {
    let seed = match &config.seed.path {
        Some(path) => DirectorySeed::from_file(path)
            .with_context(|| format!("Failed to load seed file '{}'", path))?,
        None => {
            tracing::warn!("No seed file configured, starting with an empty directory");
            DirectorySeed::default()
        }
    };

    Ok(seed.into_repositories(config.access.default_daily_limit)?)
}

/// Wire the services over a set of repositories
pub fn create_app_state(
    repositories: &SeededRepositories,
    config: &AppConfig,
) -> anyhow::Result<AppState> {
    let session_header = HeaderName::try_from(config.access.session_header.to_ascii_lowercase())
        .with_context(|| {
            format!(
                "Invalid session header name '{}'",
                config.access.session_header
            )
        })?;

    let access_gate = AccessGate::new(
        repositories.api_keys.clone(),
        repositories.api_keys.clone(),
        repositories.accounts.clone(),
    );
    let project_ranker = ProjectRanker::new(
        repositories.projects.clone(),
        repositories.accounts.clone(),
    )
    .with_limits(config.ranking.page_limits());
    let similar_projects = SimilarProjectsService::new(repositories.projects.clone())
        .with_limit(config.ranking.similar_limit);
    let kudo_service = KudoService::new(
        repositories.kudos.clone(),
        repositories.accounts.clone(),
        repositories.projects.clone(),
    );

    Ok(AppState {
        access_gate: Arc::new(access_gate),
        project_ranker: Arc::new(project_ranker),
        similar_projects: Arc::new(similar_projects),
        kudo_service: Arc::new(kudo_service),
        api_key_service: Arc::new(ApiKeyService::new(repositories.api_keys.clone())),
        api_keys: repositories.api_keys.clone(),
        session_header,
    })
}
