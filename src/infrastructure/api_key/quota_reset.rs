//! Daily API key quota reset

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::api_key::ApiKeyRepository;
use crate::domain::DomainError;
use crate::infrastructure::observability::record_quota_reset;

/// Time left until the next UTC midnight after `now`
pub fn until_next_midnight(now: DateTime<Utc>) -> Duration {
    let next = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc());

    match next {
        Some(next) => (next - now).to_std().unwrap_or(Duration::ZERO),
        None => Duration::from_secs(24 * 60 * 60),
    }
}

/// Zero every key's daily count once
pub async fn reset_quotas<R: ApiKeyRepository + ?Sized>(repository: &R) -> Result<usize, DomainError> {
    let reset = repository.reset_daily_counts().await?;
    record_quota_reset(reset);
    info!(keys = reset, "Daily API key quotas reset");
    Ok(reset)
}

/// Spawn a task that resets quotas at every UTC midnight
pub fn spawn_quota_reset<R>(repository: Arc<R>) -> JoinHandle<()>
where
    R: ApiKeyRepository + ?Sized + 'static,
{
    tokio::spawn(run_daily_resets(repository))
}

async fn run_daily_resets<R>(repository: Arc<R>)
where
    R: ApiKeyRepository + ?Sized + 'static,
{
    loop {
        let wait = until_next_midnight(Utc::now());
        info!(seconds = wait.as_secs(), "Next daily quota reset scheduled");
        tokio::time::sleep(wait).await;

        if let Err(e) = reset_quotas(repository.as_ref()).await {
            error!(error = %e, "Daily quota reset failed");
        }
    }
}
