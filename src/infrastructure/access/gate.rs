//! Access gate service

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::access::{
    evaluate_admin, evaluate_key, requirement, AccessDecision, AccessGrant, RequestContext,
    Requirement,
};
use crate::domain::account::AccountRepository;
use crate::domain::api_key::{ApiKeyRepository, RequestCounter};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_access_decision;

/// Decides whether a request may run and counts key usage
///
/// Makes one decision per request and never retries. A failing key or
/// account lookup is reported as an error; a failing counter is logged and
/// the decision stands.
#[derive(Debug)]
pub struct AccessGate<R, C, A>
where
    R: ApiKeyRepository,
    C: RequestCounter,
    A: AccountRepository,
{
    keys: Arc<R>,
    counter: Arc<C>,
    accounts: Arc<A>,
}

impl<R, C, A> AccessGate<R, C, A>
where
    R: ApiKeyRepository,
    C: RequestCounter,
    A: AccountRepository,
{
    pub fn new(keys: Arc<R>, counter: Arc<C>, accounts: Arc<A>) -> Self {
        Self {
            keys,
            counter,
            accounts,
        }
    }

    /// Authorize a request
    pub async fn authorize(&self, ctx: &RequestContext) -> Result<AccessDecision, DomainError> {
        let decision = match requirement(ctx) {
            Requirement::Settled(decision) => decision,
            Requirement::CheckKey(token) => {
                let key = self.keys.get_by_client_id(&token).await?;
                let decision = evaluate_key(key.as_ref());

                if let AccessDecision::Allowed(AccessGrant::ApiKey(id)) = &decision {
                    match self.counter.increment(id).await {
                        Ok(count) => debug!(api_key = %id, daily_count = count, "API key usage counted"),
                        Err(e) => warn!(api_key = %id, error = %e, "Failed to count API key usage"),
                    }
                }

                decision
            }
            Requirement::CheckAdmin(principal) => {
                let account = self.accounts.get(principal).await?;
                evaluate_admin(account.as_ref())
            }
        };

        record_access_decision(decision.outcome(), ctx.format().as_str());

        match &decision {
            AccessDecision::Allowed(grant) => debug!(
                format = %ctx.format(),
                grant = ?grant,
                "Access allowed"
            ),
            AccessDecision::Denied(reason) => info!(
                format = %ctx.format(),
                reason = %reason,
                "Access denied"
            ),
        }

        Ok(decision)
    }
}
