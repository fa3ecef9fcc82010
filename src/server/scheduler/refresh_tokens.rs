use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::token::SessionTokenService, state::AppState};

/// Runs at the top of every hour.
const PURGE_SCHEDULE: &str = "0 0 * * * *";

/// Starts the refresh token cleanup scheduler.
///
/// Expired refresh tokens are rejected on use anyway; this job keeps the table from
/// accumulating rows for sessions that were never refreshed.
pub async fn start_scheduler(state: &AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = state.db.clone();
    let job_jwt = state.jwt.clone();
    let refresh_ttl_days = state.login_policy.refresh_token_ttl_days;

    let job = Job::new_async(PURGE_SCHEDULE, move |_uuid, _lock| {
        let db = job_db.clone();
        let jwt = job_jwt.clone();

        Box::pin(async move {
            let token_service = SessionTokenService::new(&db, &jwt, refresh_ttl_days);
            if let Err(e) = purge_expired_tokens(&token_service).await {
                tracing::error!("Error purging expired refresh tokens: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Refresh token cleanup scheduler started");

    Ok(scheduler)
}

async fn purge_expired_tokens(token_service: &SessionTokenService<'_>) -> Result<(), AppError> {
    let purged = token_service.purge_expired(Utc::now()).await?;

    if purged > 0 {
        tracing::info!("Purged {} expired refresh tokens", purged);
    }

    Ok(())
}
