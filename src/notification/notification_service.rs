use chrono::{Duration, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::state::AppState;

/// Background retention job: old notifications are purged nightly so
/// the table does not grow without bound. Retention length comes from
/// `NOTIFICATION_RETENTION_DAYS`.
pub async fn start_retention_job(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = JobScheduler::new().await?;

    // Every night at 03:00 UTC.
    let job = Job::new_async("0 0 3 * * *", move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = purge_old_notifications(state).await {
                error!("Error purging old notifications: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification retention job started");
    Ok(())
}

async fn purge_old_notifications(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let cutoff = Utc::now() - Duration::days(state.config.notification_retention_days);

    let purged = state
        .notification_repository
        .delete_older_than(cutoff)
        .await?;

    if purged > 0 {
        info!("Purged {} notifications older than {}", purged, cutoff);
    }

    Ok(())
}
