use tokio_cron_scheduler::{Job, JobScheduler};

use crate::polls::PollManager;

/// Every ten minutes, on the minute.
pub const SWEEP_SCHEDULE: &str = "0 */10 * * * *";

/// Periodically drops polls that have been idle longer than the store's TTL.
///
/// Telegram stops accepting edits on old messages, so such polls can no longer
/// be voted on anyway.
pub struct PollSweeper {
    polls: PollManager,
    scheduler: JobScheduler,
}

impl PollSweeper {
    pub async fn new(polls: PollManager) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { polls, scheduler })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let polls = self.polls.clone();

        let sweep_job = Job::new_async(SWEEP_SCHEDULE, move |_uuid, _l| {
            let polls = polls.clone();
            Box::pin(async move {
                sweep(&polls);
            })
        })?;

        self.scheduler.add(sweep_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Poll sweeper started - evicting idle polls every 10 minutes");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    pub fn sweep_now(&self) -> usize {
        sweep(&self.polls)
    }
}

fn sweep(polls: &PollManager) -> usize {
    let evicted = polls.sweep();
    if evicted > 0 {
        tracing::info!(
            "Evicted {} idle polls, {} still tracked",
            evicted,
            polls.store().len()
        );
    }
    evicted
}
