use tokio::time::Instant;
use uuid::Uuid;

use crate::error::AppResult;
use crate::jobs::models::ScheduledJob;
use crate::jobs::types::{JobContext, JobStatus, JobTask};
use crate::services::Services;

/// Runs a task once per trigger and logs the outcome
///
/// Failures are reported, never retried; the next cron tick is the next attempt.
pub struct JobExecutor {
    services: Services,
}

impl JobExecutor {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub async fn execute_job(&self, job: &ScheduledJob, task: Box<dyn JobTask>) -> AppResult<()> {
        let execution_id = Uuid::new_v4();
        let start_time = Instant::now();

        tracing::info!(
            job_name = %job.job_name,
            %execution_id,
            status = %JobStatus::Running,
            description = %task.description().unwrap_or_default(),
            "Job started"
        );

        let ctx = JobContext {
            execution_id,
            job_name: job.job_name.clone(),
            services: self.services.clone(),
        };
        let result = task.execute(ctx).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match &result {
            Ok(()) => tracing::info!(
                job_name = %job.job_name,
                %execution_id,
                status = %JobStatus::Success,
                duration_ms,
                "Job finished"
            ),
            Err(e) => tracing::error!(
                job_name = %job.job_name,
                %execution_id,
                status = %JobStatus::Failed,
                duration_ms,
                error = %e,
                "Job failed"
            ),
        }

        result
    }
}
