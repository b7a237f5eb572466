use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::error::{AppError, AppResult};
use crate::jobs::executor::JobExecutor;
use crate::jobs::models::ScheduledJob;
use crate::jobs::registry::JobRegistry;
use crate::services::Services;

/// Wrapper around tokio-cron-scheduler for configuration-defined jobs
pub struct JobScheduler {
    scheduler: Arc<Mutex<TokioCronScheduler>>,
    executor: Arc<JobExecutor>,
    registry: Arc<JobRegistry>,
}

impl JobScheduler {
    pub async fn new(services: Services, registry: JobRegistry) -> AppResult<Self> {
        let scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            executor: Arc::new(JobExecutor::new(services)),
            registry: Arc::new(registry),
        })
    }

    /// Schedule `jobs` and start ticking
    pub async fn start(&self, jobs: Vec<ScheduledJob>) -> AppResult<()> {
        for job in jobs {
            tracing::info!(
                job_name = %job.job_name,
                cron = %job.cron_expression,
                "Scheduling job"
            );
            self.schedule_job(job).await?;
        }

        self.scheduler
            .lock()
            .await
            .start()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(())
    }

    /// Stop the scheduler gracefully
    pub async fn stop(&self) -> AppResult<()> {
        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(())
    }

    async fn schedule_job(&self, job: ScheduledJob) -> AppResult<()> {
        // Resolve the task up front so a bad job type fails at startup
        self.registry
            .create_task(&job.job_type, job.payload.clone().unwrap_or_default())?;

        let executor = Arc::clone(&self.executor);
        let registry = Arc::clone(&self.registry);
        let job_clone = job.clone();

        let cron_job = Job::new_async(job.cron_expression.as_str(), move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            let registry = Arc::clone(&registry);
            let job = job_clone.clone();

            Box::pin(async move {
                let payload = job.payload.clone().unwrap_or(serde_json::json!({}));

                match registry.create_task(&job.job_type, payload) {
                    Ok(task) => {
                        // Failures are already logged by the executor
                        let _ = executor.execute_job(&job, task).await;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to create task");
                    }
                }
            })
        })
        .map_err(|e| AppError::Validation {
            field: "trending.schedule.cron".to_string(),
            reason: format!("Invalid cron expression: {}", e),
        })?;

        self.scheduler
            .lock()
            .await
            .add(cron_job)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(())
    }
}
