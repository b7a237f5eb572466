use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::jobs::types::{JobContext, JobTask};
use crate::services::TrendingOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingPushTask {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

#[async_trait]
impl JobTask for TrendingPushTask {
    fn task_type() -> &'static str
    where
        Self: Sized,
    {
        "trending_push"
    }

    async fn execute(&self, ctx: JobContext) -> AppResult<()> {
        let outcome = ctx
            .services
            .notifications
            .notify_trending(Some(self.limit))
            .await?;

        match outcome {
            TrendingOutcome::NothingToNotify => tracing::info!(
                execution_id = %ctx.execution_id,
                "No trending phonks found"
            ),
            TrendingOutcome::Sent(result) => tracing::info!(
                execution_id = %ctx.execution_id,
                provider_response = ?result.provider_response,
                "Trending notification sent"
            ),
        }

        Ok(())
    }

    fn description(&self) -> Option<String> {
        Some(format!(
            "Push one trending phonk drawn from up to {} candidates",
            self.limit
        ))
    }
}
