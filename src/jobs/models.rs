use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use crate::config::Settings;
use crate::jobs::tasks::TrendingPushTask;
use crate::jobs::types::JobTask;

/// A cron-triggered job derived from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub job_name: String,
    pub job_type: String,
    pub cron_expression: String,
    pub payload: Option<JsonValue>,
}

impl ScheduledJob {
    /// Jobs enabled by the current settings
    pub fn from_settings(settings: &Settings) -> Vec<ScheduledJob> {
        let schedule = &settings.trending.schedule;
        if !schedule.enabled {
            return Vec::new();
        }

        vec![ScheduledJob {
            job_name: "trending-push".to_string(),
            job_type: TrendingPushTask::task_type().to_string(),
            cron_expression: schedule.cron.clone(),
            payload: Some(json!({ "limit": settings.trending.limit })),
        }]
    }
}
