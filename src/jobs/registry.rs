use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};
use crate::jobs::tasks::TrendingPushTask;
use crate::jobs::types::JobTask;

type TaskFactory = Box<dyn Fn(JsonValue) -> AppResult<Box<dyn JobTask>> + Send + Sync>;

/// Registry for mapping job types to task implementations
pub struct JobRegistry {
    factories: HashMap<String, TaskFactory>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every built-in task registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<TrendingPushTask>();
        registry
    }

    /// Register a task type with the registry
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: JobTask + DeserializeOwned + 'static,
    {
        let factory: TaskFactory = Box::new(|payload: JsonValue| {
            let task: T = serde_json::from_value(payload).map_err(|e| AppError::BadRequest {
                message: format!("Invalid payload for {}: {}", T::task_type(), e),
            })?;
            Ok(Box::new(task) as Box<dyn JobTask>)
        });

        self.factories.insert(T::task_type().to_string(), factory);
        self
    }

    /// Create a task instance from job type and payload
    pub fn create_task(&self, job_type: &str, payload: JsonValue) -> AppResult<Box<dyn JobTask>> {
        let factory = self
            .factories
            .get(job_type)
            .ok_or_else(|| AppError::NotFound {
                entity: "JobType".to_string(),
                field: "type".to_string(),
                value: job_type.to_string(),
            })?;

        factory(payload)
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_registered_task() {
        let registry = JobRegistry::with_defaults();
        let task = registry
            .create_task("trending_push", json!({"limit": 2}))
            .unwrap();
        assert_eq!(
            task.description().as_deref(),
            Some("Push one trending phonk drawn from up to 2 candidates")
        );
    }

    #[test]
    fn test_unknown_job_type_is_not_found() {
        let registry = JobRegistry::with_defaults();
        match registry.create_task("data_cleanup", json!({})) {
            Err(AppError::NotFound { value, .. }) => assert_eq!(value, "data_cleanup"),
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_payload_is_bad_request() {
        let registry = JobRegistry::with_defaults();
        let result = registry.create_task("trending_push", json!({"limit": "five"}));
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
