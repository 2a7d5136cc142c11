//! Plan Event Sink Port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{JobId, PlanId, ProjectId};

/// Outcome carried by a job-completed event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    Succeeded,
    Failed,
}

/// Lifecycle events the reporter emits to the plan's event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobEvent {
    JobStarted { job_id: JobId },
    JobCompleted { job_id: JobId, result: JobOutcome },
}

/// Port for emitting lifecycle events to the orchestration plan
#[async_trait]
pub trait PlanEventSink: Send + Sync {
    async fn emit(
        &self,
        project_id: &ProjectId,
        hub_name: &str,
        plan_id: &PlanId,
        event: JobEvent,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_carries_outcome() {
        let event = JobEvent::JobCompleted {
            job_id: JobId::new("job-1"),
            result: JobOutcome::Failed,
        };
        match event {
            JobEvent::JobCompleted { result, .. } => assert_eq!(result, JobOutcome::Failed),
            _ => panic!("Wrong event type"),
        }
    }
}
