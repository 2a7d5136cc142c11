//! Timeline Store Port

use async_trait::async_trait;

use crate::error::Result;
use crate::timeline::TimelineRecord;
use crate::types::{PlanId, ProjectId, TimelineId};

/// Port for reading and writing a plan's timeline records
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// Fetch the full record set for a timeline.
    async fn records(
        &self,
        project_id: &ProjectId,
        hub_name: &str,
        plan_id: &PlanId,
        timeline_id: &TimelineId,
    ) -> Result<Vec<TimelineRecord>>;

    /// Write mutated records back as one batch.
    async fn update_records(
        &self,
        project_id: &ProjectId,
        hub_name: &str,
        plan_id: &PlanId,
        timeline_id: &TimelineId,
        records: Vec<TimelineRecord>,
    ) -> Result<()>;
}
