//! Hub Validity Ports
//!
//! "Is this build/release still live?" — not deleted, not terminally
//! cancelled outside the job's control. A transient failure to reach the
//! backend surfaces as an error, never as `false`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BuildId, ProjectId, ReleaseId};

/// Port for checking whether a parent build still exists
#[async_trait]
pub trait BuildValidity: Send + Sync {
    async fn is_valid(&self, project_id: &ProjectId, build_id: &BuildId) -> Result<bool>;
}

/// Port for checking whether a parent release still exists
#[async_trait]
pub trait ReleaseValidity: Send + Sync {
    async fn is_valid(&self, project_id: &ProjectId, release_id: &ReleaseId) -> Result<bool>;
}
