//! Plan Logger Port
//!
//! The backend-visible structured log attached to the plan. Distinct from
//! the crate's own `tracing` diagnostics, which never leave the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::Result;

/// Port for writing structured log records into the plan
#[async_trait]
pub trait PlanLogger: Send + Sync {
    async fn log_info(
        &self,
        code: &str,
        message: &str,
        properties: &HashMap<String, serde_json::Value>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;

    async fn log_error(
        &self,
        code: &str,
        message: &str,
        properties: &HashMap<String, serde_json::Value>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;
}
