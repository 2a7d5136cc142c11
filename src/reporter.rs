//! Job-lifecycle status reporter
//!
//! One reporter is constructed per job invocation and is immutable for its
//! duration. Each lifecycle operation runs as a single sequential flow; the
//! caller may overlap operations, but each fetch-then-write cycle is
//! internally consistent and the last write wins at the backend.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::ExecutionContext;
use crate::error::{ReporterError, Result};
use crate::ports::{JobEvent, JobOutcome, PlanEventSink, PlanLogger, TimelineStore};
use crate::session::SessionValidator;
use crate::timeline::{RecordSelector, TimelineRecord};

/// Log codes written into the plan-visible log
pub const CODE_JOB_STARTED: &str = "JobStarted";
pub const CODE_JOB_RUNNING: &str = "JobRunning";
pub const CODE_JOB_COMPLETED: &str = "JobCompleted";
pub const CODE_JOB_FAILED: &str = "JobFailed";
pub const CODE_SESSION_CANCELLED: &str = "SessionCancelled";

/// Reports a job's lifecycle to the orchestration plan
pub struct StatusReporter {
    ctx: ExecutionContext,
    selector: RecordSelector,
    validator: SessionValidator,
    events: Arc<dyn PlanEventSink>,
    timeline: Arc<dyn TimelineStore>,
    plan_log: Arc<dyn PlanLogger>,
    /// Derived once from the context; attached to every plan-log record.
    event_properties: HashMap<String, serde_json::Value>,
}

impl StatusReporter {
    /// Build a reporter for one job invocation.
    ///
    /// `record_name` switches timeline addressing from "this job's subtree
    /// root plus children" to "every record with this name anywhere in the
    /// timeline". The mode is fixed here and never changes per call.
    ///
    /// # Errors
    /// `ReporterError::Config` when the context fails validation.
    pub fn new(
        ctx: ExecutionContext,
        record_name: Option<String>,
        validator: SessionValidator,
        events: Arc<dyn PlanEventSink>,
        timeline: Arc<dyn TimelineStore>,
        plan_log: Arc<dyn PlanLogger>,
    ) -> Result<Self> {
        ctx.validate()?;
        let selector = RecordSelector::for_job(ctx.job_id.clone(), record_name);
        let event_properties = ctx.event_properties();
        Ok(Self {
            ctx,
            selector,
            validator,
            events,
            timeline,
            plan_log,
            event_properties,
        })
    }

    /// Build a reporter taking the record-name filter from host configuration.
    pub fn with_config(
        ctx: ExecutionContext,
        config: &Config,
        validator: SessionValidator,
        events: Arc<dyn PlanEventSink>,
        timeline: Arc<dyn TimelineStore>,
        plan_log: Arc<dyn PlanLogger>,
    ) -> Result<Self> {
        Self::new(
            ctx,
            config.record_name.clone(),
            validator,
            events,
            timeline,
            plan_log,
        )
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Announce that the job has started.
    ///
    /// If the parent build/release no longer exists, writes one informational
    /// plan-log record and returns `Ok` without emitting anything — the
    /// orchestrator already tore the session down and nothing we report can
    /// land anywhere meaningful.
    pub async fn report_started(
        &self,
        timestamp: DateTime<Utc>,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if !self.check_session(cancel).await? {
            return self.log_session_cancelled(timestamp, cancel).await;
        }

        self.guard(
            cancel,
            self.events.emit(
                &self.ctx.project_id,
                self.ctx.hub.name(),
                &self.ctx.plan_id,
                JobEvent::JobStarted {
                    job_id: self.ctx.job_id.clone(),
                },
            ),
        )
        .await?;

        self.guard(
            cancel,
            self.plan_log
                .log_info(CODE_JOB_STARTED, message, &self.event_properties, Some(timestamp)),
        )
        .await?;

        info!(job_id = %self.ctx.job_id, "reported job started");
        Ok(())
    }

    /// Report periodic progress.
    ///
    /// No session validity check by design: progress is best-effort, and a
    /// `PlanNotFound` from the progress log is an expected late-arriving
    /// race, swallowed so the timeline update still proceeds.
    pub async fn report_progress(
        &self,
        timestamp: DateTime<Utc>,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let logged = self
            .guard(
                cancel,
                self.plan_log
                    .log_info(CODE_JOB_RUNNING, message, &self.event_properties, Some(timestamp)),
            )
            .await;
        match logged {
            Ok(()) => {}
            Err(ReporterError::PlanNotFound(plan_id)) => {
                debug!(%plan_id, "plan already deleted, progress log dropped");
            }
            Err(e) => return Err(e),
        }

        let records = self.fetch_records(cancel).await?;
        let mut selected = self.selector.select(records);
        debug!(job_id = %self.ctx.job_id, count = selected.len(), "selected timeline records");
        if selected.is_empty() {
            return Ok(());
        }

        for record in &mut selected {
            record.start();
        }
        self.write_records(selected, cancel).await
    }

    /// Announce completion or failure.
    ///
    /// Same validity gate as `report_started`; past the gate, the completed
    /// event, the plan-log record, and the timeline close-out all occur.
    pub async fn report_completed(
        &self,
        timestamp: DateTime<Utc>,
        message: &str,
        passed: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if !self.check_session(cancel).await? {
            return self.log_session_cancelled(timestamp, cancel).await;
        }

        let result = if passed {
            JobOutcome::Succeeded
        } else {
            JobOutcome::Failed
        };
        self.guard(
            cancel,
            self.events.emit(
                &self.ctx.project_id,
                self.ctx.hub.name(),
                &self.ctx.plan_id,
                JobEvent::JobCompleted {
                    job_id: self.ctx.job_id.clone(),
                    result,
                },
            ),
        )
        .await?;

        if passed {
            self.guard(
                cancel,
                self.plan_log.log_info(
                    CODE_JOB_COMPLETED,
                    message,
                    &self.event_properties,
                    Some(timestamp),
                ),
            )
            .await?;
        } else {
            warn!(job_id = %self.ctx.job_id, "job failed");
            self.guard(
                cancel,
                self.plan_log.log_error(
                    CODE_JOB_FAILED,
                    message,
                    &self.event_properties,
                    Some(timestamp),
                ),
            )
            .await?;
        }

        let records = self.fetch_records(cancel).await?;
        let mut selected = self.selector.select(records);
        debug!(job_id = %self.ctx.job_id, count = selected.len(), "selected timeline records");
        if selected.is_empty() {
            return Ok(());
        }

        let finish_time = Utc::now();
        for record in &mut selected {
            record.finish(passed, finish_time);
        }
        self.write_records(selected, cancel).await?;

        info!(job_id = %self.ctx.job_id, passed, "reported job completed");
        Ok(())
    }

    async fn check_session(&self, cancel: &CancellationToken) -> Result<bool> {
        self.guard(cancel, self.validator.is_session_valid(&self.ctx.project_id))
            .await
    }

    async fn log_session_cancelled(
        &self,
        timestamp: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        info!(job_id = %self.ctx.job_id, hub = self.ctx.hub.name(), "session already cancelled, not reporting");
        self.guard(
            cancel,
            self.plan_log.log_info(
                CODE_SESSION_CANCELLED,
                "Session already cancelled, status not reported",
                &self.event_properties,
                Some(timestamp),
            ),
        )
        .await
    }

    async fn fetch_records(&self, cancel: &CancellationToken) -> Result<Vec<TimelineRecord>> {
        self.guard(
            cancel,
            self.timeline.records(
                &self.ctx.project_id,
                self.ctx.hub.name(),
                &self.ctx.plan_id,
                &self.ctx.timeline_id,
            ),
        )
        .await
    }

    async fn write_records(
        &self,
        records: Vec<TimelineRecord>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.guard(
            cancel,
            self.timeline.update_records(
                &self.ctx.project_id,
                self.ctx.hub.name(),
                &self.ctx.plan_id,
                &self.ctx.timeline_id,
                records,
            ),
        )
        .await
    }

    /// Race a collaborator call against the operation's cancellation token.
    async fn guard<T>(
        &self,
        cancel: &CancellationToken,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ReporterError::Cancelled),
            result = call => result,
        }
    }
}
