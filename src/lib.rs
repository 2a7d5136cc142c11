//! Job-lifecycle status reporting for a remote orchestration plan
//!
//! A job executing under an orchestration plan announces its start, periodic
//! progress, and completion/failure, and keeps the plan's timeline records
//! (the job's sub-steps) synchronized with that lifecycle. The reporter
//! tolerates the orchestrator racing it: a parent build/release that was
//! cancelled or deleted short-circuits start/completion reporting, and a
//! plan torn down mid-flight is absorbed on the progress path.
//!
//! Wire clients, the plan-visible logger, and the event stream are consumed
//! through the traits in [`ports`]; the hosting process injects adapters.

pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod reporter;
pub mod session;
pub mod timeline;
pub mod types;

pub use crate::config::{Config, ConfigError};
pub use crate::context::{ExecutionContext, Hub};
pub use crate::error::{ReporterError, Result};
pub use crate::ports::{
    BuildValidity, JobEvent, JobOutcome, PlanEventSink, PlanLogger, ReleaseValidity, TimelineStore,
};
pub use crate::reporter::StatusReporter;
pub use crate::session::SessionValidator;
pub use crate::timeline::{RecordResult, RecordSelector, RecordState, TimelineRecord};
pub use crate::types::{BuildId, JobId, PlanId, ProjectId, ReleaseId, TimelineId};
