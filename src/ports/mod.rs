//! Ports - Abstraction Layer
//!
//! Traits for the collaborators this crate consumes: the plan event stream,
//! the timeline store, the hub-specific validity clients, and the
//! plan-visible logger. Adapters owned by other subsystems implement them;
//! tests implement them as in-memory doubles.

pub mod event_sink;
pub mod plan_logger;
pub mod timeline_store;
pub mod validity;

pub use crate::ports::event_sink::{JobEvent, JobOutcome, PlanEventSink};
pub use crate::ports::plan_logger::PlanLogger;
pub use crate::ports::timeline_store::TimelineStore;
pub use crate::ports::validity::{BuildValidity, ReleaseValidity};
