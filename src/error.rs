//! Error taxonomy for status reporting
//!
//! An invalid session is deliberately not represented here: the reporter
//! absorbs it as an informational short-circuit, never as an error.

use crate::types::PlanId;

/// Result type for reporter operations
pub type Result<T> = std::result::Result<T, ReporterError>;

/// Main reporter error enum
#[derive(thiserror::Error, Debug)]
pub enum ReporterError {
    /// The orchestration plan no longer exists on the backend. Swallowed on
    /// the progress-log path only; propagates everywhere else.
    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    /// Hub designation is neither Build nor Release. Raised at context
    /// construction, before any client exists.
    #[error("Unsupported hub: {0}")]
    UnsupportedHub(String),

    /// Network/backend failure from a collaborator call. Propagated
    /// unchanged; retry policy belongs to the injected clients.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The operation's cancellation token fired mid-call.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReporterError {
    /// True for the benign deleted-plan race on the progress path.
    pub fn is_plan_not_found(&self) -> bool {
        matches!(self, ReporterError::PlanNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReporterError::PlanNotFound(PlanId::new("plan-1"));
        assert!(err.to_string().contains("plan-1"));

        let err = ReporterError::UnsupportedHub("Gallery".to_string());
        assert!(err.to_string().contains("Gallery"));
    }

    #[test]
    fn test_plan_not_found_predicate() {
        assert!(ReporterError::PlanNotFound(PlanId::new("p")).is_plan_not_found());
        assert!(!ReporterError::Cancelled.is_plan_not_found());
    }
}
