//! Job execution context
//!
//! Carries the identifiers a job-execution host hands to the reporter once
//! per job invocation. Immutable for the lifetime of the reporter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ReporterError, Result};
use crate::types::{BuildId, JobId, PlanId, ProjectId, ReleaseId, TimelineId};

/// The category of parent execution that owns the job.
///
/// A closed union: exactly one hub-specific identifier is meaningful, and it
/// lives inside the matching variant. Unknown hub designations are rejected
/// at parse time, so no validator can ever see one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hub {
    Build { build_id: BuildId },
    Release { release_id: ReleaseId },
}

impl Hub {
    /// Resolve a hub designation from the wire into the closed union.
    ///
    /// # Errors
    /// `ReporterError::UnsupportedHub` for designations that are neither
    /// Build nor Release; `ReporterError::Config` when the matching
    /// sub-identifier is absent.
    pub fn parse(
        designation: &str,
        build_id: Option<BuildId>,
        release_id: Option<ReleaseId>,
    ) -> Result<Self> {
        match designation.to_ascii_lowercase().as_str() {
            "build" => {
                let build_id = build_id
                    .ok_or_else(|| ReporterError::Config("build id missing for Build hub".to_string()))?;
                Ok(Hub::Build { build_id })
            }
            "release" => {
                let release_id = release_id.ok_or_else(|| {
                    ReporterError::Config("release id missing for Release hub".to_string())
                })?;
                Ok(Hub::Release { release_id })
            }
            _ => Err(ReporterError::UnsupportedHub(designation.to_string())),
        }
    }

    /// Canonical hub name used in backend routes and event scopes.
    pub fn name(&self) -> &'static str {
        match self {
            Hub::Build { .. } => "build",
            Hub::Release { .. } => "release",
        }
    }
}

impl std::fmt::Display for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Execution context for one job under an orchestration plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub plan_id: PlanId,
    pub project_id: ProjectId,
    pub job_id: JobId,
    pub timeline_id: TimelineId,
    pub hub: Hub,
    /// Bearer token the injected clients authenticate with.
    pub auth_token: String,
    /// Base URI of the plan/timeline backend.
    pub plan_uri: String,
    /// Base URI of the hub-specific status backend.
    pub hub_uri: String,
    /// Caller-supplied annotations attached to every emitted event.
    pub properties: HashMap<String, serde_json::Value>,
}

impl ExecutionContext {
    /// Validate the context the host handed us.
    ///
    /// # Errors
    /// `ReporterError::Config` when a required identifier is empty.
    pub fn validate(&self) -> Result<()> {
        if self.plan_id.0.is_empty() {
            return Err(ReporterError::Config("plan id cannot be empty".to_string()));
        }
        if self.project_id.0.is_empty() {
            return Err(ReporterError::Config("project id cannot be empty".to_string()));
        }
        if self.job_id.0.is_empty() {
            return Err(ReporterError::Config("job id cannot be empty".to_string()));
        }
        if self.timeline_id.0.is_empty() {
            return Err(ReporterError::Config("timeline id cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Event-annotation properties, derived once per reporter: the caller's
    /// bag plus the identifiers every event carries.
    pub fn event_properties(&self) -> HashMap<String, serde_json::Value> {
        let mut props = self.properties.clone();
        props.insert("planId".to_string(), serde_json::json!(self.plan_id.0));
        props.insert("projectId".to_string(), serde_json::json!(self.project_id.0));
        props.insert("jobId".to_string(), serde_json::json!(self.job_id.0));
        props.insert("hubName".to_string(), serde_json::json!(self.hub.name()));
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_hub() -> Hub {
        Hub::parse("Build", Some(BuildId::new("b-1")), None).unwrap()
    }

    #[test]
    fn test_hub_parse_build() {
        let hub = build_hub();
        assert_eq!(hub.name(), "build");
        assert_eq!(hub, Hub::Build { build_id: BuildId::new("b-1") });
    }

    #[test]
    fn test_hub_parse_release_case_insensitive() {
        let hub = Hub::parse("RELEASE", None, Some(ReleaseId::new("r-1"))).unwrap();
        assert_eq!(hub.name(), "release");
    }

    #[test]
    fn test_hub_parse_unknown_designation() {
        let err = Hub::parse("Gallery", Some(BuildId::new("b-1")), None).unwrap_err();
        assert!(matches!(err, ReporterError::UnsupportedHub(ref h) if h == "Gallery"));
    }

    #[test]
    fn test_hub_parse_missing_sub_id() {
        let err = Hub::parse("build", None, None).unwrap_err();
        assert!(matches!(err, ReporterError::Config(_)));
    }

    #[test]
    fn test_event_properties_include_identifiers() {
        let mut properties = HashMap::new();
        properties.insert("attempt".to_string(), serde_json::json!(2));
        let ctx = ExecutionContext {
            plan_id: PlanId::new("plan-1"),
            project_id: ProjectId::new("proj-1"),
            job_id: JobId::new("job-1"),
            timeline_id: TimelineId::new("tl-1"),
            hub: build_hub(),
            auth_token: "token".to_string(),
            plan_uri: "https://plans.example".to_string(),
            hub_uri: "https://builds.example".to_string(),
            properties,
        };

        ctx.validate().unwrap();
        let props = ctx.event_properties();
        assert_eq!(props["planId"], serde_json::json!("plan-1"));
        assert_eq!(props["jobId"], serde_json::json!("job-1"));
        assert_eq!(props["hubName"], serde_json::json!("build"));
        assert_eq!(props["attempt"], serde_json::json!(2));
    }

    #[test]
    fn test_validate_rejects_empty_plan_id() {
        let ctx = ExecutionContext {
            plan_id: PlanId::new(""),
            project_id: ProjectId::new("proj-1"),
            job_id: JobId::new("job-1"),
            timeline_id: TimelineId::new("tl-1"),
            hub: build_hub(),
            auth_token: String::new(),
            plan_uri: String::new(),
            hub_uri: String::new(),
            properties: HashMap::new(),
        };
        assert!(ctx.validate().is_err());
    }
}
