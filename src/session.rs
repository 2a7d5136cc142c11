//! Session validity checking
//!
//! Before start/completion events go out, the reporter asks the hub-specific
//! status backend whether the job's parent build/release still exists. This
//! is the gate that keeps the reporter from writing status into a backend
//! that has already torn down the job's parent.

use std::sync::Arc;
use tracing::debug;

use crate::context::Hub;
use crate::error::Result;
use crate::ports::{BuildValidity, ReleaseValidity};
use crate::types::{BuildId, ProjectId, ReleaseId};

/// Hub-dispatched session validator.
///
/// Carries only the client that matches the hub selected at context
/// construction; the other hub's client is never built. Unknown hubs cannot
/// reach this type — `Hub::parse` rejects them first.
pub enum SessionValidator {
    Build {
        build_id: BuildId,
        client: Arc<dyn BuildValidity>,
    },
    Release {
        release_id: ReleaseId,
        client: Arc<dyn ReleaseValidity>,
    },
}

impl SessionValidator {
    pub fn for_build(build_id: BuildId, client: Arc<dyn BuildValidity>) -> Self {
        Self::Build { build_id, client }
    }

    pub fn for_release(release_id: ReleaseId, client: Arc<dyn ReleaseValidity>) -> Self {
        Self::Release { release_id, client }
    }

    /// Ask the matching status backend whether the parent is still live.
    ///
    /// # Errors
    /// A transient failure to reach the backend propagates as an error; it is
    /// never conflated with an invalid session.
    pub async fn is_session_valid(&self, project_id: &ProjectId) -> Result<bool> {
        match self {
            SessionValidator::Build { build_id, client } => {
                let valid = client.is_valid(project_id, build_id).await?;
                debug!(%project_id, %build_id, valid, "checked build session");
                Ok(valid)
            }
            SessionValidator::Release { release_id, client } => {
                let valid = client.is_valid(project_id, release_id).await?;
                debug!(%project_id, %release_id, valid, "checked release session");
                Ok(valid)
            }
        }
    }

    /// The hub this validator was built for.
    pub fn hub_name(&self) -> &'static str {
        match self {
            SessionValidator::Build { .. } => "build",
            SessionValidator::Release { .. } => "release",
        }
    }

    /// Convenience constructor dispatching on a parsed hub.
    pub fn for_hub(
        hub: &Hub,
        build_client: impl FnOnce() -> Arc<dyn BuildValidity>,
        release_client: impl FnOnce() -> Arc<dyn ReleaseValidity>,
    ) -> Self {
        match hub {
            Hub::Build { build_id } => Self::for_build(build_id.clone(), build_client()),
            Hub::Release { release_id } => Self::for_release(release_id.clone(), release_client()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReporterError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubBuildValidity {
        valid: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BuildValidity for StubBuildValidity {
        async fn is_valid(&self, _project_id: &ProjectId, _build_id: &BuildId) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.valid)
        }
    }

    struct FailingReleaseValidity;

    #[async_trait]
    impl ReleaseValidity for FailingReleaseValidity {
        async fn is_valid(&self, _project_id: &ProjectId, _release_id: &ReleaseId) -> Result<bool> {
            Err(ReporterError::Transport("backend unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_build_dispatch_asks_build_client() {
        let client = Arc::new(StubBuildValidity {
            valid: true,
            calls: AtomicUsize::new(0),
        });
        let validator = SessionValidator::for_build(BuildId::new("b-1"), client.clone());

        let valid = validator
            .is_session_valid(&ProjectId::new("proj-1"))
            .await
            .unwrap();
        assert!(valid);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(validator.hub_name(), "build");
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_invalid() {
        let validator =
            SessionValidator::for_release(ReleaseId::new("r-1"), Arc::new(FailingReleaseValidity));

        let err = validator
            .is_session_valid(&ProjectId::new("proj-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReporterError::Transport(_)));
    }

    #[tokio::test]
    async fn test_for_hub_selects_matching_client() {
        let hub = Hub::Build {
            build_id: BuildId::new("b-2"),
        };
        let validator = SessionValidator::for_hub(
            &hub,
            || {
                Arc::new(StubBuildValidity {
                    valid: false,
                    calls: AtomicUsize::new(0),
                })
            },
            || Arc::new(FailingReleaseValidity),
        );

        let valid = validator
            .is_session_valid(&ProjectId::new("proj-1"))
            .await
            .unwrap();
        assert!(!valid);
    }
}
