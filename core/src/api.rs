use crate::app::AppRef;
use crate::deployment::{Deployment, ReleaseMetric};
use crate::error::ApiError;
use async_trait::async_trait;

/// Remote deployment-management service.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    async fn list_deployments(&self, app: &AppRef) -> Result<Vec<Deployment>, ApiError>;

    /// Install metrics of every release of the named deployment.
    async fn release_metrics(
        &self,
        app: &AppRef,
        deployment_name: &str,
    ) -> Result<Vec<ReleaseMetric>, ApiError>;
}
