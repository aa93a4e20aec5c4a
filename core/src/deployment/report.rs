//! Command logic behind `deployment show` and `deployment list`: fetch the
//! app's deployments, resolve their latest release metrics and shape the
//! result for either a table or machine-readable output.
use crate::api::DeploymentApi;
use crate::app::AppRef;
use crate::concurrency::map_bounded;
use crate::deployment::metrics::{
    attach_metrics, find_release_metric, install_metrics_summary, release_metadata, total_active,
};
use crate::deployment::{Deployment, ReleaseMetric};
use crate::error::{ApiError, CommandError};
use crate::output::OutputMode;
use chrono::{DateTime, Utc};
use log::debug;
use std::num::NonZeroUsize;

/// Upper bound of concurrent metric requests.
pub const METRICS_CONCURRENCY: NonZeroUsize = NonZeroUsize::new(30).unwrap();

pub const NAME_TITLE: &str = "Name";
pub const KEY_TITLE: &str = "Key";
pub const UPDATE_METADATA_TITLE: &str = "Update Metadata";
pub const INSTALL_METRICS_TITLE: &str = "Install Metrics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRow {
    pub name: String,
    pub key: String,
    /// Empty when the deployment has no release yet.
    pub update_metadata: String,
    pub install_metrics: String,
}

impl DeploymentRow {
    pub fn new(
        deployment: &Deployment,
        metrics: &[ReleaseMetric],
        format_time: impl Fn(&DateTime<Utc>) -> String,
    ) -> Self {
        let (update_metadata, install_metrics) = match &deployment.latest_release {
            Some(release) => (
                release_metadata(release, format_time),
                install_metrics_summary(
                    find_release_metric(metrics, &release.label),
                    total_active(metrics),
                ),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            name: deployment.name.clone(),
            key: deployment.key.clone(),
            update_metadata,
            install_metrics,
        }
    }

    pub fn titles(with_key: bool) -> Vec<&'static str> {
        match with_key {
            true => vec![
                NAME_TITLE,
                KEY_TITLE,
                UPDATE_METADATA_TITLE,
                INSTALL_METRICS_TITLE,
            ],
            false => vec![NAME_TITLE, UPDATE_METADATA_TITLE, INSTALL_METRICS_TITLE],
        }
    }

    pub fn cells(&self, with_key: bool) -> Vec<String> {
        let mut cells = vec![self.name.clone()];
        if with_key {
            cells.push(self.key.clone());
        }
        cells.push(self.update_metadata.clone());
        cells.push(self.install_metrics.clone());
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Only the deployment key was requested.
    Key(String),
    Row(DeploymentRow),
    /// The deployment with its latest release metrics attached.
    Structured(Deployment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Rows(Vec<DeploymentRow>),
    Structured(Vec<Deployment>),
}

#[derive(Debug, Clone, Copy)]
pub struct ShowRequest<'a> {
    pub app: &'a AppRef,
    pub deployment_name: &'a str,
    pub display_key: bool,
    pub mode: OutputMode,
}

/// Fetches the release metrics of every deployment that has a latest
/// release, at most `METRICS_CONCURRENCY` requests at a time.
pub async fn fetch_release_metrics(
    api: &dyn DeploymentApi,
    app: &AppRef,
    deployments: Vec<Deployment>,
) -> Result<Vec<(Deployment, Vec<ReleaseMetric>)>, ApiError> {
    map_bounded(deployments, METRICS_CONCURRENCY, |deployment| async move {
        if deployment.latest_release.is_none() {
            return Ok((deployment, Vec::new()));
        }
        debug!("fetching metrics of deployment {}", deployment.name);
        let metrics = api.release_metrics(app, &deployment.name).await?;
        Ok::<_, ApiError>((deployment, metrics))
    })
    .await
}

pub async fn show_deployment(
    api: &dyn DeploymentApi,
    request: ShowRequest<'_>,
    format_time: impl Fn(&DateTime<Utc>) -> String,
) -> Result<ShowOutcome, CommandError> {
    let ShowRequest {
        app,
        deployment_name,
        display_key,
        mode,
    } = request;
    if deployment_name.is_empty() {
        return Err(CommandError::exception(
            "A deployment name is required (--deploymentName)",
        ));
    }
    let deployments = api
        .list_deployments(app)
        .await
        .map_err(|e| CommandError::from_deployment_fetch(app, &e))?;
    let Some(deployment) = deployments
        .into_iter()
        .find(|deployment| deployment.name == deployment_name)
    else {
        return Err(CommandError::exception(format!(
            "The deployment {deployment_name} does not exist for app {app}.\n\
             Run the command `rollout deployment list --app {app}` to see its deployments."
        )));
    };
    if display_key {
        return Ok(ShowOutcome::Key(deployment.key));
    }
    let resolved = fetch_release_metrics(api, app, vec![deployment])
        .await
        .map_err(|e| CommandError::from_deployment_fetch(app, &e))?;
    let Some((mut deployment, metrics)) = resolved.into_iter().next() else {
        return Err(CommandError::exception("Failed to fetch deployments"));
    };
    let outcome = match mode {
        OutputMode::Json => {
            attach_metrics(&mut deployment, &metrics);
            ShowOutcome::Structured(deployment)
        }
        OutputMode::Table => {
            ShowOutcome::Row(DeploymentRow::new(&deployment, &metrics, format_time))
        }
    };
    Ok(outcome)
}

pub async fn list_deployments(
    api: &dyn DeploymentApi,
    app: &AppRef,
    mode: OutputMode,
    format_time: impl Fn(&DateTime<Utc>) -> String,
) -> Result<ListOutcome, CommandError> {
    let deployments = api
        .list_deployments(app)
        .await
        .map_err(|e| CommandError::from_deployment_fetch(app, &e))?;
    debug!("app {app} has {} deployments", deployments.len());
    let resolved = fetch_release_metrics(api, app, deployments)
        .await
        .map_err(|e| CommandError::from_deployment_fetch(app, &e))?;
    let outcome = match mode {
        OutputMode::Json => ListOutcome::Structured(
            resolved
                .into_iter()
                .map(|(mut deployment, metrics)| {
                    attach_metrics(&mut deployment, &metrics);
                    deployment
                })
                .collect(),
        ),
        OutputMode::Table => ListOutcome::Rows(
            resolved
                .iter()
                .map(|(deployment, metrics)| {
                    DeploymentRow::new(deployment, metrics, &format_time)
                })
                .collect(),
        ),
    };
    Ok(outcome)
}
