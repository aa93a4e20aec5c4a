use async_trait::async_trait;
use eyre::Context;
use log::debug;
use reqwest::Url;
use reqwest::header::ACCEPT;
use rollout_core::api::DeploymentApi;
use rollout_core::app::AppRef;
use rollout_core::deployment::{Deployment, ReleaseMetric};
use rollout_core::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "v0.1";
const TOKEN_HEADER: &str = "X-API-Token";
const USER_AGENT: &str = concat!("rollout/", env!("CARGO_PKG_VERSION"));

/// An app visible to the current user.
#[derive(Debug, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub owner: AppOwner,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppOwner {
    pub name: String,
}

/// The user an API token belongs to.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Client for the deployment-management REST API.
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl ApiClient {
    pub fn new(endpoint: &str, token: &str) -> eyre::Result<Self> {
        let endpoint =
            Url::parse(endpoint).wrap_err_with(|| format!("invalid API endpoint: {endpoint}"))?;
        if endpoint.cannot_be_a_base() {
            eyre::bail!("invalid API endpoint: {endpoint}");
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .wrap_err("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            token: token.trim().to_owned(),
        })
    }

    pub async fn list_apps(&self) -> Result<Vec<App>, ApiError> {
        self.get(&["apps"]).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(&["user"]).await
    }

    /// Builds `{endpoint}/v0.1/{segments...}`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(API_VERSION).extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments);
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DeploymentApi for ApiClient {
    async fn list_deployments(&self, app: &AppRef) -> Result<Vec<Deployment>, ApiError> {
        self.get(&[
            "apps",
            app.owner().as_str(),
            app.name().as_str(),
            "deployments",
        ])
        .await
    }

    async fn release_metrics(
        &self,
        app: &AppRef,
        deployment_name: &str,
    ) -> Result<Vec<ReleaseMetric>, ApiError> {
        self.get(&[
            "apps",
            app.owner().as_str(),
            app.name().as_str(),
            "deployments",
            deployment_name,
            "metrics",
        ])
        .await
    }
}
