use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod metrics;
pub mod report;

/// A named release channel of an app, e.g. "Production" or "Staging".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub name: String,
    /// Secret key clients use to query this deployment for updates.
    pub key: String,
    #[serde(default)]
    pub latest_release: Option<Release>,
}

/// A published update of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub label: String,
    pub target_binary_range: String,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub upload_time: DateTime<Utc>,
    #[serde(default)]
    pub released_by: String,
    /// Only filled in for machine-readable output.
    #[serde(default)]
    pub metrics: Option<AggregatedMetric>,
}

/// Install counters for a single release, as tracked by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMetric {
    pub label: String,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub downloaded: u64,
    /// `None` when the backend does not track installs for this release.
    #[serde(default)]
    pub installed: Option<u64>,
    #[serde(default)]
    pub failed: u64,
}

/// Counters of the latest release together with the active total across
/// every release of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetric {
    pub active: u64,
    pub downloaded: u64,
    pub installed: Option<u64>,
    pub failed: u64,
    pub total_active: u64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_deployment_with_release() {
        let json = r#"{
            "name": "Production",
            "key": "prod-key",
            "latestRelease": {
                "label": "v3",
                "targetBinaryRange": "1.2.x",
                "isMandatory": true,
                "uploadTime": 1700000000000,
                "releasedBy": "ops@acme.dev"
            }
        }"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        let release = deployment.latest_release.unwrap();
        assert_eq!(release.label, "v3");
        assert_eq!(release.target_binary_range, "1.2.x");
        assert!(release.is_mandatory);
        assert_eq!(release.upload_time.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(release.metrics, None);
    }

    #[test]
    fn test_deserialize_deployment_without_release() {
        let json = r#"{"name": "Staging", "key": "staging-key", "latestRelease": null}"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(deployment.latest_release, None);
        let json = r#"{"name": "Staging", "key": "staging-key"}"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(deployment.latest_release, None);
    }

    #[test]
    fn test_deserialize_metric_with_untracked_installs() {
        let json =
            r#"{"label": "v1", "active": 3, "downloaded": 4, "installed": null, "failed": 1}"#;
        let metric: ReleaseMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.installed, None);
        let json = r#"{"label": "v1", "active": 3}"#;
        let metric: ReleaseMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.downloaded, 0);
        assert_eq!(metric.installed, None);
    }

    #[test]
    fn test_serialize_aggregated_metric_has_no_label() {
        let metric = AggregatedMetric {
            active: 7,
            downloaded: 10,
            installed: Some(7),
            failed: 1,
            total_active: 10,
        };
        let serialized = serde_json::to_string(&metric).unwrap();
        let expected = r#"{"active":7,"downloaded":10,"installed":7,"failed":1,"totalActive":10}"#;
        assert_eq!(serialized, expected);
    }
}
