//! Datadog series API submission

use async_trait::async_trait;
use std::time::Duration;

use super::{MetricsError, MetricsSink};

/// Default Datadog site
pub const DEFAULT_DATADOG_SITE: &str = "datadoghq.com";

/// Submits gauges to the Datadog v1 series endpoint
#[derive(Clone)]
pub struct DatadogClient {
    site: String,
    api_key: String,
    app_key: String,
    agent: ureq::Agent,
}

impl DatadogClient {
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self::with_site(DEFAULT_DATADOG_SITE, api_key, app_key)
    }

    pub fn with_site(
        site: impl Into<String>,
        api_key: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(15))
            .build();

        Self {
            site: site.into(),
            api_key: api_key.into(),
            app_key: app_key.into(),
            agent,
        }
    }

    fn series_url(&self) -> String {
        format!("https://api.{}/api/v1/series", self.site)
    }

    fn submit_blocking(&self, payload: serde_json::Value) -> Result<(), MetricsError> {
        let result = self
            .agent
            .post(&self.series_url())
            .set("DD-API-KEY", &self.api_key)
            .set("DD-APPLICATION-KEY", &self.app_key)
            .send_json(payload);

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, resp)) => Err(MetricsError::Http {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(MetricsError::Transport(t.to_string())),
        }
    }
}

/// Body of a single-point gauge submission
fn series_payload(name: &str, value: f64, timestamp: i64, tags: &[String]) -> serde_json::Value {
    serde_json::json!({
        "series": [{
            "metric": name,
            "type": "gauge",
            "points": [[timestamp, value]],
            "tags": tags,
        }]
    })
}

#[async_trait]
impl MetricsSink for DatadogClient {
    async fn gauge(&self, name: &str, value: f64, tags: &[String]) -> Result<(), MetricsError> {
        let payload = series_payload(name, value, chrono::Utc::now().timestamp(), tags);
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.submit_blocking(payload))
            .await
            .map_err(|e| MetricsError::Task(e.to_string()))?
    }
}
