//! reqwest implementation of the backend API
//!
//! Every call is a single attempt. Retries are the operator's job (manual
//! refresh), so failures are mapped to typed errors and returned.

use crate::api::{endpoints, BackendApi};
use async_trait::async_trait;
use orabak_core::{
    BackupStatistics, ConsoleConfig, DatabaseInfo, OrabakError, Result, SchedulerStatus, Strategy,
    SystemHealth,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the backup backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Create a backend client for `base_url`
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrabakError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Create a backend client from console configuration
    pub fn from_config(config: &ConsoleConfig, token: Option<String>) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            token,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, path: &str) -> Result<Vec<u8>> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| OrabakError::Transport(format!("{} {}", path, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| OrabakError::Transport(format!("Failed to read {} body: {}", path, e)))?;

        if !status.is_success() {
            return Err(OrabakError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!("{} -> {} ({} bytes)", path, status, body.len());
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.client.get(self.url(path)).query(query);
        let body = self.send(request, path).await?;
        serde_json::from_slice(&body)
            .map_err(|e| OrabakError::Decode(format!("{}: {}", path, e)))
    }

    async fn post_command(&self, path: &str) -> Result<Option<SchedulerStatus>> {
        let request = self.client.post(self.url(path));
        let body = self.send(request, path).await?;
        Ok(status_from_command_reply(&body))
    }
}

/// Pull a scheduler status out of a start/stop reply.
///
/// Accepts the status at the top level or nested under `status`; anything
/// else (empty body, plain message) yields `None`.
fn status_from_command_reply(body: &[u8]) -> Option<SchedulerStatus> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let candidate = match value.get("status") {
        Some(nested @ Value::Object(_)) => nested,
        _ => &value,
    };
    candidate.get("running")?.as_bool()?;
    serde_json::from_value(candidate.clone()).ok()
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn health(&self) -> Result<SystemHealth> {
        self.get_json(endpoints::HEALTH, &[]).await
    }

    async fn database_info(&self) -> Result<DatabaseInfo> {
        self.get_json(endpoints::DATABASE, &[]).await
    }

    async fn strategies(&self) -> Result<Vec<Strategy>> {
        self.get_json(endpoints::STRATEGIES, &[]).await
    }

    async fn scheduler_status(&self) -> Result<SchedulerStatus> {
        self.get_json(endpoints::SCHEDULER_STATUS, &[]).await
    }

    async fn backup_statistics(&self, days: u32) -> Result<BackupStatistics> {
        self.get_json(endpoints::STATISTICS, &[("days", days.to_string())])
            .await
    }

    async fn start_scheduler(&self) -> Result<Option<SchedulerStatus>> {
        self.post_command(endpoints::SCHEDULER_START).await
    }

    async fn stop_scheduler(&self) -> Result<Option<SchedulerStatus>> {
        self.post_command(endpoints::SCHEDULER_STOP).await
    }
}
