use crate::backend::ScanBackend;
use crate::types::{ScanOutcome, ScanRequest};
use async_trait::async_trait;
use eyre::{Result, WrapErr};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/api";
const SCAN_ENDPOINT: &str = "scan-network";
const HEALTH_ENDPOINT: &str = "health-check";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Talks to the scanning service over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: &str, health_timeout: Duration) -> Result<Self> {
        log::debug!("[client] new: base_url={} health_timeout={}ms", base_url, health_timeout.as_millis());

        // Url::join drops the last path segment unless the base ends with '/'
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)
            .wrap_err_with(|| format!("Invalid backend URL: {}", base_url))?;

        // Scans have no overall timeout; nmap runs can take a long time
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("scanui/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            health_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .wrap_err_with(|| format!("Failed to build endpoint URL for {}", path))
    }
}

#[async_trait]
impl ScanBackend for HttpBackend {
    async fn health_check(&self) -> Result<()> {
        let url = self.endpoint(HEALTH_ENDPOINT)?;
        log::trace!("[client] health_check: url={}", url);

        let response = self
            .client
            .get(url.clone())
            .timeout(self.health_timeout)
            .send()
            .await
            .wrap_err_with(|| format!("Health check request to {} failed", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            eyre::bail!("Health check returned {}", status);
        }

        log::trace!("[client] health_check_ok: url={}", url);
        Ok(())
    }

    async fn scan_network(&self, request: &ScanRequest) -> Result<ScanOutcome> {
        let url = self.endpoint(SCAN_ENDPOINT)?;
        log::debug!("[client] scan_network: url={} ip_range={} scan_type={} verbose={}",
            url, request.ip_range, request.scan_type, request.verbose);

        let request_start = Instant::now();
        let response = self
            .client
            .post(url.clone())
            .json(&request.payload())
            .send()
            .await
            .wrap_err_with(|| format!("Scan request to {} failed", url))?;

        let status = response.status();
        let body = response.text().await.wrap_err("Failed to read scan response body")?;
        log::debug!("[client] scan_response: status={} duration={}ms body_len={}",
            status, request_start.elapsed().as_millis(), body.len());

        if !status.is_success() {
            match error_detail(&body) {
                Some(detail) => eyre::bail!("Scan failed with {}: {}", status, detail),
                None => eyre::bail!("Scan failed with {}", status),
            }
        }

        let document: Value = serde_json::from_str(&body).wrap_err("Scan response is not valid JSON")?;
        let outcome = ScanOutcome::from_document(document).wrap_err("Scan response has an unexpected shape")?;

        log::info!("[client] scan_completed: ip_range={} hosts={} duration={}ms",
            request.ip_range, outcome.result.hosts.len(), request_start.elapsed().as_millis());
        Ok(outcome)
    }
}

/// Pull a FastAPI-style `{"detail": ...}` message out of an error body
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}
