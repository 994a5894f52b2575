use async_trait::async_trait;
use eyre::Result;

use crate::types::{ScanOutcome, ScanRequest};

/// The scanning service as seen from this client
#[async_trait]
pub trait ScanBackend: Send + Sync {
    /// Ok only when the service answered its health check with 200
    async fn health_check(&self) -> Result<()>;

    /// Submit one scan and wait for its result
    async fn scan_network(&self, request: &ScanRequest) -> Result<ScanOutcome>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory backend with scripted answers
    #[derive(Default)]
    pub struct FakeBackend {
        health: Mutex<VecDeque<bool>>,
        pub health_calls: AtomicUsize,
        scans: Mutex<VecDeque<Result<ScanOutcome>>>,
        pub scan_requests: Mutex<Vec<ScanRequest>>,
        pub scan_delay: Duration,
    }

    impl FakeBackend {
        pub fn with_health(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                health: Mutex::new(answers.into_iter().collect()),
                ..Default::default()
            }
        }

        pub fn push_scan(&self, answer: Result<ScanOutcome>) {
            self.scans.lock().unwrap().push_back(answer);
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.scan_delay = delay;
            self
        }
    }

    pub fn sample_outcome(ip: &str) -> ScanOutcome {
        ScanOutcome::from_document(json!({
            "hosts": [{
                "ip": ip,
                "state": "up",
                "protocols": [{"protocol": "tcp", "ports": [{"port": 22, "state": "open", "name": "ssh"}]}]
            }],
            "raw_output": "Nmap done: 1 IP address (1 host up)"
        }))
        .unwrap()
    }

    #[async_trait]
    impl ScanBackend for FakeBackend {
        async fn health_check(&self) -> Result<()> {
            self.health_calls.fetch_add(1, Ordering::SeqCst);
            // an exhausted script keeps answering healthy
            let healthy = self.health.lock().unwrap().pop_front().unwrap_or(true);
            if healthy {
                Ok(())
            } else {
                eyre::bail!("simulated network error")
            }
        }

        async fn scan_network(&self, request: &ScanRequest) -> Result<ScanOutcome> {
            self.scan_requests.lock().unwrap().push(request.clone());
            if !self.scan_delay.is_zero() {
                tokio::time::sleep(self.scan_delay).await;
            }
            self.scans
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(sample_outcome(&request.ip_range)))
        }
    }
}
