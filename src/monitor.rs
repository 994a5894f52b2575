use crate::backend::ScanBackend;
use crate::state::UiEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 5;

/// Periodically asks the backend whether it is alive
pub struct ConnectivityMonitor {
    backend: Arc<dyn ScanBackend>,
    interval: Duration,
}

impl ConnectivityMonitor {
    pub fn new(backend: Arc<dyn ScanBackend>, interval: Duration) -> Self {
        log::debug!("[monitor] new: interval={}ms", interval.as_millis());
        Self { backend, interval }
    }

    /// One probe: reachable or not. Failures are only logged.
    pub async fn probe(&self) -> bool {
        match self.backend.health_check().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[monitor] health_check_failed: error={:#}", e);
                false
            }
        }
    }

    /// Start polling on a tokio task. The first probe fires one interval from now.
    pub fn spawn(self, events: UnboundedSender<UiEvent>) -> MonitorHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut probe_count = 0u64;

            loop {
                ticker.tick().await;
                probe_count += 1;

                let reachable = self.probe().await;
                log::debug!("[monitor] probe_completed: count={} reachable={}", probe_count, reachable);

                if events.send(UiEvent::Connectivity(reachable)).is_err() {
                    log::debug!("[monitor] receiver_closed: stopping after {} probes", probe_count);
                    break;
                }
            }
        });

        MonitorHandle { task }
    }
}

/// Owns the polling task; dropping it stops the polling
pub struct MonitorHandle {
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        log::debug!("[monitor] stop");
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::FakeBackend;
    use std::sync::atomic::Ordering;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const FAST: Duration = Duration::from_millis(10);

    async fn next_connectivity(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> bool {
        match timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Some(UiEvent::Connectivity(reachable))) => reachable,
            other => panic!("expected connectivity event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_maps_result_to_flag() {
        let backend = Arc::new(FakeBackend::with_health([false, true]));
        let monitor = ConnectivityMonitor::new(backend, FAST);

        assert!(!monitor.probe().await);
        assert!(monitor.probe().await);
    }

    #[tokio::test]
    async fn test_failure_then_recovery() {
        let backend = Arc::new(FakeBackend::with_health([false, true]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = ConnectivityMonitor::new(backend, FAST).spawn(tx);

        assert!(!next_connectivity(&mut rx).await);
        assert!(next_connectivity(&mut rx).await);
    }

    #[tokio::test]
    async fn test_first_probe_waits_one_interval() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let _handle = ConnectivityMonitor::new(backend.clone(), Duration::from_millis(200)).spawn(tx);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.health_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_stops_polling() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectivityMonitor::new(backend.clone(), FAST).spawn(tx);

        assert!(next_connectivity(&mut rx).await);
        handle.stop();

        tokio::time::sleep(Duration::from_millis(30)).await;
        let calls = backend.health_calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(backend.health_calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn test_closed_receiver_ends_task() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = ConnectivityMonitor::new(backend, FAST).spawn(tx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
