use crate::backend::ScanBackend;
use crate::state::UiEvent;
use crate::types::{ScanOutcome, ScanRequest};
use eyre::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Submits scans and reports their progress as `UiEvent`s.
///
/// Overlapping submissions are allowed; `is_busy` stays true until the
/// last one finishes.
#[derive(Clone)]
pub struct ScanController {
    backend: Arc<dyn ScanBackend>,
    events: UnboundedSender<UiEvent>,
    in_flight: Arc<AtomicUsize>,
}

impl ScanController {
    pub fn new(backend: Arc<dyn ScanBackend>, events: UnboundedSender<UiEvent>) -> Self {
        Self {
            backend,
            events,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn emit(&self, event: UiEvent) {
        if self.events.send(event).is_err() {
            log::debug!("[controller] receiver_closed: event dropped");
        }
    }

    /// Count the submission and announce it, before any await point
    fn begin(&self, request: &ScanRequest) -> Instant {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("[controller] submit: ip_range={} scan_type={} verbose={} in_flight={}",
            request.ip_range, request.scan_type, request.verbose, in_flight);
        self.emit(UiEvent::ScanStarted);
        Instant::now()
    }

    async fn finish(&self, request: ScanRequest, start: Instant) -> Result<Arc<ScanOutcome>> {
        let result = self.backend.scan_network(&request).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match result {
            Ok(outcome) => {
                let outcome = Arc::new(outcome);
                log::debug!("[controller] scan_succeeded: ip_range={} hosts={} duration={}ms",
                    request.ip_range, outcome.result.hosts.len(), start.elapsed().as_millis());
                self.emit(UiEvent::ScanSucceeded(Arc::clone(&outcome)));
                Ok(outcome)
            }
            Err(e) => {
                log::error!("[controller] scan_failed: ip_range={} duration={}ms error={:#}",
                    request.ip_range, start.elapsed().as_millis(), e);
                self.emit(UiEvent::ScanFailed(format!("{:#}", e)));
                Err(e)
            }
        }
    }

    pub async fn submit(&self, request: ScanRequest) -> Result<Arc<ScanOutcome>> {
        let start = self.begin(&request);
        self.finish(request, start).await
    }

    /// Fire-and-forget variant of `submit` for the UI loop. `is_busy` is
    /// already true when this returns.
    pub fn spawn_submit(&self, request: ScanRequest) -> JoinHandle<()> {
        let start = self.begin(&request);
        let controller = self.clone();
        tokio::spawn(async move {
            // already logged and reported as an event
            let _ = controller.finish(request, start).await;
        })
    }
}
