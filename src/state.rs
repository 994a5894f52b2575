use crate::types::ScanOutcome;
use std::sync::Arc;

/// Discrete things that happen to the UI
#[derive(Debug, Clone)]
pub enum UiEvent {
    Connectivity(bool),
    ScanStarted,
    ScanSucceeded(Arc<ScanOutcome>),
    ScanFailed(String),
    ToggleJson,
    ToggleRaw,
}

/// Visibility of the two raw panels under the rendered result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub show_json: bool,
    pub show_raw: bool,
}

/// Every UI flag in one record. Only `apply` produces a new one.
#[derive(Debug, Clone)]
pub struct ViewState {
    connected: bool,
    in_flight: usize,
    outcome: Option<Arc<ScanOutcome>>,
    toggles: Toggles,
    last_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            connected: true,
            in_flight: 0,
            outcome: None,
            toggles: Toggles::default(),
            last_error: None,
        }
    }

    pub fn apply(self, event: UiEvent) -> Self {
        log::trace!("[state] apply: event={:?}", event);
        match event {
            UiEvent::Connectivity(connected) => {
                if connected != self.connected {
                    log::info!("[state] connectivity_changed: connected={}", connected);
                }
                Self { connected, ..self }
            }
            UiEvent::ScanStarted => Self {
                in_flight: self.in_flight + 1,
                ..self
            },
            UiEvent::ScanSucceeded(outcome) => Self {
                in_flight: self.in_flight.saturating_sub(1),
                outcome: Some(outcome),
                last_error: None,
                ..self
            },
            UiEvent::ScanFailed(error) => Self {
                in_flight: self.in_flight.saturating_sub(1),
                last_error: Some(error),
                ..self
            },
            UiEvent::ToggleJson => Self {
                toggles: Toggles {
                    show_json: !self.toggles.show_json,
                    ..self.toggles
                },
                ..self
            },
            UiEvent::ToggleRaw => Self {
                toggles: Toggles {
                    show_raw: !self.toggles.show_raw,
                    ..self.toggles
                },
                ..self
            },
        }
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn outcome(&self) -> Option<&ScanOutcome> {
        self.outcome.as_deref()
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
