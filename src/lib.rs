pub mod backend;
pub mod cli;
pub mod client;
pub mod controller;
pub mod logging;
pub mod monitor;
pub mod pretty;
pub mod render;
pub mod state;
pub mod tui;
pub mod types;

// Re-export key types and functions at the crate root
pub use backend::ScanBackend;
pub use client::HttpBackend;
pub use controller::ScanController;
pub use monitor::{ConnectivityMonitor, MonitorHandle};
pub use render::render_result;
pub use state::{Toggles, UiEvent, ViewState};
pub use tui::{App, init_terminal, restore_terminal};
pub use types::{Host, Port, ScanOutcome, ScanRequest, ScanResult, ScanType};
pub use logging::{init_logging, get_log_file_path};
