use crate::client::DEFAULT_BACKEND_URL;
use crate::monitor::DEFAULT_HEALTH_INTERVAL_SECS;
use crate::types::{ScanRequest, ScanType};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "scanui")]
#[command(about = "Terminal front end for a network scanning service")]
pub struct Cli {
    /// Base URL of the scanning API
    #[arg(long, env = "SCANUI_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Seconds between health checks
    #[arg(long, default_value_t = DEFAULT_HEALTH_INTERVAL_SECS)]
    pub health_interval: u64,

    /// Seconds before a health check counts as failed (defaults to the interval)
    #[arg(long)]
    pub health_timeout: Option<u64>,

    /// Refresh rate in milliseconds
    #[arg(short, long, default_value = "250")]
    pub tick_rate: u64,

    /// IP range to scan, e.g. 192.168.1.0/24
    #[arg(long)]
    pub ip_range: Option<String>,

    /// Scan type
    #[arg(long, value_enum, default_value_t = ScanType::Discovery)]
    pub scan_type: ScanType,

    /// Raw nmap parameters, only used with --scan-type custom
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub custom_params: String,

    /// Ask the backend for verbose scanner output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run one scan and print the result instead of starting the TUI
    #[arg(long)]
    pub no_tui: bool,

    /// With --no-tui, include the original JSON
    #[arg(long)]
    pub json: bool,

    /// With --no-tui, include the raw scanner output
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval.max(1))
    }

    pub fn health_timeout(&self) -> Duration {
        self.health_timeout
            .map(|secs| Duration::from_secs(secs.max(1)))
            .unwrap_or_else(|| self.health_interval())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }

    /// The request described by the command line flags
    pub fn scan_request(&self) -> ScanRequest {
        ScanRequest::new(self.ip_range.clone().unwrap_or_default(), self.scan_type)
            .with_custom_params(self.custom_params.clone())
            .with_verbose(self.verbose)
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
