use crate::render::{plain_text, render_result};
use crate::state::Toggles;
use crate::types::{ScanOutcome, ScanRequest};

const SEPARATOR_WIDTH: usize = 80;

fn separator() -> String {
    "─".repeat(SEPARATOR_WIDTH)
}

/// Stdout rendering of a finished scan, used when the TUI is off
pub fn format_outcome(request: &ScanRequest, outcome: &ScanOutcome, toggles: Toggles) -> String {
    let mut out = String::new();
    out.push_str(&format!("🎯 Scanning: {} ({})\n", request.ip_range, request.scan_type.label()));
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&plain_text(&render_result(outcome, toggles)));
    out.push('\n');
    out.push_str(&separator());
    out
}

pub fn print_outcome(request: &ScanRequest, outcome: &ScanOutcome, toggles: Toggles) {
    println!("{}", format_outcome(request, outcome, toggles));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScanType;
    use serde_json::json;

    #[test]
    fn test_format_outcome() {
        let outcome = ScanOutcome::from_document(json!({
            "hosts": [{"ip": "10.0.0.7", "state": "up", "protocols": []}],
            "raw_output": "raw"
        }))
        .unwrap();
        let request = ScanRequest::new("10.0.0.7", ScanType::ArpPing);

        let text = format_outcome(&request, &outcome, Toggles { show_json: false, show_raw: true });
        assert!(text.starts_with("🎯 Scanning: 10.0.0.7 (ARP Ping Scan)"));
        assert!(text.contains("Host: 10.0.0.7"));
        assert!(text.contains("Raw Nmap Output:\nraw"));
        assert!(text.ends_with(&separator()));
    }
}
