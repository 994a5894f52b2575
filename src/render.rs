use crate::state::Toggles;
use crate::types::{Host, Port, ProtocolPorts, ScanOutcome, vendor_text};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const PORT_COL_WIDTH: usize = 8;
const STATE_COL_WIDTH: usize = 15;
const SERVICE_COL_WIDTH: usize = 14;
const PRODUCT_COL_WIDTH: usize = 20;
const VERSION_COL_WIDTH: usize = 14;
const TABLE_HEADERS: [&str; 6] = ["Port", "State", "Service", "Product", "Version", "Extra Info"];

fn heading(text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn labeled(label: &'static str, value: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::White)),
        Span::styled(value.into(), Style::default().fg(color)),
    ])
}

/// Pads each cell to its column width; a cell wider than its column still keeps one space before the next
fn table_row(cells: [&str; 6]) -> String {
    format!(
        "{:<pw$} {:<sw$} {:<svw$} {:<prw$} {:<vw$} {}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5],
        pw = PORT_COL_WIDTH,
        sw = STATE_COL_WIDTH,
        svw = SERVICE_COL_WIDTH,
        prw = PRODUCT_COL_WIDTH,
        vw = VERSION_COL_WIDTH,
    )
    .trim_end()
    .to_string()
}

fn state_color(state: &str) -> Color {
    match state {
        "open" | "up" => Color::Green,
        "filtered" | "open|filtered" => Color::Yellow,
        "closed" | "down" => Color::Red,
        _ => Color::Gray,
    }
}

fn port_row(port: &Port) -> Line<'static> {
    let number = port.port.to_string();
    let row = table_row([
        number.as_str(),
        port.state.as_str(),
        port.name.as_str(),
        port.product.as_str(),
        port.version.as_str(),
        port.extrainfo.as_str(),
    ]);
    Line::from(Span::styled(row, Style::default().fg(state_color(&port.state))))
}

fn protocol_lines(protocol: &ProtocolPorts, lines: &mut Vec<Line<'static>>) {
    lines.push(heading(format!("  Protocol: {}", protocol.protocol), Color::Cyan));
    lines.push(Line::from(Span::styled(
        format!("    {}", table_row(TABLE_HEADERS)),
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED),
    )));
    for port in &protocol.ports {
        let mut row = port_row(port);
        row.spans.insert(0, Span::raw("    "));
        lines.push(row);
    }
}

fn host_lines(host: &Host, lines: &mut Vec<Line<'static>>) {
    let title = match host.hostname.as_deref() {
        Some(hostname) if !hostname.is_empty() => format!("Host: {} ({})", host.ip, hostname),
        _ => format!("Host: {}", host.ip),
    };
    lines.push(heading(title, Color::Yellow));
    lines.push(labeled("  State: ", host.state.clone(), state_color(&host.state)));

    if let Some(mac) = host.mac.as_deref() {
        lines.push(labeled("  MAC: ", mac.to_string(), Color::Gray));
    }

    if !host.vendor.is_empty() {
        lines.push(heading("  Vendor:", Color::Cyan));
        for (mac, vendor) in &host.vendor {
            lines.push(Line::from(format!("    • {}: {}", mac, vendor_text(vendor))));
        }
    }

    if !host.osmatches.is_empty() {
        lines.push(heading("  OS Matches:", Color::Cyan));
        for os in &host.osmatches {
            lines.push(Line::from(format!("    • {} (Accuracy: {}%)", os.name, os.accuracy)));
        }
    }

    for protocol in &host.protocols {
        protocol_lines(protocol, lines);
    }
}

fn toggle_hint(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
        Span::styled(text, Style::default().fg(Color::White)),
    ])
}

fn panel(title: &'static str, body: &str, lines: &mut Vec<Line<'static>>) {
    lines.push(heading(title, Color::Magenta));
    if body.is_empty() {
        return;
    }
    for line in body.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray))));
    }
}

/// Render one scan outcome. Hosts, protocols and ports appear in the order received.
pub fn render_result(outcome: &ScanOutcome, toggles: Toggles) -> Vec<Line<'static>> {
    let result = &outcome.result;
    let mut lines = Vec::new();

    if let Some(message) = result.message.as_deref() {
        lines.push(Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Green))));
        lines.push(Line::from(""));
    }

    if result.hosts.is_empty() {
        lines.push(Line::from(Span::styled("No hosts found", Style::default().fg(Color::Gray))));
    }

    for host in &result.hosts {
        host_lines(host, &mut lines);
        lines.push(Line::from(""));
    }

    lines.push(toggle_hint("F2", if toggles.show_json { "Hide JSON" } else { "Show JSON" }));
    if toggles.show_json {
        panel("Original JSON:", &outcome.pretty_json(), &mut lines);
    }

    lines.push(toggle_hint("F3", if toggles.show_raw { "Hide Raw" } else { "Show RAW" }));
    if toggles.show_raw {
        panel("Raw Nmap Output:", &result.raw_output, &mut lines);
    }

    lines
}

/// Text of a single line without styling
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Flatten rendered lines to plain text, one per row
pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines.iter().map(line_text).collect::<Vec<_>>().join("\n")
}
