use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Scanning mode the backend should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    #[default]
    #[value(name = "discovery")]
    Discovery,
    #[value(name = "arp_ping")]
    ArpPing,
    #[value(name = "common_ports")]
    CommonPorts,
    #[value(name = "all_ports")]
    AllPorts,
    #[value(name = "custom")]
    Custom,
}

impl ScanType {
    pub const ALL: [ScanType; 5] = [
        ScanType::Discovery,
        ScanType::ArpPing,
        ScanType::CommonPorts,
        ScanType::AllPorts,
        ScanType::Custom,
    ];

    /// Wire name as sent in the request body
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Discovery => "discovery",
            ScanType::ArpPing => "arp_ping",
            ScanType::CommonPorts => "common_ports",
            ScanType::AllPorts => "all_ports",
            ScanType::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScanType::Discovery => "Discovery Scan",
            ScanType::ArpPing => "ARP Ping Scan",
            ScanType::CommonPorts => "Most Common Ports",
            ScanType::AllPorts => "All Ports (TCP and UDP)",
            ScanType::Custom => "Custom Scan",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Next scan type in menu order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous scan type in menu order, wrapping around
    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user asked for. Nothing here is validated client side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    pub ip_range: String,
    pub scan_type: ScanType,
    pub custom_params: String,
    pub verbose: bool,
}

/// Body of `POST /scan-network`
#[derive(Debug, Serialize)]
pub struct ScanPayload<'a> {
    pub ip_range: &'a str,
    pub scan_type: ScanType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_params: Option<&'a str>,
    pub verbose: bool,
}

impl ScanRequest {
    pub fn new(ip_range: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            ip_range: ip_range.into(),
            scan_type,
            ..Default::default()
        }
    }

    pub fn with_custom_params(mut self, params: impl Into<String>) -> Self {
        self.custom_params = params.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Wire body; custom params only travel with a custom scan
    pub fn payload(&self) -> ScanPayload<'_> {
        ScanPayload {
            ip_range: &self.ip_range,
            scan_type: self.scan_type,
            custom_params: (self.scan_type == ScanType::Custom).then_some(self.custom_params.as_str()),
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub raw_output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub ip: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// MAC address -> vendor name, in the order the backend sent them
    #[serde(default)]
    pub vendor: Map<String, Value>,
    #[serde(default)]
    pub osmatches: Vec<OsMatch>,
    #[serde(default)]
    pub protocols: Vec<ProtocolPorts>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsMatch {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub accuracy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPorts {
    pub protocol: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub port: u16,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub extrainfo: String,
}

/// A parsed result together with the document it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub document: Value,
}

impl ScanOutcome {
    pub fn from_document(document: Value) -> serde_json::Result<Self> {
        let result = ScanResult::deserialize(&document)?;
        Ok(Self { result, document })
    }

    /// 2-space indented rendering of the received document
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap_or_else(|_| self.document.to_string())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Display text for a vendor map value
pub fn vendor_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
