//! Operating system and hardware identification
//!
//! Structured platform data is preferred when the probe supplies it; the
//! user-agent substring match only fills the gap when it does not.

use crate::constants::net::UNKNOWN;
use crate::constants::system::MEMORY_CAP_GB;

/// System section of the collected info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSection {
    pub os: String,
    pub arch: String,
    pub cpu_cores: String,
    pub memory: String,
    pub hostname: String,
}

/// OS family from user-agent substrings, the original sniffing order
pub fn os_from_user_agent(ua: &str) -> Option<&'static str> {
    if ua.contains("Windows") {
        Some("Windows")
    } else if ua.contains("Android") {
        // Android agents also contain "Linux"
        Some("Android")
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        Some("iOS")
    } else if ua.contains("Mac OS X") || ua.contains("Macintosh") {
        Some("macOS")
    } else if ua.contains("Linux") {
        Some("Linux")
    } else {
        None
    }
}

/// Pick the OS label, preferring the structured platform value
pub fn resolve_os(structured: Option<&str>, ua: Option<&str>) -> String {
    if let Some(name) = structured {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    ua.and_then(os_from_user_agent)
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Render a memory amount, annotating values at or above the cap threshold
pub fn format_memory(gb: f64) -> String {
    let rendered = if gb.fract() < 0.05 {
        format!("{gb:.0} GB")
    } else {
        format!("{gb:.1} GB")
    };
    if gb >= MEMORY_CAP_GB {
        format!("{rendered} (8 GB o más)")
    } else {
        rendered
    }
}

/// Build the system section from the raw signals
pub fn build(
    structured_os: Option<&str>,
    ua: Option<&str>,
    arch: Option<&str>,
    cpu_cores: Option<usize>,
    memory_gb: Option<f64>,
    hostname: Option<&str>,
) -> SystemSection {
    SystemSection {
        os: resolve_os(structured_os, ua),
        arch: arch.unwrap_or(UNKNOWN).to_string(),
        cpu_cores: cpu_cores
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        memory: memory_gb
            .map(format_memory)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        hostname: hostname.unwrap_or(UNKNOWN).to_string(),
    }
}
