//! Browser identification from a user-agent string
//!
//! Substring checks with regex version capture. Chromium derivatives embed
//! "Chrome" in their user agents, so Edge ("Edg") and Opera ("OPR") are
//! excluded before Chrome is claimed; Safari embeds "Safari" in Chrome
//! agents and carries its version behind "Version/".

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::net::UNKNOWN;

/// Browser section of the collected info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSection {
    pub name: String,
    pub version: String,
    pub user_agent: String,
    pub language: String,
}

fn re_chrome() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Chrome/([\d.]+)").unwrap())
}

fn re_edge() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Edg/([\d.]+)").unwrap())
}

fn re_opera() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"OPR/([\d.]+)").unwrap())
}

fn re_firefox() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Firefox/([\d.]+)").unwrap())
}

fn re_safari_version() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Version/([\d.]+)").unwrap())
}

fn capture_version(re: &Regex, ua: &str) -> String {
    re.captures(ua)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Identify browser name and version from a user-agent string
pub fn identify(ua: &str) -> (String, String) {
    if ua.contains("Chrome") && !ua.contains("Edg") && !ua.contains("OPR") {
        ("Chrome".to_string(), capture_version(re_chrome(), ua))
    } else if ua.contains("Edg") {
        ("Edge".to_string(), capture_version(re_edge(), ua))
    } else if ua.contains("OPR") {
        ("Opera".to_string(), capture_version(re_opera(), ua))
    } else if ua.contains("Firefox") {
        ("Firefox".to_string(), capture_version(re_firefox(), ua))
    } else if ua.contains("Safari") {
        ("Safari".to_string(), capture_version(re_safari_version(), ua))
    } else {
        (UNKNOWN.to_string(), UNKNOWN.to_string())
    }
}

/// Build the browser section from the optional raw signals
pub fn build(user_agent: Option<&str>, language: Option<&str>) -> BrowserSection {
    let (name, version) = match user_agent {
        Some(ua) => identify(ua),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };
    BrowserSection {
        name,
        version,
        user_agent: user_agent.unwrap_or(UNKNOWN).to_string(),
        language: language.unwrap_or(UNKNOWN).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.6099.129 Safari/537.36";
    const EDGE_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const OPERA_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 OPR/105.0.0.0";
    const FIREFOX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
        (KHTML, like Gecko) Version/17.2 Safari/605.1.15";

    #[test]
    fn test_chrome_without_edg_or_opr() {
        let (name, version) = identify(CHROME_UA);
        assert_eq!(name, "Chrome");
        assert_eq!(version, "120.0.6099.129");
    }

    #[test]
    fn test_edge_takes_priority_over_embedded_chrome() {
        let (name, version) = identify(EDGE_UA);
        assert_eq!(name, "Edge");
        assert_eq!(version, "120.0.2210.91");
    }

    #[test]
    fn test_opera_takes_priority_over_embedded_chrome() {
        let (name, version) = identify(OPERA_UA);
        assert_eq!(name, "Opera");
        assert_eq!(version, "105.0.0.0");
    }

    #[test]
    fn test_firefox() {
        let (name, version) = identify(FIREFOX_UA);
        assert_eq!(name, "Firefox");
        assert_eq!(version, "121.0");
    }

    #[test]
    fn test_safari_version_from_version_token() {
        let (name, version) = identify(SAFARI_UA);
        assert_eq!(name, "Safari");
        assert_eq!(version, "17.2");
    }

    #[test]
    fn test_unrecognized_agent_is_unknown() {
        let (name, version) = identify("curl/8.4.0");
        assert_eq!(name, UNKNOWN);
        assert_eq!(version, UNKNOWN);
    }

    #[test]
    fn test_missing_agent_is_unknown() {
        let section = build(None, None);
        assert_eq!(section.name, UNKNOWN);
        assert_eq!(section.version, UNKNOWN);
        assert_eq!(section.user_agent, UNKNOWN);
        assert_eq!(section.language, UNKNOWN);
    }

    #[test]
    fn test_language_passthrough() {
        let section = build(Some(CHROME_UA), Some("es_ES.UTF-8"));
        assert_eq!(section.language, "es_ES.UTF-8");
    }
}
