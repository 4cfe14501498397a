//! Network identity lookup
//!
//! The fallback policy is a data structure: an ordered table of candidate
//! sources, tried in series, where the first successful source wins and
//! fills whatever fields it carries. A source failure is logged and the next
//! candidate is tried; if every source fails the section keeps its "Unknown"
//! defaults. One attempt per source, no retries.
//!
//! The IP-only fallback deliberately leaves city/region/country/ISP/timezone
//! untouched; that asymmetry is the documented behavior.

use serde_json::Value;
use tracing::{info, warn};

use crate::constants::net::{FALLBACK_IP_URL, PRIMARY_GEO_URL, UNKNOWN};

/// Which fields a source is allowed to populate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoFields {
    Full,
    IpOnly,
}

/// A candidate geolocation data source
pub struct GeoSource {
    pub name: &'static str,
    pub url: &'static str,
    pub fields: GeoFields,
}

/// Candidate sources in fallback order
pub const GEO_SOURCES: [GeoSource; 2] = [
    GeoSource {
        name: "ipapi.co",
        url: PRIMARY_GEO_URL,
        fields: GeoFields::Full,
    },
    GeoSource {
        name: "ipify.org",
        url: FALLBACK_IP_URL,
        fields: GeoFields::IpOnly,
    },
];

/// Network section of the collected info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSection {
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub isp: String,
    pub timezone: String,
    pub connection_type: String,
}

impl NetworkSection {
    /// All fields at their "Unknown" defaults; the connection type is a
    /// local read supplied by the probe, not by the remote sources
    pub fn unknown(connection_type: Option<&str>) -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            isp: UNKNOWN.to_string(),
            timezone: UNKNOWN.to_string(),
            connection_type: connection_type.unwrap_or(UNKNOWN).to_string(),
        }
    }

    /// Fill still-unknown fields from a source response
    pub fn absorb(&mut self, body: &Value, fields: GeoFields) {
        set_if_unknown(&mut self.ip, body, "ip");
        if fields == GeoFields::IpOnly {
            return;
        }
        set_if_unknown(&mut self.city, body, "city");
        set_if_unknown(&mut self.region, body, "region");
        set_if_unknown(&mut self.country, body, "country_name");
        set_if_unknown(&mut self.isp, body, "org");
        set_if_unknown(&mut self.timezone, body, "timezone");
    }
}

fn set_if_unknown(slot: &mut String, body: &Value, key: &str) {
    if slot != UNKNOWN {
        return;
    }
    if let Some(value) = body.get(key).and_then(Value::as_str) {
        if !value.is_empty() {
            *slot = value.to_string();
        }
    }
}

/// Resolve the network section against the candidate sources, in order.
/// Never fails; every error path degrades to "Unknown" fields.
pub async fn lookup(client: &reqwest::Client, section: NetworkSection) -> NetworkSection {
    lookup_with(client, section, &GEO_SOURCES).await
}

async fn lookup_with(
    client: &reqwest::Client,
    mut section: NetworkSection,
    sources: &[GeoSource],
) -> NetworkSection {
    for source in sources {
        match fetch_json(client, source.url).await {
            Ok(body) => {
                section.absorb(&body, source.fields);
                info!(source = source.name, "Geolocation source answered");
                break;
            }
            Err(e) => {
                warn!(source = source.name, error = %e, "Geolocation source failed");
            }
        }
    }
    section
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> anyhow::Result<Value> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json::<Value>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn primary_body() -> Value {
        json!({
            "ip": "93.184.216.34",
            "city": "Madrid",
            "region": "Madrid",
            "country_name": "Spain",
            "org": "Example ISP S.L.",
            "timezone": "Europe/Madrid"
        })
    }

    #[test]
    fn test_primary_success_populates_every_field() {
        let mut section = NetworkSection::unknown(Some("Ethernet"));
        section.absorb(&primary_body(), GeoFields::Full);

        assert_eq!(section.ip, "93.184.216.34");
        assert_eq!(section.city, "Madrid");
        assert_eq!(section.region, "Madrid");
        assert_eq!(section.country, "Spain");
        assert_eq!(section.isp, "Example ISP S.L.");
        assert_eq!(section.timezone, "Europe/Madrid");
        assert_eq!(section.connection_type, "Ethernet");
    }

    #[test]
    fn test_fallback_populates_only_ip() {
        let mut section = NetworkSection::unknown(None);
        // The fallback body carries more than the mask allows; only the IP
        // may be taken
        let body = json!({ "ip": "93.184.216.34", "city": "Oslo" });
        section.absorb(&body, GeoFields::IpOnly);

        assert_eq!(section.ip, "93.184.216.34");
        assert_eq!(section.city, UNKNOWN);
        assert_eq!(section.region, UNKNOWN);
        assert_eq!(section.country, UNKNOWN);
        assert_eq!(section.isp, UNKNOWN);
        assert_eq!(section.timezone, UNKNOWN);
    }

    #[test]
    fn test_all_sources_failed_leaves_unknown_defaults() {
        let section = NetworkSection::unknown(None);
        assert_eq!(section.ip, UNKNOWN);
        assert_eq!(section.timezone, UNKNOWN);
        assert_eq!(section.connection_type, UNKNOWN);
    }

    #[test]
    fn test_absorb_does_not_overwrite_known_fields() {
        let mut section = NetworkSection::unknown(None);
        section.absorb(&primary_body(), GeoFields::Full);
        let other = json!({ "ip": "10.0.0.1", "city": "Oslo" });
        section.absorb(&other, GeoFields::Full);

        assert_eq!(section.ip, "93.184.216.34");
        assert_eq!(section.city, "Madrid");
    }

    #[test]
    fn test_absorb_ignores_missing_and_empty_values() {
        let mut section = NetworkSection::unknown(None);
        section.absorb(&json!({ "ip": "", "city": 42 }), GeoFields::Full);
        assert_eq!(section.ip, UNKNOWN);
        assert_eq!(section.city, UNKNOWN);
    }

    #[test]
    fn test_source_table_order() {
        assert_eq!(GEO_SOURCES[0].fields, GeoFields::Full);
        assert_eq!(GEO_SOURCES[1].fields, GeoFields::IpOnly);
    }

    #[tokio::test]
    async fn test_lookup_with_unreachable_sources_leaves_unknown() {
        // Port 9 (discard) refuses the connection; both sources fail and the
        // section must come back with its local defaults intact
        let sources = [
            GeoSource {
                name: "primario",
                url: "http://127.0.0.1:9/json",
                fields: GeoFields::Full,
            },
            GeoSource {
                name: "alternativo",
                url: "http://127.0.0.1:9/ip",
                fields: GeoFields::IpOnly,
            },
        ];
        let client = reqwest::Client::new();

        let section =
            lookup_with(&client, NetworkSection::unknown(Some("Ethernet")), &sources).await;

        assert_eq!(section.ip, UNKNOWN);
        assert_eq!(section.city, UNKNOWN);
        assert_eq!(section.region, UNKNOWN);
        assert_eq!(section.country, UNKNOWN);
        assert_eq!(section.isp, UNKNOWN);
        assert_eq!(section.timezone, UNKNOWN);
        assert_eq!(section.connection_type, "Ethernet");
    }
}
