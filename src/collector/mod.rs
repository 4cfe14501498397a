//! Diagnostic information collection
//!
//! `collect` reads every local signal through the probe, awaits the single
//! network stage, and returns one immutable `SystemInfo` snapshot. Nothing
//! mutates the snapshot afterwards; the export handlers only read it.

pub mod browser;
pub mod features;
pub mod screen;
pub mod system;

use std::collections::BTreeMap;

use tracing::info;

use crate::net::{self, NetworkSection};
use crate::platform::EnvironmentProbe;

pub use browser::BrowserSection;
pub use screen::ScreenSection;
pub use system::SystemSection;

/// Everything collected in one session
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub browser: BrowserSection,
    pub system: SystemSection,
    pub screen: ScreenSection,
    pub network: NetworkSection,
    pub features: BTreeMap<String, bool>,
}

/// Gather all sections. The network lookup is skipped when no client is
/// given; its section then keeps the local "Unknown" defaults.
pub async fn collect(probe: &dyn EnvironmentProbe, client: Option<&reqwest::Client>) -> SystemInfo {
    let signals = probe.signals();

    let browser = browser::build(signals.user_agent.as_deref(), signals.language.as_deref());
    let system = system::build(
        signals.os_name.as_deref(),
        signals.user_agent.as_deref(),
        signals.arch.as_deref(),
        signals.cpu_cores,
        signals.memory_gb,
        signals.hostname.as_deref(),
    );
    let screen = screen::build(signals.screen.as_ref());
    let features = probe.capabilities();

    let network = NetworkSection::unknown(signals.connection_type.as_deref());
    let network = match client {
        Some(client) => net::lookup(client, network).await,
        None => network,
    };

    info!(
        browser = %browser.name,
        os = %system.os,
        ip = %network.ip,
        "Collection finished"
    );

    SystemInfo {
        browser,
        system,
        screen,
        network,
        features,
    }
}
