//! Host environment access
//!
//! Everything that touches the real machine lives behind `EnvironmentProbe`,
//! so the collection and formatting logic can be exercised with a fake probe
//! in tests. `HostProbe` is the production implementation: env vars, sysinfo
//! and an X11 roundtrip for screen geometry.

use std::collections::BTreeMap;
use std::env;
use std::fs;

use anyhow::{Context, Result};
use sysinfo::System;
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt};

use crate::collector::features;

/// Raw display geometry as reported by the display server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScreen {
    pub width: u16,
    pub height: u16,
    pub avail_width: u16,
    pub avail_height: u16,
    pub depth: u8,
    pub width_mm: u16,
}

/// Untyped environment signals, each absent when the host does not expose it
#[derive(Debug, Clone, Default)]
pub struct RawSignals {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub os_name: Option<String>,
    pub arch: Option<String>,
    pub cpu_cores: Option<usize>,
    pub memory_gb: Option<f64>,
    pub hostname: Option<String>,
    pub screen: Option<RawScreen>,
    pub connection_type: Option<String>,
}

/// Capability set of the execution environment: read raw signals, detect
/// boolean capabilities
pub trait EnvironmentProbe {
    fn signals(&self) -> RawSignals;
    fn capabilities(&self) -> BTreeMap<String, bool>;
}

/// Production probe reading the actual host
pub struct HostProbe {
    user_agent_override: Option<String>,
}

impl HostProbe {
    pub fn new(user_agent_override: Option<String>) -> Self {
        Self { user_agent_override }
    }
}

impl EnvironmentProbe for HostProbe {
    fn signals(&self) -> RawSignals {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu();

        let screen = match query_screen() {
            Ok(screen) => Some(screen),
            Err(e) => {
                warn!(error = %e, "No display geometry available");
                None
            }
        };

        RawSignals {
            user_agent: self
                .user_agent_override
                .clone()
                .or_else(|| env::var("HTTP_USER_AGENT").ok()),
            language: env::var("LANG").ok().filter(|v| !v.is_empty()),
            os_name: System::long_os_version().or_else(System::name),
            arch: Some(env::consts::ARCH.to_string()),
            cpu_cores: Some(sys.cpus().len()).filter(|&n| n > 0),
            memory_gb: Some(sys.total_memory() as f64 / 1_073_741_824.0).filter(|&gb| gb > 0.0),
            hostname: System::host_name(),
            screen,
            connection_type: connection_type(),
        }
    }

    fn capabilities(&self) -> BTreeMap<String, bool> {
        features::detect()
    }
}

/// Query root screen geometry and the usable work area over X11
fn query_screen() -> Result<RawScreen> {
    let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11")?;
    let screen = &conn.setup().roots[screen_num];
    debug!(
        screen = screen_num,
        width = screen.width_in_pixels,
        height = screen.height_in_pixels,
        "Connected to X11 for screen geometry"
    );

    // The work area excludes panels and docks; fall back to the full
    // resolution when the window manager does not publish it
    let (avail_width, avail_height) = query_workarea(&conn, screen.root)
        .unwrap_or((screen.width_in_pixels, screen.height_in_pixels));

    Ok(RawScreen {
        width: screen.width_in_pixels,
        height: screen.height_in_pixels,
        avail_width,
        avail_height,
        depth: screen.root_depth,
        width_mm: screen.width_in_millimeters,
    })
}

fn query_workarea(conn: &impl Connection, root: x11rb::protocol::xproto::Window) -> Option<(u16, u16)> {
    let atom = conn
        .intern_atom(false, b"_NET_WORKAREA")
        .ok()?
        .reply()
        .ok()?
        .atom;
    let prop = conn
        .get_property(false, root, atom, AtomEnum::CARDINAL, 0, 4)
        .ok()?
        .reply()
        .ok()?;
    let values: Vec<u32> = prop.value32()?.collect();
    if values.len() < 4 {
        return None;
    }
    Some((values[2] as u16, values[3] as u16))
}

/// Classify the first active physical interface. Loopback, bridges, tunnels
/// and other virtual interfaces are skipped so a host running containers
/// still reports its real NIC.
fn connection_type() -> Option<String> {
    let entries = fs::read_dir("/sys/class/net").ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let Ok(operstate) = fs::read_to_string(entry.path().join("operstate")) else {
            continue;
        };
        if operstate.trim() != "up" {
            continue;
        }
        if let Some(kind) = classify_interface(&name) {
            return Some(kind.to_string());
        }
    }
    None
}

/// Physical interface classes by kernel naming prefix; `None` for anything
/// else (lo, docker0, virbr0, tun0, veth…)
fn classify_interface(name: &str) -> Option<&'static str> {
    if name.starts_with("wl") {
        Some("Wi-Fi")
    } else if name.starts_with("en") || name.starts_with("eth") {
        Some("Ethernet")
    } else if name.starts_with("ww") {
        Some("Móvil")
    } else {
        None
    }
}
