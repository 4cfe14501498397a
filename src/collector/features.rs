//! Host capability detection
//!
//! Every probe is wrapped so that any error means "unsupported" (false);
//! nothing here can fail the collection. The map is ordered so the report
//! and the panels list capabilities deterministically.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;

/// Run a capability probe, treating any error as unsupported
fn guarded(check: impl FnOnce() -> Result<bool>) -> bool {
    check().unwrap_or(false)
}

fn dir_has_entries(path: &str) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_some())
}

fn has_battery() -> Result<bool> {
    for entry in fs::read_dir("/sys/class/power_supply")? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with("BAT") {
            return Ok(true);
        }
    }
    Ok(false)
}

fn storage_writable() -> Result<bool> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir"))?
        .join(crate::constants::app::CONFIG_DIR);
    fs::create_dir_all(&dir)?;
    let probe = dir.join(".write-probe");
    fs::write(&probe, b"ok")?;
    fs::remove_file(&probe)?;
    Ok(true)
}

/// Detect host capabilities, in report order
pub fn detect() -> BTreeMap<String, bool> {
    let mut features = BTreeMap::new();
    features.insert(
        "almacenamiento".to_string(),
        guarded(storage_writable),
    );
    features.insert(
        "audio".to_string(),
        guarded(|| Ok(Path::new("/proc/asound").exists() || Path::new("/dev/snd").exists())),
    );
    features.insert("bateria".to_string(), guarded(has_battery));
    features.insert(
        "bluetooth".to_string(),
        guarded(|| dir_has_entries("/sys/class/bluetooth")),
    );
    features.insert(
        "notificaciones".to_string(),
        guarded(|| Ok(env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some())),
    );
    features.insert(
        "opengl".to_string(),
        guarded(|| dir_has_entries("/dev/dri")),
    );
    features.insert(
        "portapapeles".to_string(),
        guarded(|| Ok(arboard::Clipboard::new().is_ok())),
    );
    features.insert(
        "systemd".to_string(),
        guarded(|| Ok(Path::new("/run/systemd/system").exists())),
    );
    features.insert(
        "wayland".to_string(),
        guarded(|| Ok(env::var_os("WAYLAND_DISPLAY").is_some())),
    );
    features.insert(
        "x11".to_string(),
        guarded(|| Ok(env::var_os("DISPLAY").is_some())),
    );
    features
}
