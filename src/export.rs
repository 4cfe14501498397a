//! Report export: clipboard copy and file download
//!
//! The clipboard path tries the native clipboard first and falls back to the
//! session clipboard utilities (`wl-copy`/`xclip`); the caller surfaces the
//! outcome as a transient status message.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

/// Which mechanism ended up servicing a copy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Native,
    Legacy,
}

/// Copy text to the clipboard, falling back to the legacy command path
pub fn copy_to_clipboard(text: &str) -> Result<CopyMethod> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => {
            info!("Report copied via native clipboard");
            Ok(CopyMethod::Native)
        }
        Err(e) => {
            warn!(error = %e, "Native clipboard unavailable, trying legacy copy");
            legacy_copy(text)?;
            info!("Report copied via legacy clipboard command");
            Ok(CopyMethod::Legacy)
        }
    }
}

fn legacy_copy(text: &str) -> Result<()> {
    let (program, args): (&str, &[&str]) = if env::var_os("WAYLAND_DISPLAY").is_some() {
        ("wl-copy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context(format!("Failed to spawn {program}"))?;

    child
        .stdin
        .take()
        .context("Legacy clipboard command has no stdin")?
        .write_all(text.as_bytes())
        .context(format!("Failed to pipe report into {program}"))?;

    let status = child
        .wait()
        .context(format!("Failed to wait for {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

/// Directory downloads land in: the user download dir, or the working
/// directory when the host does not define one
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write an export artifact and return its full path
pub fn save_to_dir(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .context(format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, contents)
        .context(format!("Failed to write export file to {}", path.display()))?;
    info!(path = %path.display(), "Export written");
    Ok(path)
}
