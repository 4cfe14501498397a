//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Application identity and file naming
pub mod app {
    /// Directory name under the user config dir
    pub const CONFIG_DIR: &str = "info-usuario";

    /// Settings file name inside the config dir
    pub const CONFIG_FILENAME: &str = "config.toml";

    /// Prefix for exported report files
    pub const REPORT_PREFIX: &str = "info-usuario";

    /// Informational document shown in the modal (looked up next to the
    /// binary and in the working directory before falling back to the
    /// embedded copy)
    pub const README_FILENAME: &str = "README.md";
}

/// External geolocation endpoints
pub mod net {
    /// Primary source: full geolocation by caller IP
    pub const PRIMARY_GEO_URL: &str = "https://ipapi.co/json/";

    /// Fallback source: IP address only
    pub const FALLBACK_IP_URL: &str = "https://api.ipify.org?format=json";

    /// Placeholder for any field no source could populate
    pub const UNKNOWN: &str = "Unknown";
}

/// System identification thresholds
pub mod system {
    /// Memory display is annotated at or above this value, mirroring the
    /// capped readings some platforms report
    pub const MEMORY_CAP_GB: f64 = 8.0;

    /// Reference DPI for the pixel ratio calculation
    pub const BASE_DPI: f64 = 96.0;
}

/// Export behavior
pub mod export {
    /// Transient status messages clear themselves after this many seconds
    pub const STATUS_CLEAR_SECS: u64 = 10;

    /// Timestamp layout embedded in exported file names
    pub const FILENAME_TIMESTAMP: &str = "%Y_%m_%d_%H_%M";

    /// Timestamp layout printed in the report header
    pub const REPORT_TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";
}
