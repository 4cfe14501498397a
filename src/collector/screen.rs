//! Screen section built from raw display geometry

use crate::constants::net::UNKNOWN;
use crate::constants::system::BASE_DPI;
use crate::platform::RawScreen;

/// Screen section of the collected info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSection {
    pub resolution: String,
    pub available_resolution: String,
    pub color_depth: String,
    pub pixel_ratio: String,
    pub viewport: String,
    pub orientation: String,
}

impl ScreenSection {
    /// Used when no display server is reachable
    pub fn unknown() -> Self {
        Self {
            resolution: UNKNOWN.to_string(),
            available_resolution: UNKNOWN.to_string(),
            color_depth: UNKNOWN.to_string(),
            pixel_ratio: UNKNOWN.to_string(),
            viewport: UNKNOWN.to_string(),
            orientation: UNKNOWN.to_string(),
        }
    }
}

/// Ratio of the physical pixel density against the 96 DPI reference
fn pixel_ratio(width_px: u16, width_mm: u16) -> Option<f64> {
    if width_mm == 0 {
        return None;
    }
    let dpi = f64::from(width_px) / (f64::from(width_mm) / 25.4);
    Some(dpi / BASE_DPI)
}

/// Build the screen section from the raw geometry
pub fn build(raw: Option<&RawScreen>) -> ScreenSection {
    let Some(raw) = raw else {
        return ScreenSection::unknown();
    };

    let orientation = if raw.width >= raw.height {
        "landscape"
    } else {
        "portrait"
    };

    ScreenSection {
        resolution: format!("{}x{}", raw.width, raw.height),
        available_resolution: format!("{}x{}", raw.avail_width, raw.avail_height),
        color_depth: format!("{} bits", raw.depth),
        pixel_ratio: pixel_ratio(raw.width, raw.width_mm)
            .map(|r| format!("{r:.2}"))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        viewport: format!("{}x{}", raw.avail_width, raw.avail_height),
        orientation: orientation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawScreen {
        RawScreen {
            width: 2560,
            height: 1440,
            avail_width: 2560,
            avail_height: 1400,
            depth: 24,
            width_mm: 597,
        }
    }

    #[test]
    fn test_build_formats_geometry() {
        let section = build(Some(&raw()));
        assert_eq!(section.resolution, "2560x1440");
        assert_eq!(section.available_resolution, "2560x1400");
        assert_eq!(section.color_depth, "24 bits");
        assert_eq!(section.orientation, "landscape");
    }

    #[test]
    fn test_pixel_ratio_against_reference_dpi() {
        // 2560 px over 597 mm is ~108.9 DPI, ~1.13x the 96 DPI reference
        let section = build(Some(&raw()));
        assert_eq!(section.pixel_ratio, "1.13");
    }

    #[test]
    fn test_zero_physical_width_gives_unknown_ratio() {
        let mut r = raw();
        r.width_mm = 0;
        assert_eq!(build(Some(&r)).pixel_ratio, UNKNOWN);
    }

    #[test]
    fn test_portrait_orientation() {
        let mut r = raw();
        (r.width, r.height) = (1080, 1920);
        assert_eq!(build(Some(&r)).orientation, "portrait");
    }

    #[test]
    fn test_missing_display_is_unknown() {
        let section = build(None);
        assert_eq!(section.resolution, UNKNOWN);
        assert_eq!(section.orientation, UNKNOWN);
    }
}
