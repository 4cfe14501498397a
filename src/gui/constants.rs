//! GUI-specific constants for layout and status colors

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 580.0;
pub const WINDOW_HEIGHT: f32 = 760.0;
pub const WINDOW_MIN_WIDTH: f32 = 460.0;
pub const WINDOW_MIN_HEIGHT: f32 = 520.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 12.0;
pub const ITEM_SPACING: f32 = 6.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 170, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Info modal layout
pub const MODAL_WIDTH: f32 = 480.0;
pub const MODAL_SCROLL_HEIGHT: f32 = 360.0;
