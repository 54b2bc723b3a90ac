//! Sizing, styling, and gesture-policy constants for the picker.

/// Height of the 2D spectrum surface
pub const SPECTRUM_HEIGHT: f32 = 120.0;

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Knob circle radius on the 2D spectrum
pub const KNOB_RADIUS: f64 = 8.0;

/// Thumb radius on 1D sliders
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for swatches and slider tracks
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Channel input field width
pub const INPUT_WIDTH: f32 = 32.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 64.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Pixel distance before a press stops counting as a tap
pub const DRAG_THRESHOLD: f64 = 10.0;

/// Checkerboard cell size (for alpha backgrounds)
#[cfg(feature = "alpha")]
pub const CHECKER_CELL: f64 = 5.0;
