//! Constants for history chart rendering
//!
//! All magic numbers are defined here with descriptive names and units.

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::styling::{COLOR_BRAND, COLOR_GRID, COLOR_TEXT_SECONDARY, WHITE};

pub const REFERENCE_LINE_COUNT: usize = 4;

/// Horizontal reference lines, in percent of the vertical range
pub const REFERENCE_LINE_PERCENTS: [u8; REFERENCE_LINE_COUNT] = [20, 40, 60, 80];

/// Reference line color
pub const REFERENCE_LINE_COLOR: Rgb565 = COLOR_GRID;

/// Top of the score scale
pub const SCORE_SCALE_MAX: f32 = 100.0;

/// Line segments per quadratic curve segment
///
/// Higher values produce smoother curves but increase rendering time.
pub const CURVE_SUBDIVISIONS: usize = 8;

/// Series line color
pub const LINE_COLOR: Rgb565 = COLOR_BRAND;

/// Series line width in pixels
pub const LINE_WIDTH_PX: u32 = 2;

/// Opacity of the fill at the top of the chart (fades to 0 at the baseline)
pub const FILL_TOP_OPACITY: f32 = 0.1;

/// Number of color bands in the gradient fill
pub const FILL_BANDS: usize = 8;

/// Marker dot diameter in pixels (radius 4 plus the ring)
pub const MARKER_DIAMETER_PX: u32 = 9;

pub const MARKER_FILL_COLOR: Rgb565 = COLOR_BRAND;
pub const MARKER_RING_COLOR: Rgb565 = WHITE;
pub const MARKER_RING_WIDTH_PX: u32 = 1;

/// Marker label color
pub const LABEL_COLOR: Rgb565 = COLOR_TEXT_SECONDARY;

/// Date label baseline above the bottom edge in pixels
pub const DATE_LABEL_BOTTOM_OFFSET_PX: i32 = 5;

/// Score label baseline above the marker in pixels
pub const SCORE_LABEL_OFFSET_PX: i32 = 10;
