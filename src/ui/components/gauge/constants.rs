//! Constants for the score gauge
//!
//! Geometry is expressed in units of a square 232-unit view box and scaled
//! to the pixel footprint of each size.

use embassy_time::Duration;

/// Side length of the gauge view box
pub const VIEW_BOX_UNITS: f32 = 232.0;

/// Center of the view box on both axes
pub const VIEW_BOX_CENTER_UNITS: f32 = VIEW_BOX_UNITS / 2.0;

/// Ring stroke width in view-box units
pub const STROKE_WIDTH_UNITS: f32 = 16.0;

/// Pixel footprint of the small gauge
pub const SMALL_FOOTPRINT_PX: u32 = 96;

/// Pixel footprint of the medium gauge
pub const MEDIUM_FOOTPRINT_PX: u32 = 160;

/// Pixel footprint of the large gauge
pub const LARGE_FOOTPRINT_PX: u32 = 224;

pub const SMALL_RADIUS_UNITS: f32 = 40.0;
pub const MEDIUM_RADIUS_UNITS: f32 = 70.0;
pub const LARGE_RADIUS_UNITS: f32 = 100.0;

/// Vertical position of the category label (view-box units)
pub const SMALL_LABEL_Y_UNITS: f32 = 140.0;
pub const MEDIUM_LABEL_Y_UNITS: f32 = 142.0;
pub const LARGE_LABEL_Y_UNITS: f32 = 146.0;

/// Arc start angle; -90° is 12 o'clock
pub const ARC_START_DEGREES: f32 = -90.0;

/// Opacity of the background track ring over the card surface
pub const TRACK_OPACITY: f32 = 0.25;

/// Number of ticks the reveal animation is spread over
pub const ANIMATION_STEPS: u32 = 60;

/// Reveal animation tick period (~60 FPS)
pub const ANIMATION_TICK: Duration = Duration::from_millis(16);
