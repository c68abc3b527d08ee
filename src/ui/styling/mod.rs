//! Styling system for dashboard elements
//!
//! - [`colors`] - Color constants and RGB565 blending
//! - [`fonts`] - Font selection and glyph metrics

pub mod colors;
pub mod fonts;

pub use colors::{
    COLOR_BACKGROUND, COLOR_BORDER, COLOR_BRAND, COLOR_GRID, COLOR_MODERATE, COLOR_RISK,
    COLOR_SAFE, COLOR_SURFACE, COLOR_TEXT_MUTED, COLOR_TEXT_PRIMARY, COLOR_TEXT_SECONDARY, WHITE,
    blend, lerp_color,
};
pub use fonts::TextSize;
