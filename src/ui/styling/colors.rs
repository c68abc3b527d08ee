//! Color definitions and blending
//!
//! This module provides the dashboard color system based on RGB565 format,
//! matching the 16-bit color depth of the target displays.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3
//!
//! RGB565 has no alpha channel. Translucent colors are produced by
//! [`blend`]ing a foreground color over the known background.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;

// ============================================================================
// Surfaces
// ============================================================================

/// Page background - very light slate
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(241 >> 3, 245 >> 2, 249 >> 3);

/// Card surface color - white
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(31, 63, 31);

/// Card border / separator - light slate
pub const COLOR_BORDER: Rgb565 = Rgb565::new(226 >> 3, 232 >> 2, 240 >> 3);

/// Chart reference lines and gauge track - light gray
pub const COLOR_GRID: Rgb565 = Rgb565::new(229 >> 3, 231 >> 2, 235 >> 3);

// ============================================================================
// Brand
// ============================================================================

/// Brand teal used for the chart line and markers
pub const COLOR_BRAND: Rgb565 = Rgb565::new(13 >> 3, 148 >> 2, 136 >> 3);

// ============================================================================
// Status Colors
// ============================================================================

/// Safe status - green
pub const COLOR_SAFE: Rgb565 = Rgb565::new(34 >> 3, 197 >> 2, 94 >> 3);

/// Moderate status - amber
pub const COLOR_MODERATE: Rgb565 = Rgb565::new(245 >> 3, 158 >> 2, 11 >> 3);

/// Risk status - red
pub const COLOR_RISK: Rgb565 = Rgb565::new(239 >> 3, 68 >> 2, 68 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Headings - dark slate
pub const COLOR_TEXT_PRIMARY: Rgb565 = Rgb565::new(30 >> 3, 41 >> 2, 59 >> 3);

/// Chart labels and body text - slate
pub const COLOR_TEXT_SECONDARY: Rgb565 = Rgb565::new(51 >> 3, 65 >> 2, 85 >> 3);

/// Captions and neutral states - muted slate
pub const COLOR_TEXT_MUTED: Rgb565 = Rgb565::new(100 >> 3, 116 >> 2, 139 >> 3);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

// ============================================================================
// Blending
// ============================================================================

/// Composite `foreground` over `background` with the given opacity (0.0-1.0)
pub fn blend(background: Rgb565, foreground: Rgb565, opacity: f32) -> Rgb565 {
    lerp_color(background, foreground, opacity)
}

/// Linear interpolation between two colors in 8-bit RGB space
pub fn lerp_color(start: Rgb565, end: Rgb565, t: f32) -> Rgb565 {
    let t = t.clamp(0.0, 1.0);
    let (r0, g0, b0) = rgb565_to_rgb888(start);
    let (r1, g1, b1) = rgb565_to_rgb888(end);

    let r = r0 as f32 + (r1 as f32 - r0 as f32) * t;
    let g = g0 as f32 + (g1 as f32 - g0 as f32) * t;
    let b = b0 as f32 + (b1 as f32 - b0 as f32) * t;

    rgb888_to_rgb565(r as u8, g as u8, b as u8)
}

fn rgb565_to_rgb888(color: Rgb565) -> (u8, u8, u8) {
    let raw = color.into_storage();
    let r5 = ((raw >> 11) & 0x1f) as u8;
    let g6 = ((raw >> 5) & 0x3f) as u8;
    let b5 = (raw & 0x1f) as u8;

    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);

    (r8, g8, b8)
}

fn rgb888_to_rgb565(r8: u8, g8: u8, b8: u8) -> Rgb565 {
    Rgb565::new(r8 >> 3, g8 >> 2, b8 >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(WHITE, COLOR_BRAND, 0.0), WHITE);
        assert_eq!(blend(WHITE, COLOR_BRAND, 1.0), COLOR_BRAND);
    }

    #[test]
    fn test_blend_clamps_opacity() {
        assert_eq!(blend(WHITE, COLOR_RISK, 2.0), COLOR_RISK);
        assert_eq!(blend(WHITE, COLOR_RISK, -1.0), WHITE);
    }

    #[test]
    fn test_translucent_brand_sits_between() {
        let tint = blend(WHITE, COLOR_BRAND, 0.1);
        assert_ne!(tint, WHITE);
        assert_ne!(tint, COLOR_BRAND);
    }
}
